//! Flat output rows for persisting search results.
//!
//! Column order is `scenario, balance, <body>_d, <body>_phase, ..., passes,
//! ordinal`, bodies in table order. CSV and JSON lines carry the same fields.

use serde::Serialize;
use tula_model::{BodyTable, QuantumNumber};

use crate::engine_types::SearchResult;

/// One body's cell pair in a [`ResultRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BodyCell {
    pub quantum: QuantumNumber,
    /// 0 for primary, 1 for opposed.
    pub phase: usize,
}

/// Fixed-width output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub ordinal: usize,
    pub scenario: String,
    pub balance: f64,
    pub bodies: Vec<BodyCell>,
    pub passes: bool,
}

impl ResultRow {
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            ordinal: result.ordinal,
            scenario: result.scenario.clone(),
            balance: result.evaluation.balance,
            bodies: result
                .configuration
                .assignments()
                .iter()
                .map(|a| BodyCell {
                    quantum: a.quantum,
                    phase: a.phase.index(),
                })
                .collect(),
            passes: result.evaluation.passes,
        }
    }

    /// Cell values in [`columns`] order.
    pub fn values(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(4 + 2 * self.bodies.len());
        out.push(self.scenario.clone());
        out.push(format!("{:.6}", self.balance));
        for cell in &self.bodies {
            out.push(cell.quantum.to_string());
            out.push(cell.phase.to_string());
        }
        out.push(self.passes.to_string());
        out.push(self.ordinal.to_string());
        out
    }
}

/// Column names for rows over `table`.
pub fn columns(table: &BodyTable) -> Vec<String> {
    let mut out = Vec::with_capacity(4 + 2 * table.len());
    out.push("scenario".to_string());
    out.push("balance".to_string());
    for name in table.names() {
        let key = name.to_lowercase();
        out.push(format!("{key}_d"));
        out.push(format!("{key}_phase"));
    }
    out.push("passes".to_string());
    out.push("ordinal".to_string());
    out
}

/// Rows for every result, in output order.
pub fn rows(results: &[SearchResult]) -> Vec<ResultRow> {
    results.iter().map(ResultRow::from_result).collect()
}
