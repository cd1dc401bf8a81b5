//! Types for the search engine.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use tula_model::{Configuration, Evaluation};

/// Default retention threshold for balance scores.
pub const DEFAULT_THRESHOLD: f64 = 99.0;

/// Lifecycle of one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchPhase {
    Idle,
    Enumerating,
    Evaluating,
    Filtering,
    Sorted,
    Done,
}

impl SearchPhase {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Enumerating => "enumerating",
            Self::Evaluating => "evaluating",
            Self::Filtering => "filtering",
            Self::Sorted => "sorted",
            Self::Done => "done",
        }
    }
}

impl Display for SearchPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Run-time options for a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Keep configurations with `balance >= threshold`, in [0, 100].
    pub threshold: f64,
    /// Evaluate on the rayon pool; otherwise on the calling thread.
    pub parallel: bool,
}

impl SearchConfig {
    pub const fn standard() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel: true,
        }
    }

    pub const fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            parallel: true,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.threshold.is_finite() {
            return Err("threshold must be finite");
        }
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err("threshold must be in [0, 100]");
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// One retained configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Global enumeration index.
    pub ordinal: usize,
    pub scenario: String,
    pub configuration: Configuration,
    pub evaluation: Evaluation,
}

impl SearchResult {
    pub fn balance(&self) -> f64 {
        self.evaluation.balance
    }

    pub fn passes(&self) -> bool {
        self.evaluation.passes
    }

    /// Output order: balance descending, then ordinal ascending.
    pub fn output_order(a: &Self, b: &Self) -> Ordering {
        b.evaluation
            .balance
            .total_cmp(&a.evaluation.balance)
            .then(a.ordinal.cmp(&b.ordinal))
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Configurations enumerated.
    pub enumerated: usize,
    /// Configurations whose evaluation failed.
    pub rejected: usize,
    /// Configurations at or above the threshold.
    pub retained: usize,
    /// Retained configurations whose checks all pass.
    pub passing: usize,
}

impl SearchStats {
    pub fn merge(self, other: Self) -> Self {
        Self {
            enumerated: self.enumerated + other.enumerated,
            rejected: self.rejected + other.rejected,
            retained: self.retained + other.retained,
            passing: self.passing + other.passing,
        }
    }
}

/// Sorted results plus counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub stats: SearchStats,
}
