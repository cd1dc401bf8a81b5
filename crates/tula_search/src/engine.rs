//! Search driver: enumerate, evaluate, filter, sort.
//!
//! Evaluation is index-based: every global ordinal maps to exactly one
//! configuration through [`SearchSpace::configuration_at_ordinal`], so the
//! parallel and sequential paths visit the same candidates and `collect`
//! keeps them in ordinal order. Output is bit-identical across both paths.

use std::ops::Range;

use rayon::prelude::*;
use tula_model::BalanceModel;

use crate::engine_types::{SearchConfig, SearchOutcome, SearchPhase, SearchResult, SearchStats};
use crate::error::SearchError;
use crate::space::{DEFAULT_SCENARIO_TAG, SearchSpace};

/// Runs one search space through a balance model.
#[derive(Debug)]
pub struct SearchEngine<'a> {
    model: BalanceModel<'a>,
    space: &'a SearchSpace,
    config: SearchConfig,
    phase: SearchPhase,
}

impl<'a> SearchEngine<'a> {
    pub fn new(
        model: BalanceModel<'a>,
        space: &'a SearchSpace,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        if space.body_count() != model.table().len() {
            return Err(SearchError::InvalidSpace(format!(
                "space covers {} bodies, table has {}",
                space.body_count(),
                model.table().len()
            )));
        }
        Ok(Self {
            model,
            space,
            config,
            phase: SearchPhase::Idle,
        })
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn space(&self) -> &'a SearchSpace {
        self.space
    }

    /// Search every slice.
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        self.run_range(0..self.space.total_len())
    }

    /// Search one scenario slice. Ordinals stay global, so slice outcomes
    /// can be combined with [`merge_partitions`].
    pub fn run_slice(&mut self, slice: usize) -> Result<SearchOutcome, SearchError> {
        let range = self
            .space
            .slice_range(slice)
            .ok_or_else(|| SearchError::InvalidSpace(format!("slice {slice} out of range")))?;
        self.run_range(range)
    }

    fn advance(&mut self, next: SearchPhase) {
        tracing::debug!(from = %self.phase, to = %next, "search phase");
        self.phase = next;
    }

    fn run_range(&mut self, ordinals: Range<usize>) -> Result<SearchOutcome, SearchError> {
        self.phase = SearchPhase::Idle;
        self.advance(SearchPhase::Enumerating);
        let enumerated = ordinals.len();
        tracing::info!(
            configurations = enumerated,
            slices = self.space.slice_count(),
            parallel = self.config.parallel,
            "searching"
        );

        self.advance(SearchPhase::Evaluating);
        let scores = self.scores(ordinals.clone());

        self.advance(SearchPhase::Filtering);
        let rejected_scores = scores.iter().filter(|s| s.is_none()).count();
        let threshold = self.config.threshold;
        let kept: Vec<usize> = ordinals
            .zip(&scores)
            .filter_map(|(ord, score)| score.filter(|&b| b >= threshold).map(|_| ord))
            .collect();
        let detailed = self.details(&kept);
        let rejected_details = detailed.iter().filter(|r| r.is_none()).count();
        let mut results: Vec<SearchResult> = detailed.into_iter().flatten().collect();

        self.advance(SearchPhase::Sorted);
        sort_results(&mut results);

        let stats = SearchStats {
            enumerated,
            rejected: rejected_scores + rejected_details,
            retained: results.len(),
            passing: results.iter().filter(|r| r.passes()).count(),
        };
        self.advance(SearchPhase::Done);
        tracing::info!(
            retained = stats.retained,
            passing = stats.passing,
            rejected = stats.rejected,
            "search complete"
        );
        Ok(SearchOutcome { results, stats })
    }

    /// Balance score per ordinal; `None` where evaluation failed.
    fn scores(&self, ordinals: Range<usize>) -> Vec<Option<f64>> {
        let score = |ord: usize| self.score(ord);
        if self.config.parallel {
            ordinals.into_par_iter().map(score).collect()
        } else {
            ordinals.map(score).collect()
        }
    }

    fn score(&self, ordinal: usize) -> Option<f64> {
        let configuration = self.space.configuration_at_ordinal(ordinal).ok()?;
        match self.model.balance(&configuration) {
            Ok(balance) => Some(balance),
            Err(e) => {
                tracing::debug!(ordinal, error = %e, "configuration rejected");
                None
            }
        }
    }

    /// Full evaluation of the retained ordinals, in input order.
    fn details(&self, ordinals: &[usize]) -> Vec<Option<SearchResult>> {
        let detail = |&ord: &usize| self.detail(ord);
        if self.config.parallel {
            ordinals.par_iter().map(detail).collect()
        } else {
            ordinals.iter().map(detail).collect()
        }
    }

    fn detail(&self, ordinal: usize) -> Option<SearchResult> {
        let (slice, index) = self.space.locate(ordinal)?;
        let configuration = self.space.configuration_at(slice, index).ok()?;
        let evaluation = self.model.evaluate(&configuration).ok()?;
        let scenario = self
            .space
            .scenario_tag(slice)
            .unwrap_or(DEFAULT_SCENARIO_TAG)
            .to_string();
        Some(SearchResult {
            ordinal,
            scenario,
            configuration,
            evaluation,
        })
    }
}

/// Balance descending, ordinal ascending.
pub fn sort_results(results: &mut [SearchResult]) {
    results.sort_by(SearchResult::output_order);
}

/// Combine outcomes of independently searched slices of one space.
///
/// The result equals a single [`SearchEngine::run`] over the union.
pub fn merge_partitions<I>(parts: I) -> SearchOutcome
where
    I: IntoIterator<Item = SearchOutcome>,
{
    let mut merged = SearchOutcome::default();
    for part in parts {
        merged.results.extend(part.results);
        merged.stats = merged.stats.merge(part.stats);
    }
    sort_results(&mut merged.results);
    merged
}
