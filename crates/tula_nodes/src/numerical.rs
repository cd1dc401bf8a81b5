//! Two-phase grid search for the ascending node.
//!
//! Phase 1 scans a wide window around the starting guess at a coarse step;
//! phase 2 rescans a narrow window around the phase-1 winner at a fine step.
//! The objective is `|apparent(node) - target|`. Candidates are generated
//! from integer step counts so the grid does not drift, and every candidate
//! is wrapped into [0, 360). On equal objective values the first candidate
//! scanned is kept.

use tula_geometry::{normalize_deg, normalize_to_pm180};

use crate::error::NodeError;
use crate::node_types::{ARCSEC_PER_DEG, GridSearchConfig, NodeProblem, NumericalSolution};

/// Best node on the grid `center + k * step`, `|k * step| <= half_window`.
///
/// Returns `(node_deg, objective)`.
fn scan(problem: &NodeProblem, center_deg: f64, half_window_deg: f64, step_deg: f64) -> (f64, f64) {
    let steps = (half_window_deg / step_deg).round() as i64;
    let mut best_node = normalize_deg(center_deg);
    let mut best_err = f64::INFINITY;
    for k in -steps..=steps {
        let node = normalize_deg(center_deg + k as f64 * step_deg);
        let err = (problem.apparent_for(node) - problem.target_apparent_deg).abs();
        if err < best_err {
            best_err = err;
            best_node = node;
        }
    }
    (best_node, best_err)
}

/// Solve for the ascending node by two-phase grid search.
pub fn solve_numerical(
    problem: &NodeProblem,
    starting_guess_deg: f64,
    config: &GridSearchConfig,
) -> Result<NumericalSolution, NodeError> {
    config.validate().map_err(NodeError::InvalidConfig)?;
    problem.validate().map_err(NodeError::InvalidProblem)?;
    if !starting_guess_deg.is_finite() {
        return Err(NodeError::InvalidProblem("starting guess must be finite"));
    }

    let (coarse_node, coarse_err) = scan(
        problem,
        starting_guess_deg,
        config.coarse_half_window_deg,
        config.coarse_step_deg,
    );
    tracing::debug!(node = coarse_node, error_deg = coarse_err, "coarse scan winner");

    let (node_deg, fine_err) = scan(
        problem,
        coarse_node,
        config.fine_half_window_deg,
        config.fine_step_deg,
    );
    tracing::debug!(node = node_deg, error_deg = fine_err, "fine scan winner");

    let apparent = problem.apparent_for(node_deg);
    let error_deg = apparent - problem.target_apparent_deg;
    Ok(NumericalSolution {
        node_deg,
        apparent_inclination_deg: apparent,
        error_deg,
        error_arcsec: error_deg.abs() * ARCSEC_PER_DEG,
        delta_from_guess_deg: normalize_to_pm180(node_deg - starting_guess_deg),
    })
}
