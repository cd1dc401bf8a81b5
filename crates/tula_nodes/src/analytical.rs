//! Closed-form inversion of the apparent-inclination relation.
//!
//! For planes `(i_p, Ω_p)` and `(i_e, Ω_e)`:
//!
//! ```text
//! cos(i_app) = cos i_p cos i_e + sin i_p sin i_e cos(Ω_p - Ω_e)
//! ```
//!
//! so `Ω_p = Ω_e ± acos(ratio)` with
//! `ratio = (cos i_app - cos i_p cos i_e) / (sin i_p sin i_e)`.

use tula_geometry::{angular_distance_deg, normalize_deg};

use crate::error::NodeError;
use crate::node_types::{AnalyticalOutcome, AnalyticalSolution, COS_RATIO_LIMIT, NodeProblem};

/// Raw cosine ratio; non-finite when either plane has zero inclination.
pub fn cos_ratio(problem: &NodeProblem) -> f64 {
    let ip = problem.planet_inclination_deg.to_radians();
    let ie = problem.reference.inclination_deg.to_radians();
    let target = problem.target_apparent_deg.to_radians();
    (target.cos() - ip.cos() * ie.cos()) / (ip.sin() * ie.sin())
}

/// Solve for the ascending node in closed form.
///
/// Both candidates are always reported. With a `hint`, `chosen` is the
/// candidate at the smaller wrapped distance from it; an exact tie keeps the
/// first (`ref + delta`). Without a hint `chosen` is `None`.
pub fn solve_analytical(
    problem: &NodeProblem,
    hint_deg: Option<f64>,
) -> Result<AnalyticalOutcome, NodeError> {
    problem.validate().map_err(NodeError::InvalidProblem)?;
    if hint_deg.is_some_and(|h| !h.is_finite()) {
        return Err(NodeError::InvalidProblem("hint must be finite"));
    }

    let raw = cos_ratio(problem);
    if !raw.is_finite() || raw.abs() > COS_RATIO_LIMIT {
        tracing::warn!(
            cos_ratio = raw,
            inclination = problem.planet_inclination_deg,
            target = problem.target_apparent_deg,
            "no node reaches the target apparent inclination"
        );
        return Ok(AnalyticalOutcome::NoSolution { cos_ratio: raw });
    }

    let ratio = raw.clamp(-1.0, 1.0);
    let delta = ratio.acos().to_degrees();
    let reference_node = problem.reference.node_deg;
    let candidates = [
        normalize_deg(reference_node + delta),
        normalize_deg(reference_node - delta),
    ];
    let chosen = hint_deg.map(|hint| {
        let d0 = angular_distance_deg(candidates[0], hint);
        let d1 = angular_distance_deg(candidates[1], hint);
        if d1 < d0 { candidates[1] } else { candidates[0] }
    });
    tracing::debug!(ratio, delta, ?candidates, ?chosen, "analytical node");

    Ok(AnalyticalOutcome::Solved(AnalyticalSolution {
        cos_ratio: ratio,
        delta_node_deg: delta,
        candidates,
        chosen,
    }))
}
