//! Numerical vs analytical cross-validation.

use tula_geometry::{OrbitalPlane, angular_distance_deg};
use tula_model::{BodyTable, NodeProvenance};

use crate::analytical::solve_analytical;
use crate::error::NodeError;
use crate::node_types::{CrossCheck, GridSearchConfig, NodeProblem};
use crate::numerical::solve_numerical;

/// Run both solvers on one problem; `guess` seeds the grid and is the
/// analytical hint.
pub fn cross_validate(
    problem: &NodeProblem,
    guess_deg: f64,
    config: &GridSearchConfig,
) -> Result<CrossCheck, NodeError> {
    let numerical = solve_numerical(problem, guess_deg, config)?;
    let analytical = solve_analytical(problem, Some(guess_deg))?;
    let node_difference_deg = analytical
        .chosen()
        .map(|node| angular_distance_deg(node, numerical.node_deg));
    if let Some(diff) = node_difference_deg {
        tracing::debug!(
            numerical = numerical.node_deg,
            diff_deg = diff,
            "cross-check"
        );
    }
    Ok(CrossCheck {
        problem: *problem,
        starting_guess_deg: guess_deg,
        numerical,
        analytical,
        node_difference_deg,
    })
}

/// Pose the node problem for `body_name` against the table's reference body.
///
/// The target is the body's recorded apparent inclination (zero for the
/// reference body itself). The starting guess is its original-reference node,
/// falling back to the preferred node.
pub fn body_problem(table: &BodyTable, body_name: &str) -> Result<(NodeProblem, f64), NodeError> {
    let index = table.index_of(body_name)?;
    let body = &table.bodies()[index];
    let reference = table.reference();
    let target = if index == table.reference_index() {
        body.apparent_inclination_deg.unwrap_or(0.0)
    } else {
        body.apparent_inclination_deg
            .ok_or_else(|| NodeError::MissingInput {
                body: body.name.clone(),
                field: "apparent inclination",
            })?
    };
    let guess = body
        .node(NodeProvenance::OriginalReference)
        .unwrap_or_else(|| body.preferred_node_deg());
    let problem = NodeProblem::new(
        body.inclination_deg,
        OrbitalPlane::new(reference.inclination_deg, reference.preferred_node_deg()),
        target,
    );
    Ok((problem, guess))
}

/// Cross-validate the node of one body from the table.
pub fn solve_body_node(
    table: &BodyTable,
    body_name: &str,
    config: &GridSearchConfig,
) -> Result<CrossCheck, NodeError> {
    let (problem, guess) = body_problem(table, body_name)?;
    cross_validate(&problem, guess, config)
}
