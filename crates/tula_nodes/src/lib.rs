//! Ascending-node solver.
//!
//! Given a planet's inclination to the reference plane, a second body's
//! plane, and the apparent inclination observed between them, recover the
//! planet's ascending node. Two independent methods are provided:
//! - a two-phase grid search ([`solve_numerical`])
//! - the closed-form spherical solution ([`solve_analytical`])
//!
//! [`cross_validate`] runs both and reports their disagreement.

pub mod analytical;
pub mod cross_check;
pub mod error;
pub mod node_types;
pub mod numerical;

pub use analytical::{cos_ratio, solve_analytical};
pub use cross_check::{body_problem, cross_validate, solve_body_node};
pub use error::NodeError;
pub use node_types::{
    ARCSEC_PER_DEG, AnalyticalOutcome, AnalyticalSolution, COS_RATIO_LIMIT, CrossCheck,
    GridSearchConfig, MAX_HALF_WINDOW_STEPS, NodeProblem, NumericalSolution,
};
pub use numerical::solve_numerical;
