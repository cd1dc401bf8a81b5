//! Error types for the ascending-node solver.

use std::error::Error;
use std::fmt::{Display, Formatter};

use tula_model::ModelError;

/// Errors from solver setup. Infeasible geometry is not an error; see
/// [`crate::AnalyticalOutcome::NoSolution`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum NodeError {
    /// Grid-search configuration failed validation.
    InvalidConfig(&'static str),
    /// Problem inputs are non-finite.
    InvalidProblem(&'static str),
    /// A body lacks data needed to pose the problem.
    MissingInput { body: String, field: &'static str },
    /// Error from the body table.
    Model(ModelError),
}

impl Display for NodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidProblem(msg) => write!(f, "invalid problem: {msg}"),
            Self::MissingInput { body, field } => write!(f, "{body} has no {field}"),
            Self::Model(e) => write!(f, "model error: {e}"),
        }
    }
}

impl Error for NodeError {}

impl From<ModelError> for NodeError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}
