//! Error types for the search engine.

use std::error::Error;
use std::fmt::{Display, Formatter};

use tula_model::ModelError;

/// Errors from search setup. Per-configuration evaluation failures are
/// counted in [`crate::SearchStats`], not returned.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// Search configuration failed validation.
    InvalidConfig(&'static str),
    /// Search space is inconsistent with the body table.
    InvalidSpace(String),
    /// No scenario with the given name.
    UnknownScenario(String),
    /// Error from the model layer.
    Model(ModelError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid search config: {msg}"),
            Self::InvalidSpace(msg) => write!(f, "invalid search space: {msg}"),
            Self::UnknownScenario(name) => write!(f, "unknown scenario: {name}"),
            Self::Model(e) => write!(f, "model error: {e}"),
        }
    }
}

impl Error for SearchError {}

impl From<ModelError> for SearchError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}
