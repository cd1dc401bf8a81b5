//! Error types for study loading.

use std::error::Error;
use std::fmt::{Display, Formatter};

use tula_model::ModelError;
use tula_search::SearchError;

/// Errors from reading, parsing, or resolving a study file.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// File could not be read.
    Io(String),
    /// File is not valid TOML or does not match the study schema.
    Parse(String),
    /// Body table or model constants are invalid.
    Model(ModelError),
    /// Search section is invalid.
    Search(SearchError),
    /// Cross-reference problem (unknown body, missing section, ...).
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "cannot read study: {msg}"),
            Self::Parse(msg) => write!(f, "cannot parse study: {msg}"),
            Self::Model(e) => write!(f, "{e}"),
            Self::Search(e) => write!(f, "{e}"),
            Self::Invalid(msg) => write!(f, "invalid study: {msg}"),
        }
    }
}

impl Error for ConfigError {}

impl From<ModelError> for ConfigError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<SearchError> for ConfigError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
