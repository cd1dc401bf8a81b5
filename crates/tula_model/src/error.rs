//! Error types for the body table and balance model.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from body validation, model construction, or evaluation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ModelError {
    /// Quantum number is zero, malformed, or has a zero denominator.
    InvalidQuantum(String),
    /// A body's physical or geometric constants are out of range.
    InvalidBody { name: String, reason: &'static str },
    /// Model constants failed validation.
    InvalidConstants(&'static str),
    /// Table-level problem (duplicate names, empty table, ...).
    InvalidTable(String),
    /// No body with the given name.
    UnknownBody(String),
    /// Configuration does not carry one assignment per body.
    ConfigurationMismatch { expected: usize, actual: usize },
    /// Total weighted amplitude is zero or non-finite.
    DegenerateBalance,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuantum(msg) => write!(f, "invalid quantum number: {msg}"),
            Self::InvalidBody { name, reason } => write!(f, "invalid body {name}: {reason}"),
            Self::InvalidConstants(msg) => write!(f, "invalid model constants: {msg}"),
            Self::InvalidTable(msg) => write!(f, "invalid body table: {msg}"),
            Self::UnknownBody(name) => write!(f, "unknown body: {name}"),
            Self::ConfigurationMismatch { expected, actual } => write!(
                f,
                "configuration has {actual} assignments, table has {expected} bodies"
            ),
            Self::DegenerateBalance => write!(f, "total weighted amplitude is degenerate"),
        }
    }
}

impl Error for ModelError {}
