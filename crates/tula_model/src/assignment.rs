//! Per-body discrete assignments and whole-table configurations.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;
use crate::quantum::QuantumNumber;

/// One of the two allowed phase angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhaseChoice {
    Primary,
    Opposed,
}

/// Both phase choices in enumeration order.
pub const ALL_PHASES: [PhaseChoice; 2] = [PhaseChoice::Primary, PhaseChoice::Opposed];

impl PhaseChoice {
    /// 0 for primary, 1 for opposed.
    pub const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Opposed => 1,
        }
    }

    pub fn from_index(index: usize) -> Result<Self, ModelError> {
        ALL_PHASES
            .get(index)
            .copied()
            .ok_or_else(|| ModelError::InvalidTable(format!("phase index {index} out of range")))
    }
}

impl FromStr for PhaseChoice {
    type Err = ModelError;

    /// Accepts `primary`/`0` and `opposed`/`1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "primary" | "0" => Ok(Self::Primary),
            "opposed" | "1" => Ok(Self::Opposed),
            other => Err(ModelError::InvalidTable(format!("unknown phase choice: {other}"))),
        }
    }
}

/// Quantum number and phase for one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub quantum: QuantumNumber,
    pub phase: PhaseChoice,
}

impl Assignment {
    pub const fn new(quantum: QuantumNumber, phase: PhaseChoice) -> Self {
        Self { quantum, phase }
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.quantum, self.phase.index())
    }
}

/// One assignment per body, in body-table order.
///
/// Equality and hashing are by value, so a configuration can key a cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration(Vec<Assignment>);

impl Configuration {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self(assignments)
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, body_index: usize) -> Option<&Assignment> {
        self.0.get(body_index)
    }
}

impl From<Vec<Assignment>> for Configuration {
    fn from(assignments: Vec<Assignment>) -> Self {
        Self(assignments)
    }
}
