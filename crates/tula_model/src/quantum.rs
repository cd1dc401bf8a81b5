//! Positive rational quantum numbers.
//!
//! A quantum number scales a body's oscillation amplitude as `1/d`.
//! Both parts are at least 1, so `d > 0` holds by construction and a
//! zero quantum number can never reach the amplitude formula.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

/// Positive rational `numerator / denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantumNumber {
    numerator: u32,
    denominator: u32,
}

impl QuantumNumber {
    /// Build `numerator / denominator`, rejecting zero in either part.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, ModelError> {
        if numerator == 0 {
            return Err(ModelError::InvalidQuantum(format!(
                "{numerator}/{denominator}: must be positive"
            )));
        }
        if denominator == 0 {
            return Err(ModelError::InvalidQuantum(format!(
                "{numerator}/0: zero denominator"
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Whole quantum number `n`.
    pub fn integer(n: u32) -> Result<Self, ModelError> {
        Self::new(n, 1)
    }

    pub const fn numerator(self) -> u32 {
        self.numerator
    }

    pub const fn denominator(self) -> u32 {
        self.denominator
    }

    /// Value as a float; always finite and > 0.
    pub fn value(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl Display for QuantumNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for QuantumNumber {
    type Err = ModelError;

    /// Parse `"5"` or `"3/2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| ModelError::InvalidQuantum(format!("cannot parse {s:?}")))
        };
        match s.split_once('/') {
            Some((n, d)) => Self::new(parse(n)?, parse(d)?),
            None => Self::integer(parse(s)?),
        }
    }
}

impl Serialize for QuantumNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct QuantumVisitor;

impl Visitor<'_> for QuantumVisitor {
    type Value = QuantumNumber;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a positive integer or a \"n/d\" string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let n = u32::try_from(v).map_err(E::custom)?;
        QuantumNumber::integer(n).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        let n = u32::try_from(v)
            .map_err(|_| E::custom(format!("invalid quantum number: {v} must be positive")))?;
        QuantumNumber::integer(n).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for QuantumNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuantumVisitor)
    }
}
