//! Celestial body reference data.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Where an ascending-node value came from.
///
/// Ordered by trust: a later variant supersedes an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeProvenance {
    /// Published reference value; also the solver's starting guess.
    OriginalReference,
    /// Output of the numerical grid search.
    NumericallyOptimized,
    /// Output of the closed-form spherical solution.
    AnalyticallyDerived,
    /// Numerical and analytical solutions agree.
    Verified,
}

/// All provenances, lowest trust first.
pub const ALL_PROVENANCES: [NodeProvenance; 4] = [
    NodeProvenance::OriginalReference,
    NodeProvenance::NumericallyOptimized,
    NodeProvenance::AnalyticallyDerived,
    NodeProvenance::Verified,
];

impl NodeProvenance {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OriginalReference => "original-reference",
            Self::NumericallyOptimized => "numerically-optimized",
            Self::AnalyticallyDerived => "analytically-derived",
            Self::Verified => "verified",
        }
    }
}

impl Display for NodeProvenance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NodeProvenance {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PROVENANCES
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| ModelError::InvalidTable(format!("unknown node provenance: {s}")))
    }
}

/// One ascending-node value with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeVariant {
    pub provenance: NodeProvenance,
    /// Ascending node on the invariable plane in degrees.
    pub node_deg: f64,
}

/// Independently known inclination range (secular theory), degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclinationBounds {
    pub min_deg: f64,
    pub max_deg: f64,
}

/// Observed long-term direction of a body's apparent inclination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Increasing,
    Decreasing,
}

impl Trend {
    pub const fn sign(self) -> f64 {
        match self {
            Self::Increasing => 1.0,
            Self::Decreasing => -1.0,
        }
    }

    /// Whether a signed change points the same way. Zero matches neither.
    pub fn matches(self, change: f64) -> bool {
        change * self.sign() > 0.0
    }
}

impl FromStr for Trend {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increasing" | "+" | "+1" => Ok(Self::Increasing),
            "decreasing" | "-" | "-1" => Ok(Self::Decreasing),
            _ => Err(ModelError::InvalidTable(format!("unknown trend: {s}"))),
        }
    }
}

/// Immutable reference data for one body.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    /// Mass as a fraction of the central body's mass.
    pub mass_ratio: f64,
    /// Semi-major axis in AU.
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    /// Inclination to the invariable plane in degrees.
    pub inclination_deg: f64,
    /// Ascending-node variants; at least one.
    pub nodes: Vec<NodeVariant>,
    /// Node precession period in years. Negative means retrograde.
    pub precession_period_yr: f64,
    pub bounds: InclinationBounds,
    pub trend: Trend,
    /// Observed inclination relative to the reference body's plane, if known.
    pub apparent_inclination_deg: Option<f64>,
}

impl Body {
    /// Node variant with the given provenance, if present.
    pub fn node(&self, provenance: NodeProvenance) -> Option<f64> {
        self.nodes
            .iter()
            .find(|v| v.provenance == provenance)
            .map(|v| v.node_deg)
    }

    /// Most trusted node value. Falls back to 0 only for an unvalidated body.
    pub fn preferred_node_deg(&self) -> f64 {
        self.nodes
            .iter()
            .max_by_key(|v| v.provenance)
            .map(|v| v.node_deg)
            .unwrap_or(0.0)
    }

    /// Orbital angular-momentum weight `m * sqrt(a * (1 - e^2))`.
    pub fn angular_momentum_weight(&self) -> f64 {
        let e = self.eccentricity;
        self.mass_ratio * (self.semi_major_axis_au * (1.0 - e * e)).sqrt()
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        let invalid = |reason| {
            Err(ModelError::InvalidBody {
                name: self.name.clone(),
                reason,
            })
        };
        if self.name.trim().is_empty() {
            return invalid("name must not be empty");
        }
        if !self.mass_ratio.is_finite() || self.mass_ratio <= 0.0 {
            return invalid("mass_ratio must be positive");
        }
        if !self.semi_major_axis_au.is_finite() || self.semi_major_axis_au <= 0.0 {
            return invalid("semi_major_axis_au must be positive");
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return invalid("eccentricity must be in [0, 1)");
        }
        if !self.inclination_deg.is_finite() {
            return invalid("inclination_deg must be finite");
        }
        if self.nodes.is_empty() {
            return invalid("at least one ascending node is required");
        }
        if self.nodes.iter().any(|v| !v.node_deg.is_finite()) {
            return invalid("node values must be finite");
        }
        for (i, v) in self.nodes.iter().enumerate() {
            if self.nodes[..i].iter().any(|w| w.provenance == v.provenance) {
                return invalid("duplicate node provenance");
            }
        }
        if !self.precession_period_yr.is_finite() || self.precession_period_yr == 0.0 {
            return invalid("precession_period_yr must be finite and non-zero");
        }
        let b = self.bounds;
        if !b.min_deg.is_finite() || !b.max_deg.is_finite() || b.min_deg > b.max_deg {
            return invalid("bounds must be finite with min <= max");
        }
        if self.apparent_inclination_deg.is_some_and(|a| !a.is_finite()) {
            return invalid("apparent_inclination_deg must be finite");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Body {
        Body {
            name: "Sample".into(),
            mass_ratio: 1e-6,
            semi_major_axis_au: 4.0,
            eccentricity: 0.6,
            inclination_deg: 2.0,
            nodes: vec![
                NodeVariant {
                    provenance: NodeProvenance::OriginalReference,
                    node_deg: 10.0,
                },
                NodeVariant {
                    provenance: NodeProvenance::Verified,
                    node_deg: 11.5,
                },
                NodeVariant {
                    provenance: NodeProvenance::NumericallyOptimized,
                    node_deg: 11.4,
                },
            ],
            precession_period_yr: -50_000.0,
            bounds: InclinationBounds {
                min_deg: 0.5,
                max_deg: 3.0,
            },
            trend: Trend::Increasing,
            apparent_inclination_deg: None,
        }
    }

    #[test]
    fn preferred_node_is_most_trusted() {
        let b = sample();
        assert_eq!(b.preferred_node_deg(), 11.5);
        assert_eq!(b.node(NodeProvenance::OriginalReference), Some(10.0));
        assert_eq!(b.node(NodeProvenance::AnalyticallyDerived), None);
    }

    #[test]
    fn angular_momentum_weight_formula() {
        // 1e-6 * sqrt(4 * (1 - 0.36)) = 1e-6 * 1.6
        let w = sample().angular_momentum_weight();
        assert!((w - 1.6e-6).abs() < 1e-18);
    }

    #[test]
    fn validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut b = sample();
        b.eccentricity = 1.0;
        assert!(b.validate().is_err());

        let mut b = sample();
        b.mass_ratio = 0.0;
        assert!(b.validate().is_err());

        let mut b = sample();
        b.precession_period_yr = 0.0;
        assert!(b.validate().is_err());

        let mut b = sample();
        b.nodes.clear();
        assert!(b.validate().is_err());

        let mut b = sample();
        b.bounds.min_deg = 5.0;
        assert!(b.validate().is_err());

        let mut b = sample();
        b.nodes.push(NodeVariant {
            provenance: NodeProvenance::Verified,
            node_deg: 12.0,
        });
        assert!(b.validate().is_err());
    }

    #[test]
    fn provenance_labels_roundtrip() {
        for p in ALL_PROVENANCES {
            assert_eq!(p.label().parse::<NodeProvenance>().unwrap(), p);
        }
        assert!("guess".parse::<NodeProvenance>().is_err());
    }

    #[test]
    fn trend_zero_change_matches_neither() {
        assert!(Trend::Increasing.matches(0.1));
        assert!(!Trend::Increasing.matches(-0.1));
        assert!(Trend::Decreasing.matches(-1e-9));
        assert!(!Trend::Increasing.matches(0.0));
        assert!(!Trend::Decreasing.matches(0.0));
    }
}
