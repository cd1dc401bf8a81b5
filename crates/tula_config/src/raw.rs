//! On-disk schema. Resolved into validated model types by [`crate::Study`].

use serde::Deserialize;
use tula_model::QuantumNumber;

const fn default_true() -> bool {
    true
}

const fn default_threshold() -> f64 {
    tula_search::DEFAULT_THRESHOLD
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawStudy {
    pub reference: String,
    #[serde(default)]
    pub model: RawModel,
    pub bodies: Vec<RawBody>,
    pub search: Option<RawSearch>,
}

/// Omitted constants take their standard values.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawModel {
    pub amplitude_constant: Option<f64>,
    pub phase_angles_deg: Option<[f64; 2]>,
    pub trend_half_span_years: Option<f64>,
    pub range_tolerance_deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawBody {
    pub name: String,
    pub mass_ratio: f64,
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub nodes: Vec<RawNode>,
    pub precession_period_yr: f64,
    /// `[min, max]` in degrees.
    pub bounds: [f64; 2],
    pub trend: String,
    pub apparent_inclination_deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawNode {
    pub provenance: String,
    pub node_deg: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawSearch {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Strings (`"3/2"`) or integers.
    pub quantum_numbers: Vec<QuantumNumber>,
    pub varying: Vec<String>,
    pub canonical: RawAssignment,
    pub distinguished: Option<[String; 2]>,
    #[serde(default)]
    pub scenarios: Vec<RawScenario>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawAssignment {
    pub quantum: QuantumNumber,
    /// `primary`/`opposed` or `0`/`1`.
    pub phase: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawScenario {
    pub name: String,
    /// Assignments of the two distinguished bodies, in `distinguished` order.
    pub assignments: [RawAssignment; 2],
}
