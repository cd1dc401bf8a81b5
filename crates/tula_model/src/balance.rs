//! Inclination-oscillation model and vector balance.
//!
//! Each body's inclination to the invariable plane is modelled as a cosine
//! oscillation whose amplitude is set by the body's quantum number and mass,
//! and whose phase is set by the angle between the body's ascending node and
//! its assigned phase angle. Three things are derived from a configuration:
//!
//! - **Range fit**: `[mean - amp, mean + amp]` must sit inside the body's
//!   secular bounds (with a small absolute tolerance).
//! - **Trend**: the apparent inclination against the reference body's own
//!   oscillating plane must move in the observed direction across two epochs
//!   symmetric about the reference epoch.
//! - **Balance**: phase-weighted amplitudes, scaled by orbital angular
//!   momentum, are summed as 2-D vectors. 100 means they cancel exactly.

use tula_geometry::{OrbitalPlane, normalize_deg};

use crate::assignment::{Assignment, Configuration};
use crate::body::Body;
use crate::constants::ModelConstants;
use crate::error::ModelError;
use crate::quantum::QuantumNumber;
use crate::table::BodyTable;

/// Oscillation amplitude `K / (d * sqrt(mass))` in degrees.
pub fn oscillation_amplitude_deg(
    amplitude_constant: f64,
    quantum: QuantumNumber,
    mass_ratio: f64,
) -> f64 {
    amplitude_constant / (quantum.value() * mass_ratio.sqrt())
}

/// Closed inclination interval in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclinationRange {
    pub min_deg: f64,
    pub max_deg: f64,
}

/// One body's oscillation under one assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub amplitude_deg: f64,
    pub mean_deg: f64,
    /// Assigned phase angle in degrees.
    pub phase_deg: f64,
    /// Ascending node at the reference epoch.
    pub node_deg: f64,
    pub precession_period_yr: f64,
}

impl Oscillation {
    pub fn range(&self) -> InclinationRange {
        InclinationRange {
            min_deg: self.mean_deg - self.amplitude_deg,
            max_deg: self.mean_deg + self.amplitude_deg,
        }
    }

    /// Unwrapped node `years` after the reference epoch.
    fn node_advance_deg(&self, years: f64) -> f64 {
        self.node_deg + 360.0 * years / self.precession_period_yr
    }

    /// Ascending node in [0, 360) `years` after the reference epoch.
    pub fn node_at(&self, years: f64) -> f64 {
        normalize_deg(self.node_advance_deg(years))
    }

    /// Inclination `years` after the reference epoch.
    ///
    /// The oscillation phase advances with the node, so at `years = 0` this
    /// reproduces the body's reference inclination.
    pub fn inclination_at(&self, years: f64) -> f64 {
        let phase = (self.node_advance_deg(years) - self.phase_deg).to_radians();
        self.mean_deg + self.amplitude_deg * phase.cos()
    }

    pub fn plane_at(&self, years: f64) -> OrbitalPlane {
        OrbitalPlane::new(self.inclination_at(years), self.node_at(years))
    }
}

/// Per-body outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCheck {
    pub range_fit: bool,
    /// `None` for the reference body, whose trend is not checked.
    pub trend_match: Option<bool>,
    pub oscillation: Oscillation,
}

impl BodyCheck {
    pub fn passes(&self) -> bool {
        self.range_fit && self.trend_match.unwrap_or(true)
    }
}

/// Result of evaluating one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Balance score in [0, 100].
    pub balance: f64,
    /// One check per body, in table order.
    pub checks: Vec<BodyCheck>,
    /// AND of every body's checks.
    pub passes: bool,
}

/// Evaluates configurations against a fixed body table and constants.
///
/// Holds only shared references and copies of constants; evaluation is a
/// pure function, so one model can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct BalanceModel<'a> {
    table: &'a BodyTable,
    constants: ModelConstants,
}

impl<'a> BalanceModel<'a> {
    pub fn new(table: &'a BodyTable, constants: &ModelConstants) -> Result<Self, ModelError> {
        constants.validate()?;
        tracing::debug!(
            bodies = table.len(),
            reference = %table.reference().name,
            "balance model ready"
        );
        Ok(Self {
            table,
            constants: *constants,
        })
    }

    pub fn table(&self) -> &'a BodyTable {
        self.table
    }

    pub fn constants(&self) -> &ModelConstants {
        &self.constants
    }

    /// Oscillation of `body` under `assignment`.
    pub fn oscillation(&self, body: &Body, assignment: Assignment) -> Oscillation {
        let amplitude_deg = oscillation_amplitude_deg(
            self.constants.amplitude_constant,
            assignment.quantum,
            body.mass_ratio,
        );
        let phase_deg = self.constants.phase_deg(assignment.phase);
        let node_deg = body.preferred_node_deg();
        let mean_deg =
            body.inclination_deg - amplitude_deg * (node_deg - phase_deg).to_radians().cos();
        Oscillation {
            amplitude_deg,
            mean_deg,
            phase_deg,
            node_deg,
            precession_period_yr: body.precession_period_yr,
        }
    }

    /// Whether the oscillation range lies inside the body's bounds.
    pub fn range_fits(&self, body: &Body, oscillation: &Oscillation) -> bool {
        let tol = self.constants.range_tolerance_deg;
        let range = oscillation.range();
        range.min_deg >= body.bounds.min_deg - tol && range.max_deg <= body.bounds.max_deg + tol
    }

    /// Trend check for one body; `None` for the reference body.
    pub fn trend_matches(
        &self,
        body_index: usize,
        configuration: &Configuration,
    ) -> Result<Option<bool>, ModelError> {
        let oscillations = self.oscillations(configuration)?;
        let body = self
            .table
            .get(body_index)
            .ok_or_else(|| ModelError::UnknownBody(format!("index {body_index}")))?;
        if body_index == self.table.reference_index() {
            return Ok(None);
        }
        let reference_planes = self.reference_planes(&oscillations[self.table.reference_index()]);
        let change = self.apparent_change(&oscillations[body_index], &reference_planes);
        Ok(Some(body.trend.matches(change)))
    }

    /// Balance score of a configuration, in [0, 100].
    pub fn balance(&self, configuration: &Configuration) -> Result<f64, ModelError> {
        let oscillations = self.oscillations(configuration)?;
        self.vector_balance(&oscillations)
    }

    /// Full evaluation: balance plus per-body range and trend checks.
    pub fn evaluate(&self, configuration: &Configuration) -> Result<Evaluation, ModelError> {
        let oscillations = self.oscillations(configuration)?;
        let balance = self.vector_balance(&oscillations)?;

        let reference_index = self.table.reference_index();
        let reference_planes = self.reference_planes(&oscillations[reference_index]);

        let mut checks = Vec::with_capacity(oscillations.len());
        for (index, (body, osc)) in self.table.bodies().iter().zip(&oscillations).enumerate() {
            let trend_match = if index == reference_index {
                None
            } else {
                Some(body.trend.matches(self.apparent_change(osc, &reference_planes)))
            };
            checks.push(BodyCheck {
                range_fit: self.range_fits(body, osc),
                trend_match,
                oscillation: *osc,
            });
        }
        let passes = checks.iter().all(BodyCheck::passes);
        Ok(Evaluation {
            balance,
            checks,
            passes,
        })
    }

    fn oscillations(&self, configuration: &Configuration) -> Result<Vec<Oscillation>, ModelError> {
        if configuration.len() != self.table.len() {
            return Err(ModelError::ConfigurationMismatch {
                expected: self.table.len(),
                actual: configuration.len(),
            });
        }
        Ok(self
            .table
            .bodies()
            .iter()
            .zip(configuration.assignments())
            .map(|(body, a)| self.oscillation(body, *a))
            .collect())
    }

    /// Reference body's planes at the earlier and later trend epochs.
    fn reference_planes(&self, reference: &Oscillation) -> [OrbitalPlane; 2] {
        let span = self.constants.trend_half_span_years;
        [reference.plane_at(-span), reference.plane_at(span)]
    }

    /// `later - earlier` apparent inclination of `osc` against the reference planes.
    fn apparent_change(&self, osc: &Oscillation, reference_planes: &[OrbitalPlane; 2]) -> f64 {
        let span = self.constants.trend_half_span_years;
        let earlier = osc.plane_at(-span).apparent_inclination_to(&reference_planes[0]);
        let later = osc.plane_at(span).apparent_inclination_to(&reference_planes[1]);
        later - earlier
    }

    fn vector_balance(&self, oscillations: &[Oscillation]) -> Result<f64, ModelError> {
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut total = 0.0;
        for (body, osc) in self.table.bodies().iter().zip(oscillations) {
            let weighted = body.angular_momentum_weight() * osc.amplitude_deg;
            let (sin_p, cos_p) = osc.phase_deg.to_radians().sin_cos();
            sum_x += weighted * cos_p;
            sum_y += weighted * sin_p;
            total += weighted;
        }
        if !total.is_finite() || total <= 0.0 {
            return Err(ModelError::DegenerateBalance);
        }
        let imbalance = 100.0 * sum_x.hypot(sum_y) / total;
        Ok((100.0 - imbalance).clamp(0.0, 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::PhaseChoice;
    use crate::body::{InclinationBounds, NodeProvenance, NodeVariant, Trend};

    fn q(n: u32) -> QuantumNumber {
        QuantumNumber::integer(n).unwrap()
    }

    fn body(name: &str, node_deg: f64, period: f64, trend: Trend) -> Body {
        Body {
            name: name.into(),
            mass_ratio: 1e-6,
            semi_major_axis_au: 1.0,
            eccentricity: 0.0,
            inclination_deg: 2.0,
            nodes: vec![NodeVariant {
                provenance: NodeProvenance::Verified,
                node_deg,
            }],
            precession_period_yr: period,
            bounds: InclinationBounds {
                min_deg: 0.0,
                max_deg: 10.0,
            },
            trend,
            apparent_inclination_deg: None,
        }
    }

    fn pair_table() -> BodyTable {
        BodyTable::new(
            vec![
                body("Ref", 100.0, 70_000.0, Trend::Increasing),
                body("Twin", 250.0, -40_000.0, Trend::Increasing),
            ],
            "Ref",
        )
        .unwrap()
    }

    #[test]
    fn amplitude_formula() {
        // K / (d sqrt(m)) with K = 0.004, d = 2, m = 1e-6 -> 0.004 / (2 * 1e-3) = 2
        let a = oscillation_amplitude_deg(0.004, q(2), 1e-6);
        assert!((a - 2.0).abs() < 1e-12);
        let half = QuantumNumber::new(1, 2).unwrap();
        assert!((oscillation_amplitude_deg(0.004, half, 1e-6) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn mean_formula_and_epoch_inclination() {
        let table = pair_table();
        let constants = ModelConstants::standard();
        let model = BalanceModel::new(&table, &constants).unwrap();
        let b = &table.bodies()[0];
        let osc = model.oscillation(b, Assignment::new(q(3), PhaseChoice::Primary));
        let expected_amp = constants.amplitude_constant / (3.0 * 1e-3);
        assert!((osc.amplitude_deg - expected_amp).abs() < 1e-12);
        let expected_mean =
            2.0 - expected_amp * (100.0f64 - constants.phase_angles_deg[0]).to_radians().cos();
        assert!((osc.mean_deg - expected_mean).abs() < 1e-12);
        // At the reference epoch the model reproduces the reference inclination.
        assert!((osc.inclination_at(0.0) - 2.0).abs() < 1e-12);
        assert!((osc.node_at(0.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn node_advances_with_period_sign() {
        let table = pair_table();
        let model = BalanceModel::new(&table, &ModelConstants::standard()).unwrap();
        let osc = model.oscillation(
            &table.bodies()[1],
            Assignment::new(q(1), PhaseChoice::Primary),
        );
        // Retrograde 40 000 yr: 10 000 yr later the node is 90 deg earlier.
        assert!((osc.node_at(10_000.0) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn range_fit_uses_tolerance() {
        let mut table_bodies = pair_table().bodies().to_vec();
        let constants = ModelConstants::standard();
        let probe = BodyTable::new(table_bodies.clone(), "Ref").unwrap();
        let model = BalanceModel::new(&probe, &constants).unwrap();
        let osc = model.oscillation(&table_bodies[1], Assignment::new(q(5), PhaseChoice::Primary));
        let range = osc.range();

        // Bounds just inside the range by less than the tolerance still pass.
        table_bodies[1].bounds = InclinationBounds {
            min_deg: range.min_deg + 0.009,
            max_deg: range.max_deg - 0.009,
        };
        assert!(model.range_fits(&table_bodies[1], &osc));

        // Beyond the tolerance they fail.
        table_bodies[1].bounds = InclinationBounds {
            min_deg: range.min_deg + 0.02,
            max_deg: range.max_deg,
        };
        assert!(!model.range_fits(&table_bodies[1], &osc));
    }

    #[test]
    fn perfect_cancellation_scores_100() {
        let table = pair_table();
        let model = BalanceModel::new(&table, &ModelConstants::standard()).unwrap();
        let config = Configuration::new(vec![
            Assignment::new(q(3), PhaseChoice::Primary),
            Assignment::new(q(3), PhaseChoice::Opposed),
        ]);
        let balance = model.balance(&config).unwrap();
        assert!(balance > 100.0 - 1e-9, "balance = {balance}");
        assert!(balance <= 100.0);
    }

    #[test]
    fn aligned_phases_score_zero() {
        let table = pair_table();
        let model = BalanceModel::new(&table, &ModelConstants::standard()).unwrap();
        let config = Configuration::new(vec![
            Assignment::new(q(3), PhaseChoice::Primary),
            Assignment::new(q(5), PhaseChoice::Primary),
        ]);
        let balance = model.balance(&config).unwrap();
        assert!(balance < 1e-9, "balance = {balance}");
        assert!(balance >= 0.0);
    }

    #[test]
    fn partial_cancellation_matches_hand_calculation() {
        let table = pair_table();
        let model = BalanceModel::new(&table, &ModelConstants::standard()).unwrap();
        // Equal weights, amplitudes 1 : 1/3 in opposite directions:
        // residual = 2/3, total = 4/3, imbalance = 50%.
        let config = Configuration::new(vec![
            Assignment::new(q(1), PhaseChoice::Primary),
            Assignment::new(q(3), PhaseChoice::Opposed),
        ]);
        let balance = model.balance(&config).unwrap();
        assert!((balance - 50.0).abs() < 1e-9, "balance = {balance}");
    }

    #[test]
    fn reference_body_trend_skipped() {
        let table = pair_table();
        let model = BalanceModel::new(&table, &ModelConstants::standard()).unwrap();
        let config = Configuration::new(vec![
            Assignment::new(q(3), PhaseChoice::Primary),
            Assignment::new(q(3), PhaseChoice::Opposed),
        ]);
        assert_eq!(model.trend_matches(0, &config).unwrap(), None);
        assert!(model.trend_matches(1, &config).unwrap().is_some());
        let eval = model.evaluate(&config).unwrap();
        assert_eq!(eval.checks[0].trend_match, None);
    }

    #[test]
    fn trend_flips_with_observed_sign() {
        let config = Configuration::new(vec![
            Assignment::new(q(3), PhaseChoice::Primary),
            Assignment::new(q(2), PhaseChoice::Opposed),
        ]);
        let up = pair_table();
        let mut bodies = up.bodies().to_vec();
        bodies[1].trend = Trend::Decreasing;
        let down = BodyTable::new(bodies, "Ref").unwrap();

        let constants = ModelConstants::standard();
        let m_up = BalanceModel::new(&up, &constants).unwrap();
        let m_down = BalanceModel::new(&down, &constants).unwrap();
        let a = m_up.trend_matches(1, &config).unwrap().unwrap();
        let b = m_down.trend_matches(1, &config).unwrap().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn evaluate_agrees_with_component_checks() {
        let table = pair_table();
        let model = BalanceModel::new(&table, &ModelConstants::standard()).unwrap();
        let config = Configuration::new(vec![
            Assignment::new(q(2), PhaseChoice::Opposed),
            Assignment::new(q(5), PhaseChoice::Primary),
        ]);
        let eval = model.evaluate(&config).unwrap();
        assert_eq!(eval.balance, model.balance(&config).unwrap());
        assert_eq!(
            eval.checks[1].trend_match,
            model.trend_matches(1, &config).unwrap()
        );
        assert_eq!(eval.passes, eval.checks.iter().all(BodyCheck::passes));
    }

    #[test]
    fn evaluate_trend_matches_per_body_check_on_full_table() {
        let table = crate::solar_system::solar_system_table().unwrap();
        let model = BalanceModel::new(&table, &ModelConstants::standard()).unwrap();
        for seed in 0..16u32 {
            let config = Configuration::new(
                (0..table.len() as u32)
                    .map(|i| {
                        let phase = if (seed >> (i % 4)) & 1 == 0 {
                            PhaseChoice::Primary
                        } else {
                            PhaseChoice::Opposed
                        };
                        Assignment::new(q(1 + (seed + i) % 5), phase)
                    })
                    .collect(),
            );
            let eval = model.evaluate(&config).unwrap();
            for (index, check) in eval.checks.iter().enumerate() {
                assert_eq!(
                    check.trend_match,
                    model.trend_matches(index, &config).unwrap(),
                    "seed {seed}, body {index}"
                );
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let table = pair_table();
        let model = BalanceModel::new(&table, &ModelConstants::standard()).unwrap();
        let config = Configuration::new(vec![
            Assignment::new(q(8), PhaseChoice::Opposed),
            Assignment::new(q(13), PhaseChoice::Primary),
        ]);
        let a = model.evaluate(&config).unwrap();
        let b = model.evaluate(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.balance.to_bits(), b.balance.to_bits());
    }

    #[test]
    fn wrong_length_rejected() {
        let table = pair_table();
        let model = BalanceModel::new(&table, &ModelConstants::standard()).unwrap();
        let config = Configuration::new(vec![Assignment::new(q(1), PhaseChoice::Primary)]);
        assert_eq!(
            model.evaluate(&config),
            Err(ModelError::ConfigurationMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn invalid_constants_rejected() {
        let table = pair_table();
        let mut constants = ModelConstants::standard();
        constants.amplitude_constant = -1.0;
        assert!(BalanceModel::new(&table, &constants).is_err());
    }
}
