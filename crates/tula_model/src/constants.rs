//! Fixed constants of the balance model.

use crate::assignment::PhaseChoice;
use crate::error::ModelError;

/// Length of the great cycle in years; the amplitude constant derives from it.
pub const GREAT_CYCLE_YEARS: f64 = 335_008.0;

/// Amplitude constant `K = 2205 / (2 * 335008)`.
pub const AMPLITUDE_CONSTANT: f64 = 2205.0 / (2.0 * GREAT_CYCLE_YEARS);

/// The two allowed phase angles in degrees: primary and opposed.
pub const PHASE_ANGLES_DEG: [f64; 2] = [203.3195, 23.3195];

/// Absolute slack applied to each side of a bound in the range-fit check.
pub const RANGE_TOLERANCE_DEG: f64 = 0.01;

/// Half the span between the two trend-check epochs.
pub const TREND_HALF_SPAN_YEARS: f64 = 50.0;

/// Immutable model constants passed into every evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConstants {
    /// `K` in `amplitude = K / (d * sqrt(mass))`.
    pub amplitude_constant: f64,
    /// Degrees for [`PhaseChoice::Primary`] and [`PhaseChoice::Opposed`].
    pub phase_angles_deg: [f64; 2],
    /// Trend is sampled at `-span` and `+span` years from the reference epoch.
    pub trend_half_span_years: f64,
    pub range_tolerance_deg: f64,
}

impl ModelConstants {
    pub const fn standard() -> Self {
        Self {
            amplitude_constant: AMPLITUDE_CONSTANT,
            phase_angles_deg: PHASE_ANGLES_DEG,
            trend_half_span_years: TREND_HALF_SPAN_YEARS,
            range_tolerance_deg: RANGE_TOLERANCE_DEG,
        }
    }

    pub fn phase_deg(&self, choice: PhaseChoice) -> f64 {
        self.phase_angles_deg[choice.index()]
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.amplitude_constant.is_finite() || self.amplitude_constant <= 0.0 {
            return Err(ModelError::InvalidConstants(
                "amplitude_constant must be positive",
            ));
        }
        if self.phase_angles_deg.iter().any(|p| !p.is_finite()) {
            return Err(ModelError::InvalidConstants("phase angles must be finite"));
        }
        if self.phase_angles_deg[0] == self.phase_angles_deg[1] {
            return Err(ModelError::InvalidConstants("phase angles must differ"));
        }
        if !self.trend_half_span_years.is_finite() || self.trend_half_span_years <= 0.0 {
            return Err(ModelError::InvalidConstants(
                "trend_half_span_years must be positive",
            ));
        }
        if !self.range_tolerance_deg.is_finite() || self.range_tolerance_deg < 0.0 {
            return Err(ModelError::InvalidConstants(
                "range_tolerance_deg must be non-negative",
            ));
        }
        Ok(())
    }
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self::standard()
    }
}
