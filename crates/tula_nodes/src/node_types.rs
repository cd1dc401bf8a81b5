//! Types for the ascending-node solver.

use tula_geometry::OrbitalPlane;

/// Arc-seconds per degree.
pub const ARCSEC_PER_DEG: f64 = 3600.0;

/// `|cos ratio|` above this is infeasible rather than rounding noise.
pub const COS_RATIO_LIMIT: f64 = 1.0001;

/// One node-finding problem.
///
/// Find the ascending node of a plane with inclination
/// `planet_inclination_deg` (to the reference plane) such that its apparent
/// inclination against `reference` equals `target_apparent_deg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeProblem {
    pub planet_inclination_deg: f64,
    /// The fixed second body's plane ("Earth").
    pub reference: OrbitalPlane,
    pub target_apparent_deg: f64,
}

impl NodeProblem {
    pub const fn new(
        planet_inclination_deg: f64,
        reference: OrbitalPlane,
        target_apparent_deg: f64,
    ) -> Self {
        Self {
            planet_inclination_deg,
            reference,
            target_apparent_deg,
        }
    }

    /// Apparent inclination of the planet's plane for a candidate node.
    pub fn apparent_for(&self, node_deg: f64) -> f64 {
        OrbitalPlane::new(self.planet_inclination_deg, node_deg).apparent_inclination_to(&self.reference)
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.planet_inclination_deg.is_finite() {
            return Err("planet_inclination_deg must be finite");
        }
        if !self.reference.inclination_deg.is_finite() || !self.reference.node_deg.is_finite() {
            return Err("reference plane must be finite");
        }
        if !self.target_apparent_deg.is_finite() {
            return Err("target_apparent_deg must be finite");
        }
        Ok(())
    }
}

/// Upper bound on `half_window / step` for either scan phase.
pub const MAX_HALF_WINDOW_STEPS: f64 = 1.0e6;

/// Window and step sizes for the two-phase grid search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSearchConfig {
    /// Phase 1 scans `guess ± coarse_half_window_deg` (default 10).
    pub coarse_half_window_deg: f64,
    /// Phase 1 step (default 0.01).
    pub coarse_step_deg: f64,
    /// Phase 2 scans `winner ± fine_half_window_deg` (default 0.1).
    pub fine_half_window_deg: f64,
    /// Phase 2 step (default 0.0001).
    pub fine_step_deg: f64,
}

impl GridSearchConfig {
    pub const fn standard() -> Self {
        Self {
            coarse_half_window_deg: 10.0,
            coarse_step_deg: 0.01,
            fine_half_window_deg: 0.1,
            fine_step_deg: 0.0001,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.coarse_half_window_deg) {
            return Err("coarse_half_window_deg must be positive");
        }
        if !positive(self.coarse_step_deg) {
            return Err("coarse_step_deg must be positive");
        }
        if !positive(self.fine_half_window_deg) {
            return Err("fine_half_window_deg must be positive");
        }
        if !positive(self.fine_step_deg) {
            return Err("fine_step_deg must be positive");
        }
        if self.coarse_step_deg > self.coarse_half_window_deg {
            return Err("coarse_step_deg must not exceed the coarse window");
        }
        if self.fine_step_deg > self.fine_half_window_deg {
            return Err("fine_step_deg must not exceed the fine window");
        }
        if self.coarse_half_window_deg / self.coarse_step_deg > MAX_HALF_WINDOW_STEPS {
            return Err("too many coarse grid steps");
        }
        if self.fine_half_window_deg / self.fine_step_deg > MAX_HALF_WINDOW_STEPS {
            return Err("too many fine grid steps");
        }
        Ok(())
    }
}

impl Default for GridSearchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Result of the numerical grid search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericalSolution {
    /// Best node in [0, 360).
    pub node_deg: f64,
    /// Apparent inclination at `node_deg`.
    pub apparent_inclination_deg: f64,
    /// `apparent_inclination_deg - target`.
    pub error_deg: f64,
    /// `|error_deg| * 3600`.
    pub error_arcsec: f64,
    /// Net change from the starting guess, in (-180, 180].
    pub delta_from_guess_deg: f64,
}

impl NumericalSolution {
    /// Node rounded to `places` decimals, for seeding a body table.
    pub fn rounded_node_deg(&self, places: i32) -> f64 {
        let scale = 10f64.powi(places);
        (self.node_deg * scale).round() / scale
    }
}

/// A feasible closed-form solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticalSolution {
    /// Clamped cosine of the node difference.
    pub cos_ratio: f64,
    /// Node difference `acos(cos_ratio)`, in [0, 180].
    pub delta_node_deg: f64,
    /// `[ref + delta, ref - delta]`, each in [0, 360).
    pub candidates: [f64; 2],
    /// Candidate closest to the hint; `None` when no hint was given.
    pub chosen: Option<f64>,
}

impl AnalyticalSolution {
    /// Apparent-inclination error of each candidate in arc-seconds.
    pub fn candidate_errors_arcsec(&self, problem: &NodeProblem) -> [f64; 2] {
        self.candidates
            .map(|node| (problem.apparent_for(node) - problem.target_apparent_deg).abs() * ARCSEC_PER_DEG)
    }
}

/// Outcome of the closed-form solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalyticalOutcome {
    Solved(AnalyticalSolution),
    /// No plane with this inclination reaches the target; `cos_ratio` is the
    /// unclamped out-of-range value.
    NoSolution { cos_ratio: f64 },
}

impl AnalyticalOutcome {
    pub fn solution(&self) -> Option<&AnalyticalSolution> {
        match self {
            Self::Solved(s) => Some(s),
            Self::NoSolution { .. } => None,
        }
    }

    /// Chosen node, if feasible and disambiguated.
    pub fn chosen(&self) -> Option<f64> {
        self.solution().and_then(|s| s.chosen)
    }
}

/// Side-by-side numerical and analytical results for one problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossCheck {
    pub problem: NodeProblem,
    pub starting_guess_deg: f64,
    pub numerical: NumericalSolution,
    pub analytical: AnalyticalOutcome,
    /// Wrapped distance between the two chosen nodes, if both exist.
    pub node_difference_deg: Option<f64>,
}

impl CrossCheck {
    /// Both methods produced a node and they differ by at most `tolerance_deg`.
    pub fn agrees(&self, tolerance_deg: f64) -> bool {
        self.node_difference_deg.is_some_and(|d| d <= tolerance_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_valid() {
        let c = GridSearchConfig::standard();
        assert!((c.coarse_half_window_deg - 10.0).abs() < 1e-10);
        assert!((c.fine_step_deg - 0.0001).abs() < 1e-15);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_step() {
        let mut c = GridSearchConfig::standard();
        c.coarse_step_deg = 0.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_unbounded_grid() {
        let mut c = GridSearchConfig::standard();
        c.coarse_half_window_deg = 180.0;
        c.coarse_step_deg = 1e-9;
        assert_eq!(c.validate(), Err("too many coarse grid steps"));

        let mut c = GridSearchConfig::standard();
        c.fine_step_deg = 1e-12;
        assert_eq!(c.validate(), Err("too many fine grid steps"));
    }

    #[test]
    fn accepts_full_circle_grid() {
        let c = GridSearchConfig {
            coarse_half_window_deg: 180.0,
            coarse_step_deg: 0.001,
            ..GridSearchConfig::standard()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_negative_window() {
        let mut c = GridSearchConfig::standard();
        c.fine_half_window_deg = -0.1;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_step_wider_than_window() {
        let mut c = GridSearchConfig::standard();
        c.fine_step_deg = 0.5;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_nan_problem() {
        let p = NodeProblem::new(f64::NAN, OrbitalPlane::new(1.0, 2.0), 3.0);
        assert!(p.validate().is_err());
        let p = NodeProblem::new(1.0, OrbitalPlane::new(1.0, f64::INFINITY), 3.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn rounding_for_table() {
        let s = NumericalSolution {
            node_deg: 32.8285,
            apparent_inclination_deg: 7.0,
            error_deg: 0.0,
            error_arcsec: 0.0,
            delta_from_guess_deg: 0.6085,
        };
        assert!((s.rounded_node_deg(2) - 32.83).abs() < 1e-12);
        assert!((s.rounded_node_deg(0) - 33.0).abs() < 1e-12);
    }

    #[test]
    fn agreement_requires_both_nodes() {
        let problem = NodeProblem::new(6.0, OrbitalPlane::new(1.5, 284.5), 7.0);
        let numerical = NumericalSolution {
            node_deg: 10.0,
            apparent_inclination_deg: 7.0,
            error_deg: 0.0,
            error_arcsec: 0.0,
            delta_from_guess_deg: 0.0,
        };
        let check = CrossCheck {
            problem,
            starting_guess_deg: 10.0,
            numerical,
            analytical: AnalyticalOutcome::NoSolution { cos_ratio: 2.0 },
            node_difference_deg: None,
        };
        assert!(!check.agrees(1.0));
    }
}
