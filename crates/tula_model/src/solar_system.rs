//! Built-in eight-planet body table, Earth as reference.
//!
//! Inclinations and original-reference nodes are relative to the invariable
//! plane (Souami & Souchay 2012). Verified nodes are the solver output,
//! rounded to 0.01 deg, for which the numerical and analytical methods agree
//! and the J2000 ecliptic inclination is reproduced. Masses are Sun = 1;
//! Earth includes the Moon. Bounds are secular-theory extremes; trends are
//! the sign of the J2000 ecliptic-inclination rate.

use crate::body::{Body, InclinationBounds, NodeProvenance, NodeVariant, Trend};
use crate::constants::GREAT_CYCLE_YEARS;
use crate::error::ModelError;
use crate::table::BodyTable;

/// Name of the reference body in the built-in table.
pub const REFERENCE_BODY: &str = "Earth";

struct PlanetRow {
    name: &'static str,
    mass_ratio: f64,
    semi_major_axis_au: f64,
    eccentricity: f64,
    inclination_deg: f64,
    original_node_deg: f64,
    verified_node_deg: f64,
    precession_period_yr: f64,
    bounds: (f64, f64),
    trend: Trend,
    ecliptic_inclination_deg: Option<f64>,
}

const H: f64 = GREAT_CYCLE_YEARS;

#[rustfmt::skip]
const PLANETS: [PlanetRow; 8] = [
    PlanetRow { name: "Mercury", mass_ratio: 1.6601e-7, semi_major_axis_au: 0.387_098, eccentricity: 0.205_630,
        inclination_deg: 6.347_285_8, original_node_deg: 32.22, verified_node_deg: 32.83,
        precession_period_yr: 8.0 * H / 11.0, bounds: (4.57, 9.86), trend: Trend::Decreasing,
        ecliptic_inclination_deg: Some(7.004_979_02) },
    PlanetRow { name: "Venus", mass_ratio: 2.4478e-6, semi_major_axis_au: 0.723_332, eccentricity: 0.006_772,
        inclination_deg: 2.154_544_1, original_node_deg: 52.31, verified_node_deg: 54.70,
        precession_period_yr: 2.0 * H, bounds: (0.0, 3.38), trend: Trend::Decreasing,
        ecliptic_inclination_deg: Some(3.394_676_05) },
    PlanetRow { name: "Earth", mass_ratio: 3.0404e-6, semi_major_axis_au: 1.000_001, eccentricity: 0.016_709,
        inclination_deg: 1.578_666_63, original_node_deg: 284.51, verified_node_deg: 284.51,
        precession_period_yr: H / 3.0, bounds: (0.0, 2.95), trend: Trend::Decreasing,
        ecliptic_inclination_deg: None },
    PlanetRow { name: "Mars", mass_ratio: 3.2272e-7, semi_major_axis_au: 1.523_679, eccentricity: 0.093_400,
        inclination_deg: 1.631_185_8, original_node_deg: 352.95, verified_node_deg: 354.87,
        precession_period_yr: 3.0 * H / 13.0, bounds: (0.0, 5.84), trend: Trend::Decreasing,
        ecliptic_inclination_deg: Some(1.849_691_42) },
    PlanetRow { name: "Jupiter", mass_ratio: 9.5479e-4, semi_major_axis_au: 5.2044, eccentricity: 0.0489,
        inclination_deg: 0.321_965_2, original_node_deg: 306.92, verified_node_deg: 312.89,
        precession_period_yr: H / 5.0, bounds: (0.24, 0.49), trend: Trend::Decreasing,
        ecliptic_inclination_deg: Some(1.304_396_95) },
    PlanetRow { name: "Saturn", mass_ratio: 2.8588e-4, semi_major_axis_au: 9.5826, eccentricity: 0.0565,
        inclination_deg: 0.925_470_4, original_node_deg: 122.27, verified_node_deg: 118.81,
        precession_period_yr: -H / 8.0, bounds: (0.79, 1.02), trend: Trend::Increasing,
        ecliptic_inclination_deg: Some(2.485_991_87) },
    PlanetRow { name: "Uranus", mass_ratio: 4.3662e-5, semi_major_axis_au: 19.2184, eccentricity: 0.046_381,
        inclination_deg: 0.994_669_2, original_node_deg: 308.44, verified_node_deg: 307.80,
        precession_period_yr: H / 3.0, bounds: (0.90, 1.11), trend: Trend::Decreasing,
        ecliptic_inclination_deg: Some(0.772_637_83) },
    PlanetRow { name: "Neptune", mass_ratio: 5.1514e-5, semi_major_axis_au: 30.07, eccentricity: 0.008_678,
        inclination_deg: 0.735_415_5, original_node_deg: 189.28, verified_node_deg: 192.04,
        precession_period_yr: 2.0 * H, bounds: (0.55, 0.80), trend: Trend::Increasing,
        ecliptic_inclination_deg: Some(1.770_043_47) },
];

fn to_body(row: &PlanetRow) -> Body {
    Body {
        name: row.name.to_string(),
        mass_ratio: row.mass_ratio,
        semi_major_axis_au: row.semi_major_axis_au,
        eccentricity: row.eccentricity,
        inclination_deg: row.inclination_deg,
        nodes: vec![
            NodeVariant {
                provenance: NodeProvenance::OriginalReference,
                node_deg: row.original_node_deg,
            },
            NodeVariant {
                provenance: NodeProvenance::Verified,
                node_deg: row.verified_node_deg,
            },
        ],
        precession_period_yr: row.precession_period_yr,
        bounds: InclinationBounds {
            min_deg: row.bounds.0,
            max_deg: row.bounds.1,
        },
        trend: row.trend,
        apparent_inclination_deg: row.ecliptic_inclination_deg,
    }
}

/// The eight planets, Mercury to Neptune, Earth as reference.
pub fn solar_system_bodies() -> Vec<Body> {
    PLANETS.iter().map(to_body).collect()
}

/// Validated built-in table.
pub fn solar_system_table() -> Result<BodyTable, ModelError> {
    BodyTable::new(solar_system_bodies(), REFERENCE_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rows_validate() {
        assert!(solar_system_table().is_ok());
    }

    #[test]
    fn every_planet_but_earth_has_ecliptic_target() {
        let t = solar_system_table().unwrap();
        for (i, b) in t.bodies().iter().enumerate() {
            assert_eq!(
                b.apparent_inclination_deg.is_none(),
                i == t.reference_index(),
                "{}",
                b.name
            );
        }
    }

    #[test]
    fn model_uses_verified_nodes() {
        let t = solar_system_table().unwrap();
        let mercury = &t.bodies()[0];
        assert_eq!(mercury.preferred_node_deg(), 32.83);
        assert_eq!(mercury.node(NodeProvenance::OriginalReference), Some(32.22));
    }

    #[test]
    fn saturn_precesses_retrograde() {
        let t = solar_system_table().unwrap();
        let saturn = &t.bodies()[t.index_of("Saturn").unwrap()];
        assert!(saturn.precession_period_yr < 0.0);
    }
}
