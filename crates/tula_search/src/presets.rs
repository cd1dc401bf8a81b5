//! Built-in search space for the eight-planet table.
//!
//! Mercury, Venus, Mars, Uranus and Neptune vary over the first eight
//! Fibonacci numbers; Jupiter and Saturn are fixed by scenario; Earth is
//! held at `3` primary.

use tula_model::{Assignment, BodyTable, PhaseChoice, QuantumNumber};

use crate::error::SearchError;
use crate::space::{QuantumDomain, Scenario, ScenarioSet, SearchSpace};

/// Shared quantum domain of the built-in space.
pub const SOLAR_SYSTEM_DOMAIN: [u32; 8] = [1, 2, 3, 5, 8, 13, 21, 34];

/// Bodies that vary in the built-in space, in significance order.
pub const SOLAR_SYSTEM_VARYING: [&str; 5] = ["Mercury", "Venus", "Mars", "Uranus", "Neptune"];

/// The two scenario-fixed bodies.
pub const SOLAR_SYSTEM_DISTINGUISHED: [&str; 2] = ["Jupiter", "Saturn"];

/// `(name, (jupiter d, phase), (saturn d, phase))`
const SCENARIOS: [(&str, (u32, PhaseChoice), (u32, PhaseChoice)); 3] = [
    ("J1-S1", (1, PhaseChoice::Primary), (1, PhaseChoice::Opposed)),
    ("J1-S2", (1, PhaseChoice::Primary), (2, PhaseChoice::Primary)),
    ("J2-S3", (2, PhaseChoice::Primary), (3, PhaseChoice::Opposed)),
];

fn assignment(d: u32, phase: PhaseChoice) -> Result<Assignment, SearchError> {
    Ok(Assignment::new(QuantumNumber::integer(d)?, phase))
}

/// Scenario set fixing Jupiter and Saturn.
pub fn solar_system_scenarios(table: &BodyTable) -> Result<ScenarioSet, SearchError> {
    let distinguished = [
        table.index_of(SOLAR_SYSTEM_DISTINGUISHED[0])?,
        table.index_of(SOLAR_SYSTEM_DISTINGUISHED[1])?,
    ];
    let scenarios = SCENARIOS
        .iter()
        .map(|&(name, (jd, jp), (sd, sp))| {
            Ok(Scenario::new(name, assignment(jd, jp)?, assignment(sd, sp)?))
        })
        .collect::<Result<Vec<_>, SearchError>>()?;
    ScenarioSet::new(distinguished, scenarios)
}

/// The built-in search space over `table`.
///
/// Bodies not named here (Earth, and any extra bodies) are held at `3`
/// primary.
pub fn solar_system_space(table: &BodyTable) -> Result<SearchSpace, SearchError> {
    let varying = SOLAR_SYSTEM_VARYING
        .iter()
        .map(|name| table.index_of(name))
        .collect::<Result<Vec<_>, _>>()?;
    let canonical = vec![assignment(3, PhaseChoice::Primary)?; table.len()];
    SearchSpace::new(
        table,
        varying,
        QuantumDomain::integers(&SOLAR_SYSTEM_DOMAIN)?,
        canonical,
        Some(solar_system_scenarios(table)?),
    )
}
