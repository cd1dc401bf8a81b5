//! A complete search study: body table, constants, space and run options.

use std::fs;
use std::path::Path;

use tula_model::{
    Assignment, BalanceModel, Body, BodyTable, InclinationBounds, ModelConstants, ModelError,
    NodeVariant, PhaseChoice, solar_system_table,
};
use tula_search::{
    QuantumDomain, Scenario, ScenarioSet, SearchConfig, SearchEngine, SearchError, SearchSpace,
    solar_system_space,
};

use crate::error::ConfigError;
use crate::raw::{RawAssignment, RawBody, RawModel, RawSearch, RawStudy};

/// Validated study.
#[derive(Debug, Clone, PartialEq)]
pub struct Study {
    pub table: BodyTable,
    pub constants: ModelConstants,
    pub space: SearchSpace,
    pub search: SearchConfig,
}

impl Study {
    /// Built-in eight-planet table with the built-in search space.
    pub fn builtin() -> Result<Self, ConfigError> {
        let table = solar_system_table()?;
        let space = solar_system_space(&table)?;
        Ok(Self {
            table,
            constants: ModelConstants::standard(),
            space,
            search: SearchConfig::standard(),
        })
    }

    /// Parse and validate a study from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawStudy = toml::from_str(text)?;
        Self::resolve(raw)
    }

    /// Read, parse and validate a study file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        let study = Self::from_toml_str(&text).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "study rejected");
        })?;
        tracing::info!(
            path = %path.display(),
            bodies = study.table.len(),
            configurations = study.space.total_len(),
            "study loaded"
        );
        Ok(study)
    }

    /// Balance model over this study's table and constants.
    pub fn model(&self) -> Result<BalanceModel<'_>, ModelError> {
        BalanceModel::new(&self.table, &self.constants)
    }

    /// Search engine with the given run options.
    pub fn engine(&self, config: SearchConfig) -> Result<SearchEngine<'_>, SearchError> {
        SearchEngine::new(self.model()?, &self.space, config)
    }

    fn resolve(raw: RawStudy) -> Result<Self, ConfigError> {
        let constants = resolve_constants(&raw.model);
        constants.validate()?;
        let bodies = raw
            .bodies
            .into_iter()
            .map(resolve_body)
            .collect::<Result<Vec<_>, _>>()?;
        let table = BodyTable::new(bodies, &raw.reference)?;
        let (space, search) = match raw.search {
            Some(search) => resolve_search(&table, search)?,
            None => {
                tracing::debug!("no [search] section; using the built-in space");
                (solar_system_space(&table)?, SearchConfig::standard())
            }
        };
        search.validate().map_err(SearchError::InvalidConfig)?;
        Ok(Self {
            table,
            constants,
            space,
            search,
        })
    }
}

fn resolve_constants(raw: &RawModel) -> ModelConstants {
    let standard = ModelConstants::standard();
    ModelConstants {
        amplitude_constant: raw
            .amplitude_constant
            .unwrap_or(standard.amplitude_constant),
        phase_angles_deg: raw.phase_angles_deg.unwrap_or(standard.phase_angles_deg),
        trend_half_span_years: raw
            .trend_half_span_years
            .unwrap_or(standard.trend_half_span_years),
        range_tolerance_deg: raw
            .range_tolerance_deg
            .unwrap_or(standard.range_tolerance_deg),
    }
}

fn resolve_body(raw: RawBody) -> Result<Body, ConfigError> {
    let nodes = raw
        .nodes
        .into_iter()
        .map(|n| {
            Ok(NodeVariant {
                provenance: n.provenance.parse()?,
                node_deg: n.node_deg,
            })
        })
        .collect::<Result<Vec<_>, ModelError>>()?;
    Ok(Body {
        name: raw.name,
        mass_ratio: raw.mass_ratio,
        semi_major_axis_au: raw.semi_major_axis_au,
        eccentricity: raw.eccentricity,
        inclination_deg: raw.inclination_deg,
        nodes,
        precession_period_yr: raw.precession_period_yr,
        bounds: InclinationBounds {
            min_deg: raw.bounds[0],
            max_deg: raw.bounds[1],
        },
        trend: raw.trend.parse()?,
        apparent_inclination_deg: raw.apparent_inclination_deg,
    })
}

fn resolve_assignment(raw: &RawAssignment) -> Result<Assignment, ConfigError> {
    let phase: PhaseChoice = raw.phase.parse()?;
    Ok(Assignment::new(raw.quantum, phase))
}

fn body_index(table: &BodyTable, name: &str, role: &str) -> Result<usize, ConfigError> {
    table
        .index_of(name)
        .map_err(|_| ConfigError::Invalid(format!("{role} body {name} is not in the table")))
}

fn resolve_search(
    table: &BodyTable,
    raw: RawSearch,
) -> Result<(SearchSpace, SearchConfig), ConfigError> {
    let varying = raw
        .varying
        .iter()
        .map(|name| body_index(table, name, "varying"))
        .collect::<Result<Vec<_>, _>>()?;
    let domain = QuantumDomain::new(raw.quantum_numbers)?;
    let canonical = vec![resolve_assignment(&raw.canonical)?; table.len()];

    let scenarios = match (raw.distinguished, raw.scenarios.is_empty()) {
        (None, true) => None,
        (None, false) => {
            return Err(ConfigError::Invalid(
                "scenarios require a distinguished pair".into(),
            ));
        }
        (Some(_), true) => {
            return Err(ConfigError::Invalid(
                "distinguished bodies require at least one scenario".into(),
            ));
        }
        (Some([first, second]), false) => {
            let distinguished = [
                body_index(table, &first, "distinguished")?,
                body_index(table, &second, "distinguished")?,
            ];
            let scenarios = raw
                .scenarios
                .iter()
                .map(|s| {
                    Ok(Scenario::new(
                        s.name.clone(),
                        resolve_assignment(&s.assignments[0])?,
                        resolve_assignment(&s.assignments[1])?,
                    ))
                })
                .collect::<Result<Vec<_>, ConfigError>>()?;
            Some(ScenarioSet::new(distinguished, scenarios)?)
        }
    };

    let space = SearchSpace::new(table, varying, domain, canonical, scenarios)?;
    let config = SearchConfig {
        threshold: raw.threshold,
        parallel: raw.parallel,
    };
    Ok((space, config))
}
