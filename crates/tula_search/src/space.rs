//! The discrete candidate space: shared quantum domain, varying bodies,
//! canonical assignments and named scenarios.

use tula_model::{ALL_PHASES, Assignment, BodyTable, Configuration, QuantumNumber};

use crate::error::SearchError;
use crate::mixed_radix::MixedRadix;

/// Scenario tag used when a space has no scenario set.
pub const DEFAULT_SCENARIO_TAG: &str = "default";

/// Ordered, duplicate-free quantum numbers shared by every varying body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantumDomain(Vec<QuantumNumber>);

impl QuantumDomain {
    pub fn new(values: Vec<QuantumNumber>) -> Result<Self, SearchError> {
        if values.is_empty() {
            return Err(SearchError::InvalidSpace(
                "quantum domain must not be empty".into(),
            ));
        }
        for (i, q) in values.iter().enumerate() {
            if values[..i].contains(q) {
                return Err(SearchError::InvalidSpace(format!(
                    "duplicate quantum number {q} in domain"
                )));
            }
        }
        Ok(Self(values))
    }

    /// Domain of the given integers.
    pub fn integers(values: &[u32]) -> Result<Self, SearchError> {
        let values = values
            .iter()
            .map(|&n| QuantumNumber::integer(n))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }

    pub fn values(&self) -> &[QuantumNumber] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Named fixed assignment of both distinguished bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    /// Assignments of the first and second distinguished body.
    pub assignments: [Assignment; 2],
}

impl Scenario {
    pub fn new(name: impl Into<String>, first: Assignment, second: Assignment) -> Self {
        Self {
            name: name.into(),
            assignments: [first, second],
        }
    }
}

/// Two distinguished bodies and the scenarios that fix them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSet {
    distinguished: [usize; 2],
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new(distinguished: [usize; 2], scenarios: Vec<Scenario>) -> Result<Self, SearchError> {
        if distinguished[0] == distinguished[1] {
            return Err(SearchError::InvalidSpace(
                "distinguished bodies must differ".into(),
            ));
        }
        if scenarios.is_empty() {
            return Err(SearchError::InvalidSpace(
                "scenario set must not be empty".into(),
            ));
        }
        for (i, s) in scenarios.iter().enumerate() {
            if scenarios[..i].iter().any(|o| o.name == s.name) {
                return Err(SearchError::InvalidSpace(format!(
                    "duplicate scenario name: {}",
                    s.name
                )));
            }
        }
        Ok(Self {
            distinguished,
            scenarios,
        })
    }

    pub fn distinguished(&self) -> [usize; 2] {
        self.distinguished
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Subset in original order. Unknown names are an error.
    pub fn retain_named<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, SearchError> {
        for name in names {
            let name = name.as_ref();
            if !self.scenarios.iter().any(|s| s.name == name) {
                return Err(SearchError::UnknownScenario(name.to_string()));
            }
        }
        let scenarios = self
            .scenarios
            .iter()
            .filter(|s| names.iter().any(|n| n.as_ref() == s.name))
            .cloned()
            .collect();
        Self::new(self.distinguished, scenarios)
    }
}

/// Validated search space for one body table.
///
/// The space is partitioned into slices, one per scenario (a single slice
/// when there is no scenario set). Within a slice each varying body takes
/// every `(quantum, phase)` pair, quantum major and phase minor, the first
/// varying body most significant. A global ordinal is
/// `slice * slice_len + index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpace {
    varying: Vec<usize>,
    domain: QuantumDomain,
    canonical: Vec<Assignment>,
    scenarios: Option<ScenarioSet>,
    radix: MixedRadix,
    total_len: usize,
}

impl SearchSpace {
    pub fn new(
        table: &BodyTable,
        varying: Vec<usize>,
        domain: QuantumDomain,
        canonical: Vec<Assignment>,
        scenarios: Option<ScenarioSet>,
    ) -> Result<Self, SearchError> {
        let n = table.len();
        if canonical.len() != n {
            return Err(SearchError::InvalidSpace(format!(
                "{} canonical assignments for {n} bodies",
                canonical.len()
            )));
        }
        if varying.is_empty() {
            return Err(SearchError::InvalidSpace(
                "at least one body must vary".into(),
            ));
        }
        for (i, &b) in varying.iter().enumerate() {
            if b >= n {
                return Err(SearchError::InvalidSpace(format!(
                    "varying body index {b} out of range"
                )));
            }
            if varying[..i].contains(&b) {
                return Err(SearchError::InvalidSpace(format!(
                    "body {} listed twice as varying",
                    table.bodies()[b].name
                )));
            }
        }
        if let Some(set) = &scenarios {
            for d in set.distinguished() {
                if d >= n {
                    return Err(SearchError::InvalidSpace(format!(
                        "distinguished body index {d} out of range"
                    )));
                }
                if varying.contains(&d) {
                    return Err(SearchError::InvalidSpace(format!(
                        "body {} is both varying and distinguished",
                        table.bodies()[d].name
                    )));
                }
            }
        }
        let radix = MixedRadix::uniform(domain.len() * ALL_PHASES.len(), varying.len())
            .ok_or_else(|| SearchError::InvalidSpace("search space is too large".into()))?;
        let slices = scenarios.as_ref().map_or(1, ScenarioSet::len);
        let total_len = radix
            .len()
            .checked_mul(slices)
            .ok_or_else(|| SearchError::InvalidSpace("search space is too large".into()))?;
        Ok(Self {
            varying,
            domain,
            canonical,
            scenarios,
            radix,
            total_len,
        })
    }

    pub fn varying(&self) -> &[usize] {
        &self.varying
    }

    pub fn domain(&self) -> &QuantumDomain {
        &self.domain
    }

    pub fn canonical(&self) -> &[Assignment] {
        &self.canonical
    }

    pub fn scenarios(&self) -> Option<&ScenarioSet> {
        self.scenarios.as_ref()
    }

    /// Number of bodies each configuration covers.
    pub fn body_count(&self) -> usize {
        self.canonical.len()
    }

    /// Configurations per slice: `(|domain| * 2) ^ |varying|`.
    pub fn slice_len(&self) -> usize {
        self.radix.len()
    }

    /// Number of slices (scenarios, or 1).
    pub fn slice_count(&self) -> usize {
        self.scenarios.as_ref().map_or(1, ScenarioSet::len)
    }

    /// Configurations across all slices.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Tag of a slice: its scenario name, or [`DEFAULT_SCENARIO_TAG`].
    pub fn scenario_tag(&self, slice: usize) -> Option<&str> {
        match &self.scenarios {
            Some(set) => set.scenarios().get(slice).map(|s| s.name.as_str()),
            None => (slice == 0).then_some(DEFAULT_SCENARIO_TAG),
        }
    }

    /// Split a global ordinal into `(slice, index)`.
    pub fn locate(&self, ordinal: usize) -> Option<(usize, usize)> {
        (ordinal < self.total_len).then(|| (ordinal / self.slice_len(), ordinal % self.slice_len()))
    }

    /// Ordinal range covered by one slice.
    pub fn slice_range(&self, slice: usize) -> Option<std::ops::Range<usize>> {
        (slice < self.slice_count()).then(|| {
            let start = slice * self.slice_len();
            start..start + self.slice_len()
        })
    }

    /// The configuration at `index` within `slice`.
    pub fn configuration_at(&self, slice: usize, index: usize) -> Result<Configuration, SearchError> {
        if slice >= self.slice_count() {
            return Err(SearchError::InvalidSpace(format!(
                "slice {slice} out of range"
            )));
        }
        let mut digits = vec![0; self.varying.len()];
        if !self.radix.decode_into(index, &mut digits) {
            return Err(SearchError::InvalidSpace(format!(
                "index {index} out of range"
            )));
        }
        let mut assignments = self.canonical.clone();
        if let Some(set) = &self.scenarios {
            let scenario = &set.scenarios()[slice];
            for (body, assignment) in set.distinguished().into_iter().zip(scenario.assignments) {
                assignments[body] = assignment;
            }
        }
        let phases = ALL_PHASES.len();
        for (&body, &digit) in self.varying.iter().zip(&digits) {
            let quantum = self.domain.values()[digit / phases];
            let phase = ALL_PHASES[digit % phases];
            assignments[body] = Assignment::new(quantum, phase);
        }
        Ok(Configuration::new(assignments))
    }

    /// The configuration at a global ordinal.
    pub fn configuration_at_ordinal(&self, ordinal: usize) -> Result<Configuration, SearchError> {
        let (slice, index) = self
            .locate(ordinal)
            .ok_or_else(|| SearchError::InvalidSpace(format!("ordinal {ordinal} out of range")))?;
        self.configuration_at(slice, index)
    }

    /// Same space restricted to the named scenarios, in their original order.
    pub fn with_scenarios_named<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, SearchError> {
        let scenarios = match &self.scenarios {
            Some(set) => Some(set.retain_named(names)?),
            None => {
                if let Some(name) = names.first() {
                    return Err(SearchError::UnknownScenario(name.as_ref().to_string()));
                }
                None
            }
        };
        let slices = scenarios.as_ref().map_or(1, ScenarioSet::len);
        let total_len = self
            .radix
            .len()
            .checked_mul(slices)
            .ok_or_else(|| SearchError::InvalidSpace("search space is too large".into()))?;
        Ok(Self {
            scenarios,
            total_len,
            ..self.clone()
        })
    }
}
