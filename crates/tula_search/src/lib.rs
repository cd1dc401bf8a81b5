//! Combinatorial balance search.
//!
//! This crate provides:
//! - The candidate space: a shared quantum domain for varying bodies, named
//!   scenarios for two distinguished bodies, canonical assignments for the
//!   rest
//! - Mixed-radix enumeration of the space by global ordinal
//! - A phased search engine (parallel or sequential) that scores, filters
//!   and sorts configurations deterministically
//! - Flat result rows and the built-in eight-planet space

pub mod engine;
pub mod engine_types;
pub mod error;
pub mod mixed_radix;
pub mod presets;
pub mod result_row;
pub mod space;

pub use engine::{SearchEngine, merge_partitions, sort_results};
pub use engine_types::{
    DEFAULT_THRESHOLD, SearchConfig, SearchOutcome, SearchPhase, SearchResult, SearchStats,
};
pub use error::SearchError;
pub use mixed_radix::MixedRadix;
pub use presets::{
    SOLAR_SYSTEM_DISTINGUISHED, SOLAR_SYSTEM_DOMAIN, SOLAR_SYSTEM_VARYING, solar_system_scenarios,
    solar_system_space,
};
pub use result_row::{BodyCell, ResultRow, columns, rows};
pub use space::{DEFAULT_SCENARIO_TAG, QuantumDomain, Scenario, ScenarioSet, SearchSpace};
