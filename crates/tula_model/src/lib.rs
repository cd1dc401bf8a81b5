//! Body table and inclination-oscillation balance model.
//!
//! This crate provides:
//! - Immutable body reference data with provenance-tagged ascending nodes
//! - Positive rational quantum numbers and per-body assignments
//! - The oscillation model (amplitude, mean, range, trend) and the
//!   angular-momentum-weighted vector balance score
//! - A built-in eight-planet table

pub mod assignment;
pub mod balance;
pub mod body;
pub mod constants;
pub mod error;
pub mod quantum;
pub mod solar_system;
pub mod table;

pub use assignment::{ALL_PHASES, Assignment, Configuration, PhaseChoice};
pub use balance::{
    BalanceModel, BodyCheck, Evaluation, InclinationRange, Oscillation, oscillation_amplitude_deg,
};
pub use body::{ALL_PROVENANCES, Body, InclinationBounds, NodeProvenance, NodeVariant, Trend};
pub use constants::{
    AMPLITUDE_CONSTANT, GREAT_CYCLE_YEARS, ModelConstants, PHASE_ANGLES_DEG, RANGE_TOLERANCE_DEG,
    TREND_HALF_SPAN_YEARS,
};
pub use error::ModelError;
pub use quantum::QuantumNumber;
pub use solar_system::{REFERENCE_BODY, solar_system_bodies, solar_system_table};
pub use table::BodyTable;
