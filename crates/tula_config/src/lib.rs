//! TOML study files.
//!
//! A study bundles the body table, model constants, search space and run
//! options. Files are parsed into private raw structs and resolved into
//! validated `tula_model` / `tula_search` types at load time, so an invalid
//! quantum number or unknown body name fails here, never mid-search.

pub mod error;
mod raw;
pub mod study;

pub use error::ConfigError;
pub use study::Study;

/// Sample study reproducing the built-in table and search space.
pub const SOLAR_SYSTEM_STUDY: &str = include_str!("../data/solar_system.toml");
