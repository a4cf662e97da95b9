//! Core data model for graphtext: connection settings, label sets, index
//! definitions, and the diagnostics produced by a rebuild.

pub mod config;
pub mod error;
pub mod model;

pub use config::RebuildOptions;
pub use error::CoreError;
pub use model::{
    ConnectionConfig, IndexDefinition, LabelSet, Outcome, RebuildResult, Step, StepTiming,
};
