pub mod connection;
pub mod definition;
pub mod result;

pub use connection::ConnectionConfig;
pub use definition::{IndexDefinition, LabelSet};
pub use result::{Outcome, RebuildResult, Step, StepTiming};
