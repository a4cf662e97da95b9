use graphtext_core::model::{RebuildResult, Step};

/// Failures reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Statement `{statement}` failed: {message}")]
    Statement { statement: String, message: String },

    #[error("Unexpected row shape: {0}")]
    Row(String),

    #[error("Session already closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons an index definition is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("Index name is empty")]
    EmptyName,

    #[error("Invalid index name `{0}`: use letters, digits and underscores, not starting with a digit")]
    InvalidName(String),

    #[error("At least one property is required")]
    NoProperties,

    #[error("Property names must not be empty")]
    EmptyProperty,

    #[error("No labels to index (the store has no label-less full-text indexes)")]
    NoLabels,
}

/// Why a rebuild stopped.
#[derive(Debug, thiserror::Error)]
pub enum RebuildErrorKind {
    #[error("Connection error: {0}")]
    Connection(#[source] StoreError),

    #[error("Schema query error: {0}")]
    SchemaQuery(#[source] StoreError),

    #[error("Invalid definition: {0}")]
    InvalidDefinition(#[source] DefinitionError),

    #[error("Statement execution error: {0}")]
    StatementExecution(#[source] StoreError),
}

/// A failed rebuild: the step that failed, the cause, and the diagnostics
/// gathered up to that point.
#[derive(Debug, thiserror::Error)]
#[error("Rebuild of index `{}` failed while {step}: {kind}", .result.index_name)]
pub struct RebuildError {
    step: Step,
    #[source]
    kind: RebuildErrorKind,
    result: Box<RebuildResult>,
}

impl RebuildError {
    pub(crate) fn new(step: Step, kind: RebuildErrorKind, result: RebuildResult) -> Self {
        Self {
            step,
            kind,
            result: Box::new(result),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn kind(&self) -> &RebuildErrorKind {
        &self.kind
    }

    /// Diagnostics for the failed run. `outcome` is always a failure.
    pub fn result(&self) -> &RebuildResult {
        &self.result
    }

    pub fn into_result(self) -> RebuildResult {
        *self.result
    }
}
