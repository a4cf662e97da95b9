use std::time::{Duration, Instant};

use graphtext_core::config::RebuildOptions;
use graphtext_core::model::{
    ConnectionConfig, IndexDefinition, LabelSet, Outcome, RebuildResult, Step, StepTiming,
};

use super::definition::{validate_inputs, IndexDefinitionBuilder};
use super::schema::{SchemaInspector, FULLTEXT_INDEXES_QUERY, INDEX_NAME_COLUMN};
use crate::error::{RebuildError, RebuildErrorKind, StoreError};
use crate::store::{GraphSession, GraphStore, Neo4jStore, SessionGuard};

/// Where a rebuild attempt currently is.
///
/// Runs move strictly forward through the steps; any step may instead end
/// in `Failed`, after which nothing else is sent to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildState {
    Idle,
    Connecting,
    Dropping,
    Inspecting,
    Building,
    Creating,
    Done,
    Failed(Step),
}

impl From<Step> for RebuildState {
    fn from(step: Step) -> Self {
        match step {
            Step::Connecting => RebuildState::Connecting,
            Step::Dropping => RebuildState::Dropping,
            Step::Inspecting => RebuildState::Inspecting,
            Step::Building => RebuildState::Building,
            Step::Creating => RebuildState::Creating,
        }
    }
}

/// Rebuilds one named full-text index so it covers every label currently in
/// the catalog.
///
/// Each call is independent and holds no state between runs. Two rebuilds
/// of the same index name must not overlap: drop and create are separate
/// statements, so callers serialize them (for example with a lock keyed by
/// index name). No step is retried here; retrying is up to the caller.
#[derive(Debug, Clone, Default)]
pub struct IndexReconciler<G> {
    store: G,
    inspector: SchemaInspector,
}

impl<G: GraphStore> IndexReconciler<G> {
    pub fn new(store: G) -> Self {
        Self {
            store,
            inspector: SchemaInspector::new(),
        }
    }

    /// Drop the index if present, then recreate it over the current labels.
    ///
    /// On failure the store is left as the last successful step put it: if
    /// the drop went through and the create did not, the index stays absent
    /// until the next successful rebuild.
    pub fn rebuild(
        &self,
        config: &ConnectionConfig,
        options: &RebuildOptions,
    ) -> Result<RebuildResult, RebuildError> {
        let mut attempt = Attempt::new(&options.index_name, false);
        let span = tracing::info_span!(
            "rebuild",
            index = %options.index_name,
            run_id = %attempt.result.run_id
        );
        let _entered = span.enter();
        tracing::info!("Starting full-text index rebuild");

        // A definition that can never be built must not cost the live index.
        if let Err(kind) = Self::precheck(&mut attempt, options) {
            return Err(attempt.fail(Step::Building, kind));
        }

        let mut session = match attempt.step(Step::Connecting, || self.store.connect(config)) {
            Ok(session) => SessionGuard::new(session),
            Err(e) => return Err(attempt.fail(Step::Connecting, RebuildErrorKind::Connection(e))),
        };

        let applied = self.apply(&mut attempt, &mut *session, options);
        session.close();

        match applied {
            Ok(()) => Ok(attempt.finish()),
            Err(kind) => {
                let step = attempt.current_step();
                Err(attempt.fail(step, kind))
            }
        }
    }

    /// Dry run: connect, inspect and build, but never drop or create.
    pub fn plan(
        &self,
        config: &ConnectionConfig,
        options: &RebuildOptions,
    ) -> Result<RebuildResult, RebuildError> {
        let mut attempt = Attempt::new(&options.index_name, true);
        let span = tracing::info_span!(
            "plan",
            index = %options.index_name,
            run_id = %attempt.result.run_id
        );
        let _entered = span.enter();

        if let Err(kind) = Self::precheck(&mut attempt, options) {
            return Err(attempt.fail(Step::Building, kind));
        }

        let mut session = match attempt.step(Step::Connecting, || self.store.connect(config)) {
            Ok(session) => SessionGuard::new(session),
            Err(e) => return Err(attempt.fail(Step::Connecting, RebuildErrorKind::Connection(e))),
        };

        let planned = self
            .inspect(&mut attempt, &mut *session, options)
            .and_then(|labels| Self::build(&mut attempt, &labels, options));
        session.close();

        match planned {
            Ok(_) => Ok(attempt.finish()),
            Err(kind) => {
                let step = attempt.current_step();
                Err(attempt.fail(step, kind))
            }
        }
    }

    /// Reject a bad name or property list before connecting. Only a
    /// rejection is recorded, as a failed `building` step.
    fn precheck(attempt: &mut Attempt, options: &RebuildOptions) -> Result<(), RebuildErrorKind> {
        let started = Instant::now();
        validate_inputs(&options.index_name, &options.properties).map_err(|e| {
            attempt.transition(RebuildState::Building);
            attempt.record(Step::Building, started.elapsed(), false);
            RebuildErrorKind::InvalidDefinition(e)
        })
    }

    fn apply<S: GraphSession>(
        &self,
        attempt: &mut Attempt,
        session: &mut S,
        options: &RebuildOptions,
    ) -> Result<(), RebuildErrorKind> {
        let name = &options.index_name;

        let dropped_existing = attempt
            .step(Step::Dropping, || {
                let existed = index_exists(session, name);
                let statement = IndexDefinitionBuilder::drop_statement(name)
                    .map_err(RebuildErrorKind::InvalidDefinition)?;
                session
                    .run(&statement)
                    .map_err(RebuildErrorKind::StatementExecution)?;
                Ok::<_, RebuildErrorKind>(existed)
            })?;
        attempt.result.dropped_existing = dropped_existing;

        let labels = self.inspect(attempt, session, options)?;
        let definition = Self::build(attempt, &labels, options)?;

        attempt
            .step(Step::Creating, || session.run(&definition.statement))
            .map_err(RebuildErrorKind::StatementExecution)?;

        Ok(())
    }

    fn inspect<S: GraphSession>(
        &self,
        attempt: &mut Attempt,
        session: &mut S,
        options: &RebuildOptions,
    ) -> Result<LabelSet, RebuildErrorKind> {
        let inspector = self.inspector;
        let (mut labels, found) = attempt
            .step(Step::Inspecting, || {
                let labels = inspector.fetch_labels(session)?;
                let found = labels.len();

                // Advisory only: indexing a property nobody has set is legal.
                match inspector.unknown_properties(session, &options.properties) {
                    Ok(unknown) if !unknown.is_empty() => tracing::warn!(
                        properties = ?unknown,
                        "Target properties not present in the catalog"
                    ),
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Could not read property keys: {e}"),
                }
                Ok::<_, StoreError>((labels, found))
            })
            .map_err(RebuildErrorKind::SchemaQuery)?;

        attempt.result.labels_found = found;
        let excluded = labels.exclude(&options.exclude_labels);
        if excluded > 0 {
            tracing::info!(excluded, remaining = labels.len(), "Excluded labels");
        }
        Ok(labels)
    }

    fn build(
        attempt: &mut Attempt,
        labels: &LabelSet,
        options: &RebuildOptions,
    ) -> Result<IndexDefinition, RebuildErrorKind> {
        let definition = attempt
            .step(Step::Building, || {
                IndexDefinitionBuilder::build(&options.index_name, labels, &options.properties)
            })
            .map_err(RebuildErrorKind::InvalidDefinition)?;
        tracing::debug!(statement = %definition.statement, "Built index definition");
        attempt.result.definition = Some(definition.clone());
        Ok(definition)
    }
}

/// Rebuild `options.index_name` on a Neo4j server.
///
/// Defaults (`RebuildOptions::default()`) rebuild the `entities` index over
/// `id` and `description`.
///
/// Blocking: call it from synchronous code (or `spawn_blocking`), never
/// directly from an async task, since the driver runs on a runtime owned by
/// the session.
pub fn rebuild_fulltext_index(
    config: &ConnectionConfig,
    options: &RebuildOptions,
) -> Result<RebuildResult, RebuildError> {
    IndexReconciler::new(Neo4jStore::new()).rebuild(config, options)
}

/// Best-effort existence probe. Only feeds `dropped_existing`; the drop that
/// follows is idempotent either way.
fn index_exists<S: GraphSession>(session: &mut S, name: &str) -> bool {
    match session.query_column(FULLTEXT_INDEXES_QUERY, INDEX_NAME_COLUMN) {
        Ok(names) => names.iter().any(|n| n == name),
        Err(e) => {
            tracing::warn!("Could not list existing full-text indexes: {e}");
            false
        }
    }
}

/// Bookkeeping for one run: state, per-step timings, and the result so far.
struct Attempt {
    state: RebuildState,
    started: Instant,
    result: RebuildResult,
}

impl Attempt {
    fn new(index_name: &str, dry_run: bool) -> Self {
        Self {
            state: RebuildState::Idle,
            started: Instant::now(),
            result: RebuildResult::new(index_name, dry_run),
        }
    }

    fn transition(&mut self, next: RebuildState) {
        tracing::trace!(from = ?self.state, to = ?next, "State change");
        self.state = next;
    }

    /// Step currently entered. Only meaningful once a step has started.
    fn current_step(&self) -> Step {
        match self.state {
            RebuildState::Idle | RebuildState::Connecting => Step::Connecting,
            RebuildState::Dropping => Step::Dropping,
            RebuildState::Inspecting => Step::Inspecting,
            RebuildState::Building => Step::Building,
            RebuildState::Creating | RebuildState::Done => Step::Creating,
            RebuildState::Failed(step) => step,
        }
    }

    /// Enter `step`, run it, and record how long it took.
    fn step<T, E>(&mut self, step: Step, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        self.transition(step.into());
        let start = Instant::now();
        let out = f();
        let duration = start.elapsed();

        self.record(step, duration, out.is_ok());
        if out.is_ok() {
            tracing::info!(
                step = %step,
                duration_ms = duration.as_secs_f64() * 1000.0,
                "Step completed"
            );
        }
        out
    }

    fn record(&mut self, step: Step, duration: Duration, succeeded: bool) {
        self.result.step_durations.push(StepTiming {
            step,
            duration,
            succeeded,
        });
    }

    fn finish(mut self) -> RebuildResult {
        self.transition(RebuildState::Done);
        self.result.total = self.started.elapsed();
        tracing::info!(
            labels = self.result.labels_found,
            total_ms = self.result.total.as_secs_f64() * 1000.0,
            dry_run = self.result.dry_run,
            "Full-text index {} {}",
            self.result.index_name,
            if self.result.dry_run { "planned" } else { "rebuilt" }
        );
        self.result
    }

    fn fail(mut self, step: Step, kind: RebuildErrorKind) -> RebuildError {
        self.transition(RebuildState::Failed(step));
        self.result.total = self.started.elapsed();
        self.result.outcome = Outcome::Failure {
            step,
            reason: kind.to_string(),
        };
        tracing::error!(step = %step, "Rebuild failed: {kind}");
        RebuildError::new(step, kind, self.result)
    }
}
