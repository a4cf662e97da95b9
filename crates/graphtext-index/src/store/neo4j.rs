use neo4rs::{query, ConfigBuilder, Graph};
use tokio::runtime::Runtime;

use graphtext_core::model::ConnectionConfig;

use super::{GraphSession, GraphStore};
use crate::error::StoreError;

/// Cheap round trip used to prove the credentials work at connect time.
/// The driver's pool connects lazily, so without it a bad password would
/// only surface at the first real statement.
const PING: &str = "RETURN 1";

/// Neo4j over Bolt, via `neo4rs`.
///
/// Sessions block on a runtime of their own, so they must be opened and used
/// from synchronous code. Calling in from inside a tokio runtime panics; use
/// `tokio::task::spawn_blocking` there.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neo4jStore;

impl Neo4jStore {
    pub fn new() -> Self {
        Self
    }
}

impl GraphStore for Neo4jStore {
    type Session = Neo4jSession;

    fn connect(&self, config: &ConnectionConfig) -> Result<Neo4jSession, StoreError> {
        // The driver is async; a current-thread runtime keeps every call
        // blocking and strictly ordered.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut builder = ConfigBuilder::default()
            .uri(config.uri())
            .user(config.username())
            .password(config.password());
        if let Some(db) = config.database() {
            builder = builder.db(db);
        }
        let driver_config = builder
            .build()
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        let graph = runtime
            .block_on(async {
                let graph = Graph::connect(driver_config).await?;
                graph.run(query(PING)).await?;
                Ok::<_, neo4rs::Error>(graph)
            })
            .map_err(|e| StoreError::Connect(format!("{}: {e}", config.uri())))?;

        tracing::debug!(
            uri = config.uri(),
            database = config.database().unwrap_or("<default>"),
            "Connected to Neo4j"
        );

        Ok(Neo4jSession {
            runtime,
            graph: Some(graph),
        })
    }
}

/// A connected driver plus the runtime that drives it.
pub struct Neo4jSession {
    runtime: Runtime,
    graph: Option<Graph>,
}

impl Neo4jSession {
    fn graph(&self) -> Result<&Graph, StoreError> {
        self.graph.as_ref().ok_or(StoreError::Closed)
    }
}

fn statement_error(statement: &str, e: impl std::fmt::Display) -> StoreError {
    StoreError::Statement {
        statement: statement.to_string(),
        message: e.to_string(),
    }
}

impl GraphSession for Neo4jSession {
    fn run(&mut self, statement: &str) -> Result<(), StoreError> {
        let graph = self.graph()?;
        self.runtime
            .block_on(graph.run(query(statement)))
            .map_err(|e| statement_error(statement, e))
    }

    fn query_column(&mut self, statement: &str, column: &str) -> Result<Vec<String>, StoreError> {
        let graph = self.graph()?;
        self.runtime.block_on(async {
            let mut rows = graph
                .execute(query(statement))
                .await
                .map_err(|e| statement_error(statement, e))?;

            let mut values = Vec::new();
            while let Some(row) = rows
                .next()
                .await
                .map_err(|e| statement_error(statement, e))?
            {
                let value: String = row
                    .get(column)
                    .map_err(|e| StoreError::Row(format!("column `{column}`: {e}")))?;
                values.push(value);
            }
            Ok(values)
        })
    }

    fn close(&mut self) {
        // Dropping the graph drains its connection pool.
        self.graph.take();
    }
}
