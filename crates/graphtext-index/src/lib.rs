//! Rebuild a graph store's full-text index so it covers every node label in
//! the catalog.
//!
//! # Example
//! ```no_run
//! use graphtext_core::{ConnectionConfig, RebuildOptions};
//! use graphtext_index::rebuild_fulltext_index;
//!
//! let config = ConnectionConfig::new("bolt://localhost:7687", "neo4j", "password");
//! let result = rebuild_fulltext_index(&config, &RebuildOptions::default()).unwrap();
//! println!("{}", result.definition.unwrap().statement);
//! ```

pub mod error;
pub mod index;
pub mod store;

pub use error::{DefinitionError, RebuildError, RebuildErrorKind, StoreError};
pub use index::{
    rebuild_fulltext_index, IndexDefinitionBuilder, IndexReconciler, RebuildState,
    SchemaInspector,
};
pub use store::{GraphSession, GraphStore, Neo4jStore, SessionGuard};
