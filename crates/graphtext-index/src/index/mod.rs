pub mod definition;
pub mod rebuild;
pub mod schema;

pub use definition::IndexDefinitionBuilder;
pub use rebuild::{rebuild_fulltext_index, IndexReconciler, RebuildState};
pub use schema::SchemaInspector;
