use graphtext_core::model::LabelSet;

use crate::error::StoreError;
use crate::store::GraphSession;

/// Catalog call listing every label the store knows, one per row.
pub const LABELS_QUERY: &str = "CALL db.labels()";
pub const LABEL_COLUMN: &str = "label";

/// Catalog call listing every property key in use.
pub const PROPERTY_KEYS_QUERY: &str = "CALL db.propertyKeys()";
pub const PROPERTY_KEY_COLUMN: &str = "propertyKey";

/// Lists the names of existing full-text indexes, one per row.
pub const FULLTEXT_INDEXES_QUERY: &str = "SHOW FULLTEXT INDEXES YIELD name RETURN name";
pub const INDEX_NAME_COLUMN: &str = "name";

/// Reads schema facts from the store catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaInspector;

impl SchemaInspector {
    pub fn new() -> Self {
        Self
    }

    /// Distinct labels known to the catalog, including labels no live node
    /// carries any more.
    ///
    /// A failing catalog call is an error, never an empty set: an empty set
    /// would quietly produce an index covering nothing.
    pub fn fetch_labels<S>(&self, session: &mut S) -> Result<LabelSet, StoreError>
    where
        S: GraphSession + ?Sized,
    {
        let labels: LabelSet = session
            .query_column(LABELS_QUERY, LABEL_COLUMN)?
            .into_iter()
            .collect();
        tracing::debug!(count = labels.len(), "Fetched labels");
        Ok(labels)
    }

    /// Property keys known to the catalog, sorted and deduplicated.
    pub fn fetch_property_keys<S>(&self, session: &mut S) -> Result<Vec<String>, StoreError>
    where
        S: GraphSession + ?Sized,
    {
        let mut keys = session.query_column(PROPERTY_KEYS_QUERY, PROPERTY_KEY_COLUMN)?;
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    /// Target properties the catalog has never seen, in the caller's order.
    pub fn unknown_properties<'a, S>(
        &self,
        session: &mut S,
        properties: &'a [String],
    ) -> Result<Vec<&'a str>, StoreError>
    where
        S: GraphSession + ?Sized,
    {
        let known = self.fetch_property_keys(session)?;
        Ok(properties
            .iter()
            .filter(|p| known.binary_search(*p).is_err())
            .map(String::as_str)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use graphtext_core::model::ConnectionConfig;

    use super::*;
    use crate::store::fake::FakeStore;
    use crate::store::GraphStore;

    fn config() -> ConnectionConfig {
        ConnectionConfig::new("bolt://fake:7687", "neo4j", "pw")
    }

    #[test]
    fn test_fetch_labels_dedups_and_sorts() {
        let store = FakeStore::new().with_labels(&["Person", "Organization", "Person"]);
        let mut session = store.connect(&config()).unwrap();

        let labels = SchemaInspector::new().fetch_labels(&mut session).unwrap();

        assert_eq!(
            labels.iter().collect::<Vec<_>>(),
            vec!["Organization", "Person"]
        );
        assert_eq!(store.statements(), vec!["CALL db.labels()"]);
    }

    #[test]
    fn test_fetch_labels_propagates_failure() {
        let store = FakeStore::new()
            .with_labels(&["Person"])
            .failing_on("CALL db.labels", "permission denied");
        let mut session = store.connect(&config()).unwrap();

        let err = SchemaInspector::new().fetch_labels(&mut session).unwrap_err();
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_empty_catalog_is_empty_set() {
        let store = FakeStore::new();
        let mut session = store.connect(&config()).unwrap();

        let labels = SchemaInspector::new().fetch_labels(&mut session).unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn test_unknown_properties_keeps_caller_order() {
        let store = FakeStore::new().with_property_keys(&["name", "id", "id"]);
        let mut session = store.connect(&config()).unwrap();
        let wanted = vec!["summary".to_string(), "id".to_string(), "body".to_string()];

        let unknown = SchemaInspector::new()
            .unknown_properties(&mut session, &wanted)
            .unwrap();
        assert_eq!(unknown, vec!["summary", "body"]);
    }
}
