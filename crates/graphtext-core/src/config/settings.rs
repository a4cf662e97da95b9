pub const ENV_URI: &str = "NEO4J_URI";
pub const ENV_USERNAME: &str = "NEO4J_USERNAME";
pub const ENV_PASSWORD: &str = "NEO4J_PASSWORD";
pub const ENV_DATABASE: &str = "NEO4J_DATABASE";

/// Index rebuilt when the caller names none.
pub const DEFAULT_INDEX_NAME: &str = "entities";

/// Properties indexed when the caller names none, in index order.
pub const DEFAULT_PROPERTIES: [&str; 2] = ["id", "description"];

/// What to rebuild: the index name, its properties, and labels to leave out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildOptions {
    pub index_name: String,
    /// Order is kept as given; some scoring backends weigh earlier properties.
    pub properties: Vec<String>,
    pub exclude_labels: Vec<String>,
}

impl RebuildOptions {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            ..Self::default()
        }
    }

    /// Replace the property list.
    pub fn properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Leave a label out of the index even if the catalog lists it.
    pub fn exclude_label(mut self, label: impl Into<String>) -> Self {
        self.exclude_labels.push(label.into());
        self
    }
}

impl Default for RebuildOptions {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            properties: DEFAULT_PROPERTIES.iter().map(|p| p.to_string()).collect(),
            exclude_labels: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_entities_index() {
        let opts = RebuildOptions::default();
        assert_eq!(opts.index_name, "entities");
        assert_eq!(opts.properties, vec!["id", "description"]);
        assert!(opts.exclude_labels.is_empty());
    }

    #[test]
    fn test_builder_keeps_property_order() {
        let opts = RebuildOptions::new("docs")
            .properties(["title", "body", "id"])
            .exclude_label("__Chunk__");
        assert_eq!(opts.index_name, "docs");
        assert_eq!(opts.properties, vec!["title", "body", "id"]);
        assert_eq!(opts.exclude_labels, vec!["__Chunk__"]);
    }
}
