use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Distinct node labels seen in the store catalog at inspection time.
///
/// Backed by an ordered set, so iteration is always lexicographic and the
/// statement rendered from it is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        self.0.insert(label.into())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// Drop every label named in `excluded`, returning how many were removed.
    pub fn exclude<S: AsRef<str>>(&mut self, excluded: &[S]) -> usize {
        let before = self.0.len();
        for label in excluded {
            self.0.remove(label.as_ref());
        }
        before - self.0.len()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A validated full-text index definition together with its rendered
/// create statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub name: String,
    pub labels: LabelSet,
    pub properties: Vec<String>,
    pub statement: String,
}
