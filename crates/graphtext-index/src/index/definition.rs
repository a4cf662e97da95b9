use graphtext_core::model::{IndexDefinition, LabelSet};

use crate::error::DefinitionError;

/// Node variable used in the create statement.
const NODE_VAR: &str = "n";

/// Renders index statements. Pure: no I/O, same input, same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexDefinitionBuilder;

impl IndexDefinitionBuilder {
    /// Validate the inputs and render the create statement.
    ///
    /// Labels are emitted in sorted order, each backtick-quoted. Properties
    /// keep the caller's order.
    pub fn build(
        name: &str,
        labels: &LabelSet,
        properties: &[String],
    ) -> Result<IndexDefinition, DefinitionError> {
        validate_inputs(name, properties)?;
        if labels.is_empty() {
            return Err(DefinitionError::NoLabels);
        }

        let label_clause = labels.iter().map(quote).collect::<Vec<_>>().join("|");
        let property_list = properties
            .iter()
            .map(|p| format!("{NODE_VAR}.{}", property_ref(p)))
            .collect::<Vec<_>>()
            .join(", ");

        let statement = format!(
            "CREATE FULLTEXT INDEX {name} FOR ({NODE_VAR}:{label_clause}) ON EACH [{property_list}];"
        );

        Ok(IndexDefinition {
            name: name.to_string(),
            labels: labels.clone(),
            properties: properties.to_vec(),
            statement,
        })
    }

    /// Idempotent drop; a missing index is not an error.
    pub fn drop_statement(name: &str) -> Result<String, DefinitionError> {
        validate_name(name)?;
        Ok(format!("DROP INDEX {name} IF EXISTS;"))
    }
}

/// Checks everything about a definition that does not depend on the
/// catalog, so a run can reject it before touching the store.
pub fn validate_inputs(name: &str, properties: &[String]) -> Result<(), DefinitionError> {
    validate_name(name)?;
    if properties.is_empty() {
        return Err(DefinitionError::NoProperties);
    }
    if properties.iter().any(|p| p.is_empty()) {
        return Err(DefinitionError::EmptyProperty);
    }
    Ok(())
}

/// Index names are spliced into statements unquoted, so only plain
/// identifiers are accepted.
pub fn validate_name(name: &str) -> Result<(), DefinitionError> {
    if name.is_empty() {
        return Err(DefinitionError::EmptyName);
    }
    if !is_plain_identifier(name) {
        return Err(DefinitionError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Backtick-quote an identifier. Embedded backticks are doubled, which is
/// how Cypher escapes them inside a quoted name.
pub fn quote(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

fn property_ref(property: &str) -> String {
    if is_plain_identifier(property) {
        property.to_string()
    } else {
        quote(property)
    }
}
