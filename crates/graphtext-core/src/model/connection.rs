use crate::config::{ENV_DATABASE, ENV_PASSWORD, ENV_URI, ENV_USERNAME};
use crate::error::CoreError;

/// Where and how to reach the graph store.
///
/// Supplied by the caller for every rebuild and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    uri: String,
    username: String,
    password: String,
    database: Option<String>,
}

impl ConnectionConfig {
    pub fn new(
        uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            username: username.into(),
            password: password.into(),
            database: None,
        }
    }

    /// Target a named database instead of the server default.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        let database = database.into();
        self.database = if database.is_empty() {
            None
        } else {
            Some(database)
        };
        self
    }

    /// Build from named settings (`NEO4J_URI`, `NEO4J_USERNAME`,
    /// `NEO4J_PASSWORD`, optional `NEO4J_DATABASE`). Absent or empty required
    /// values are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| CoreError::MissingSetting { name: name.into() })
        };

        let config = Self::new(
            required(ENV_URI)?,
            required(ENV_USERNAME)?,
            required(ENV_PASSWORD)?,
        );
        Ok(match lookup(ENV_DATABASE) {
            Some(db) => config.with_database(db),
            None => config,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}
