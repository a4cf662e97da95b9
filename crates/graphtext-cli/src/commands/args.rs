use clap::Args;

use graphtext_core::config::{
    DEFAULT_INDEX_NAME, DEFAULT_PROPERTIES, ENV_DATABASE, ENV_PASSWORD, ENV_URI, ENV_USERNAME,
};
use graphtext_core::{ConnectionConfig, CoreError, RebuildOptions};

#[derive(Args)]
pub struct ConnectionArgs {
    /// Bolt URI of the graph store (e.g. bolt://localhost:7687)
    #[arg(long, env = ENV_URI)]
    pub uri: String,

    /// User to authenticate as
    #[arg(short, long, env = ENV_USERNAME, default_value = "neo4j")]
    pub username: String,

    /// Password for the user
    #[arg(long, env = ENV_PASSWORD, hide_env_values = true)]
    pub password: String,

    /// Database to use (server default when omitted)
    #[arg(short, long, env = ENV_DATABASE)]
    pub database: Option<String>,
}

impl ConnectionArgs {
    /// Parsed flags and environment, checked like any other settings source
    /// (an exported but empty `NEO4J_PASSWORD` is still missing).
    pub fn to_config(&self) -> Result<ConnectionConfig, CoreError> {
        ConnectionConfig::from_lookup(|name| match name {
            ENV_URI => Some(self.uri.clone()),
            ENV_USERNAME => Some(self.username.clone()),
            ENV_PASSWORD => Some(self.password.clone()),
            ENV_DATABASE => self.database.clone(),
            _ => None,
        })
    }
}

#[derive(Args)]
pub struct IndexArgs {
    /// Name of the full-text index
    #[arg(short, long = "index", default_value = DEFAULT_INDEX_NAME)]
    pub index_name: String,

    /// Property to index, in order (repeat or comma-separate)
    #[arg(
        short,
        long = "property",
        value_delimiter = ',',
        default_values = DEFAULT_PROPERTIES
    )]
    pub properties: Vec<String>,

    /// Label to leave out of the index (repeat or comma-separate)
    #[arg(short = 'x', long = "exclude-label", value_delimiter = ',')]
    pub exclude_labels: Vec<String>,
}

impl IndexArgs {
    pub fn to_options(&self) -> RebuildOptions {
        RebuildOptions {
            index_name: self.index_name.clone(),
            properties: self.properties.clone(),
            exclude_labels: self.exclude_labels.clone(),
        }
    }
}
