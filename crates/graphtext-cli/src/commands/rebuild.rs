use anyhow::{Context, Result};
use clap::Args;

use graphtext_index::{IndexReconciler, Neo4jStore};

use super::args::{ConnectionArgs, IndexArgs};
use crate::output::format::format_rebuild_result;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct RebuildArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub index: IndexArgs,
}

pub fn run(args: &RebuildArgs, format: OutputFormat) -> Result<()> {
    let config = args.connection.to_config()?;
    let options = args.index.to_options();
    let reconciler = IndexReconciler::new(Neo4jStore::new());

    eprintln!("Rebuilding full-text index `{}`...", options.index_name);
    match reconciler.rebuild(&config, &options) {
        Ok(result) => {
            println!("{}", format_rebuild_result(&result, format));
            Ok(())
        }
        Err(err) => {
            if let OutputFormat::Json = format {
                println!("{}", format_rebuild_result(err.result(), format));
            }
            Err(err).context("Full-text index rebuild failed")
        }
    }
}
