use anyhow::{Context, Result};

use graphtext_index::{IndexReconciler, Neo4jStore};

use super::rebuild::RebuildArgs;
use crate::output::format::format_rebuild_result;
use crate::output::OutputFormat;

pub fn run(args: &RebuildArgs, format: OutputFormat) -> Result<()> {
    let config = args.connection.to_config()?;
    let options = args.index.to_options();

    match IndexReconciler::new(Neo4jStore::new()).plan(&config, &options) {
        Ok(result) => {
            println!("{}", format_rebuild_result(&result, format));
            Ok(())
        }
        Err(err) => {
            if let OutputFormat::Json = format {
                println!("{}", format_rebuild_result(err.result(), format));
            }
            Err(err).context("Could not plan the full-text index")
        }
    }
}
