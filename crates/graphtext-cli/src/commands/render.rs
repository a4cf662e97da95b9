use anyhow::{Context, Result};
use clap::Args;

use graphtext_core::LabelSet;
use graphtext_index::IndexDefinitionBuilder;

use super::args::IndexArgs;
use crate::output::format::format_definition;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct RenderArgs {
    /// Label to cover (repeat or comma-separate)
    #[arg(short, long = "label", value_delimiter = ',', required = true)]
    pub labels: Vec<String>,

    #[command(flatten)]
    pub index: IndexArgs,
}

pub fn run(args: &RenderArgs, format: OutputFormat) -> Result<()> {
    let options = args.index.to_options();
    let mut labels: LabelSet = args.labels.iter().map(String::as_str).collect();
    labels.exclude(&options.exclude_labels);

    let definition =
        IndexDefinitionBuilder::build(&options.index_name, &labels, &options.properties)
            .context("Invalid index definition")?;

    println!("{}", format_definition(&definition, format));
    Ok(())
}
