pub mod args;
pub mod plan;
pub mod rebuild;
pub mod render;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Drop the full-text index and recreate it over every label in the catalog
    Rebuild(rebuild::RebuildArgs),
    /// Show the index a rebuild would create, without dropping or creating anything
    Plan(rebuild::RebuildArgs),
    /// Render the create statement for the given labels (no database needed)
    Render(render::RenderArgs),
}
