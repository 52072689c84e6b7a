//! `mfd describe` — Print the metadata document of a component definition.

use std::path::PathBuf;

use clap::Args;
use manifold_common::config::ManifoldConfig;
use manifold_descriptor::serializer::{metadata_document, services_document};

use crate::output;

/// Arguments for the `describe` command.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Path to the component definition (JSON or YAML).
    pub file: PathBuf,

    /// Print only the services, with URIs relative to this base
    /// (for example a resource URI).
    #[arg(long)]
    pub base_uri: Option<String>,

    /// Print compact JSON instead of indented JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Executes the `describe` command.
///
/// # Errors
///
/// Returns an error if the definition cannot be loaded or built.
pub fn execute(args: DescribeArgs, config: &ManifoldConfig) -> anyhow::Result<()> {
    let (_, built) = super::load_component(&args.file, config)?;
    tracing::info!(component = %built.name(), "describing component");

    let document = match args.base_uri.as_deref() {
        Some(base) => services_document(built.descriptor.services(), base.trim_end_matches('/')),
        None => metadata_document(&built, config),
    };
    println!("{}", output::render(&document, !args.compact)?);
    Ok(())
}
