//! `mfd validate` — Build a component definition and report the outcome.

use std::path::PathBuf;

use clap::Args;
use manifold_common::config::ManifoldConfig;

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the component definition (JSON or YAML).
    pub file: PathBuf,
}

/// Executes the `validate` command.
///
/// # Errors
///
/// Returns the declaration error if the definition does not build.
pub fn execute(args: ValidateArgs, config: &ManifoldConfig) -> anyhow::Result<()> {
    let (_, built) = super::load_component(&args.file, config)?;
    let descriptor = &built.descriptor;
    println!(
        "\u{2713} {} is valid: {} creation parameter(s), {} service(s)",
        descriptor.name(),
        descriptor.params().len(),
        descriptor.services().len()
    );
    for (name, service) in descriptor.services() {
        println!("    {name} ({} parameter(s))", service.params().len());
    }
    Ok(())
}
