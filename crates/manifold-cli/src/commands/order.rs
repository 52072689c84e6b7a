//! `mfd order` — Show the argument order of one service.

use std::path::PathBuf;

use clap::Args;
use manifold_common::config::ManifoldConfig;

use crate::output;

/// Arguments for the `order` command.
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Path to the component definition (JSON or YAML).
    pub file: PathBuf,

    /// Service name.
    pub service: String,
}

/// Executes the `order` command.
///
/// # Errors
///
/// Returns an error if the definition does not build or the service is
/// unknown.
pub fn execute(args: OrderArgs, config: &ManifoldConfig) -> anyhow::Result<()> {
    let (_, built) = super::load_component(&args.file, config)?;
    let slots = built.parameter_order(&args.service)?;
    if slots.is_empty() {
        println!("{} takes no parameters.", args.service);
        return Ok(());
    }
    for (index, slot) in slots.iter().enumerate() {
        println!("{}", output::format_slot(index, slot));
    }
    Ok(())
}
