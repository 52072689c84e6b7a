//! `mfd transcode` — Decode and re-encode a JSON document.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::output;

/// Arguments for the `transcode` command.
#[derive(Args, Debug)]
pub struct TranscodeArgs {
    /// JSON file to read. Reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Print indented JSON.
    #[arg(long)]
    pub pretty: bool,
}

/// Executes the `transcode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not valid JSON.
pub fn execute(args: TranscodeArgs) -> anyhow::Result<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            let _ = std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let value = manifold_value::deserialize(&text)?;
    println!("{}", output::render(&value, args.pretty)?);
    Ok(())
}
