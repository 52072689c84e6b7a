//! CLI command definitions and dispatch.

pub mod describe;
pub mod marshal;
pub mod order;
pub mod transcode;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use manifold_common::config::ManifoldConfig;
use manifold_descriptor::{BuiltComponent, ComponentDefinition, build};

/// Manifold — component metadata and parameter-schema engine.
#[derive(Parser, Debug)]
#[command(name = "mfd", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON or YAML configuration file.
    #[arg(long, global = true, env = "MANIFOLD_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the metadata document of a component definition.
    Describe(describe::DescribeArgs),
    /// Build a component definition and report any declaration error.
    Validate(validate::ValidateArgs),
    /// Show the argument order of one service.
    Order(order::OrderArgs),
    /// Dry-run a request and print the arguments a handler would receive.
    Marshal(marshal::MarshalArgs),
    /// Decode and re-encode a JSON document.
    Transcode(transcode::TranscodeArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the command
/// fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Describe(args) => describe::execute(args, &config),
        Command::Validate(args) => validate::execute(args, &config),
        Command::Order(args) => order::execute(args, &config),
        Command::Marshal(args) => marshal::execute(args, &config),
        Command::Transcode(args) => transcode::execute(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ManifoldConfig> {
    path.map_or_else(
        || Ok(ManifoldConfig::default()),
        |p| {
            ManifoldConfig::load(p)
                .with_context(|| format!("failed to load configuration from {}", p.display()))
        },
    )
}

/// Loads a definition file and builds its descriptor.
pub(crate) fn load_component(
    file: &Path,
    config: &ManifoldConfig,
) -> anyhow::Result<(ComponentDefinition, BuiltComponent)> {
    let definition = ComponentDefinition::load(file)?;
    let built = build(&definition, config)
        .with_context(|| format!("invalid component definition in {}", file.display()))?;
    Ok((definition, built))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_config_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["mfd", "validate", "c.json", "--config", "m.yaml"])
            .expect("parse");
        assert_eq!(cli.config.as_deref(), Some(Path::new("m.yaml")));
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn sample_definition_builds() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().expect("tempfile");
        std::io::Write::write_all(
            &mut file,
            include_str!("../../../../demos/test_component.yaml").as_bytes(),
        )
        .expect("write");
        let (_, built) = load_component(file.path(), &ManifoldConfig::default()).expect("load");
        let names: Vec<_> = built
            .parameter_order("foobar")
            .expect("order")
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["text", "num"]);
        assert!(built.descriptor.service("status").is_some_and(|s| s.accepts_no_input()));
        let ratio = built.descriptor.service("choices").and_then(|s| s.param("ratio"));
        assert_eq!(
            ratio.and_then(|p| p.default_value()).and_then(|v| v.to_text()).as_deref(),
            Some("0.25")
        );
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(Path::new("/nonexistent/manifold.yaml"))).unwrap_err();
        assert!(err.to_string().contains("failed to load configuration"), "got: {err}");
    }
}
