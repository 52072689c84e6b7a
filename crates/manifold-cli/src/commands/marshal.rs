//! `mfd marshal` — Dry-run a request against a component definition.
//!
//! The definition is registered with echo handlers that return the
//! arguments they receive, so the output shows exactly what a real
//! handler would be called with.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use manifold_common::config::ManifoldConfig;
use manifold_common::types::HttpMethod;
use manifold_dispatch::{CallContext, ComponentRegistry, Dispatcher, ServiceRequest, ServiceResult};
use manifold_sdk::native::NativeComponent;
use manifold_value::{Map, Value};

use crate::output;

/// Arguments for the `marshal` command.
#[derive(Args, Debug)]
pub struct MarshalArgs {
    /// Path to the component definition (JSON or YAML).
    pub file: PathBuf,

    /// Service name.
    pub service: String,

    /// Named parameters, as `NAME=VALUE`.
    #[arg(value_parser = parse_assignment)]
    pub params: Vec<(String, String)>,

    /// Positional URL segment (repeatable, in order).
    #[arg(long = "segment")]
    pub segments: Vec<String>,

    /// Request body.
    #[arg(long)]
    pub body: Option<String>,

    /// Content type of the body.
    #[arg(long, default_value = "application/json")]
    pub content_type: String,

    /// HTTP method.
    #[arg(long, default_value = "GET")]
    pub method: HttpMethod,
}

/// Executes the `marshal` command.
///
/// # Errors
///
/// Returns an error if the definition does not build or the request is
/// rejected.
pub fn execute(args: MarshalArgs, config: &ManifoldConfig) -> anyhow::Result<()> {
    let (definition, _) = super::load_component(&args.file, config)?;
    let echo = definition
        .services
        .iter()
        .fold(NativeComponent::new(definition.clone()), |component, service| {
            component.handler(service.name.clone(), echo_arguments)
        });

    let mut registry = ComponentRegistry::new(config.clone());
    let component = registry.register(Arc::new(echo))?;

    let mut request = ServiceRequest::new(args.service).method(args.method);
    request.segments = args.segments;
    request.query = args.params.into_iter().collect();
    if let Some(body) = args.body {
        request = request.body(args.content_type, body);
    }

    let result = Dispatcher::new().dispatch(&component, None, &request);
    if !result.is_success() {
        let message = result
            .entity
            .as_ref()
            .and_then(Value::to_text)
            .unwrap_or_default();
        anyhow::bail!("request rejected with status {}: {message}", result.status);
    }

    for line in output::format_arguments(result.entity.as_ref())? {
        println!("{line}");
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn echo_arguments(ctx: &CallContext) -> manifold_common::error::Result<ServiceResult> {
    let arguments: Vec<Value> = ctx
        .arguments()
        .iter()
        .map(|arg| {
            let mut entry = Map::new();
            let _ = entry.insert("name".into(), Value::from(arg.name.as_str()));
            let _ = entry.insert("value".into(), arg.value.clone());
            Value::Map(entry)
        })
        .collect();
    Ok(ServiceResult::ok(arguments))
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}
