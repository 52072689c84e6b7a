//! Formatted output helpers for CLI commands.

use manifold_descriptor::ParameterSlot;
use manifold_value::Value;

/// Encodes a value as JSON, indented when `pretty` is set.
///
/// # Errors
///
/// Returns an error if a number cannot be encoded.
pub fn render(value: &Value, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        manifold_value::serialize_pretty(value)?
    } else {
        manifold_value::serialize(value)?
    };
    Ok(text)
}

/// Formats one call-order slot, e.g. `  1. text (string)`.
#[must_use]
pub fn format_slot(index: usize, slot: &ParameterSlot) -> String {
    format!("{:>3}. {} ({})", index + 1, slot.name, slot.kind)
}

/// Formats an echoed argument list as `name = json` lines.
///
/// # Errors
///
/// Returns an error if the entity is not an argument list.
pub fn format_arguments(entity: Option<&Value>) -> anyhow::Result<Vec<String>> {
    let Some(items) = entity.and_then(Value::as_list) else {
        anyhow::bail!("handler returned no argument list");
    };
    items
        .iter()
        .map(|item| -> anyhow::Result<String> {
            let name = item.get("name").and_then(Value::as_str).unwrap_or_default();
            let value = item.get("value").cloned().unwrap_or_default();
            Ok(format!("{name} = {}", manifold_value::serialize(&value)?))
        })
        .collect()
}
