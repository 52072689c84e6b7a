//! Declarative component definitions.
//!
//! A definition is what a component author writes: the component's name and
//! documentation, its resource-creation parameters and its services. It is
//! plain data and is validated only when the builder turns it into a
//! descriptor.
//!
//! Definitions are usually assembled in code through the SDK builders, but
//! can also be loaded from JSON or YAML:
//!
//! ```yaml
//! info:
//!   name: TestComponent
//!   desc: Demonstrates positional parameters
//! params:
//!   - name: api_key
//!     type: password
//!     desc: Key for the backend
//! services:
//!   - name: foobar
//!     desc: Some service
//!     positional_params: [num]
//!     params:
//!       - { name: text, type: string, desc: A text }
//!       - { name: num, type: number, desc: A number, default: 10 }
//! ```

use std::path::Path;

use manifold_common::error::{ManifoldError, Result};
use manifold_params::ParameterType;
use serde::{Deserialize, Deserializer};

/// Root of a component declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComponentDefinition {
    /// Name and documentation. Required by the builder.
    #[serde(default)]
    pub info: Option<ComponentInfo>,
    /// Parameters supplied when a resource is created from the component.
    #[serde(default)]
    pub params: Vec<ParameterDecl>,
    /// Callable services, in declaration order.
    #[serde(default)]
    pub services: Vec<ServiceDecl>,
}

/// Name and documentation of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComponentInfo {
    /// Unique component name.
    pub name: String,
    /// One-line description.
    #[serde(default)]
    pub desc: String,
    /// Longer documentation.
    #[serde(default)]
    pub doc: String,
}

/// One declared parameter.
///
/// A parameter without a default is required. A parameter with a default is
/// optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParameterDecl {
    /// Parameter name, unique within its owner.
    pub name: String,
    /// Declared kind.
    #[serde(rename = "type")]
    pub kind: ParameterType,
    /// Human description.
    #[serde(default)]
    pub desc: String,
    /// Default literal, in textual form.
    #[serde(default, deserialize_with = "scalar_literal")]
    pub default: Option<String>,
    /// Permitted values, in textual form.
    #[serde(default, deserialize_with = "scalar_literals")]
    pub choices: Option<Vec<String>>,
    /// Whether the parameter may also be supplied as a URL path segment.
    #[serde(default)]
    pub positional: bool,
}

impl ParameterDecl {
    /// A parameter of the given kind with no default, choices or position.
    pub fn new(name: impl Into<String>, kind: ParameterType, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            desc: desc.into(),
            default: None,
            choices: None,
            positional: false,
        }
    }
}

/// One declared service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceDecl {
    /// Service name, unique within the component.
    pub name: String,
    /// Human description.
    #[serde(default)]
    pub desc: String,
    /// Whether parameters may also arrive in a JSON request body.
    #[serde(default, alias = "allow_params_in_body")]
    pub params_in_body: bool,
    /// Single output content type, listed before `output_types`.
    #[serde(default)]
    pub output_type: Option<String>,
    /// Output content types.
    #[serde(default)]
    pub output_types: Vec<String>,
    /// Single input content type, listed before `input_types`.
    #[serde(default)]
    pub input_type: Option<String>,
    /// Input content types. A `null` entry means the service takes no input.
    /// Absent means the process-wide defaults apply.
    #[serde(default)]
    pub input_types: Option<Vec<Option<String>>>,
    /// Names of parameters that may be supplied positionally, in URL order.
    /// Parameters flagged `positional` are appended after these.
    #[serde(default)]
    pub positional_params: Vec<String>,
    /// Parameters, in declaration (call) order.
    #[serde(default)]
    pub params: Vec<ParameterDecl>,
}

impl ServiceDecl {
    /// Output types as declared: the singular form first, then the list.
    #[must_use]
    pub fn declared_output_types(&self) -> Vec<String> {
        self.output_type
            .iter()
            .chain(&self.output_types)
            .cloned()
            .collect()
    }

    /// Input types as declared, or `None` when nothing was declared.
    #[must_use]
    pub fn declared_input_types(&self) -> Option<Vec<Option<String>>> {
        match (&self.input_type, &self.input_types) {
            (None, None) => None,
            (single, list) => Some(
                single
                    .iter()
                    .cloned()
                    .map(Some)
                    .chain(list.iter().flatten().cloned())
                    .collect(),
            ),
        }
    }

    /// Positional names: the explicit list, then flagged parameters.
    #[must_use]
    pub fn declared_positionals(&self) -> Vec<String> {
        let mut names = self.positional_params.clone();
        for param in self.params.iter().filter(|p| p.positional) {
            if !names.contains(&param.name) {
                names.push(param.name.clone());
            }
        }
        names
    }
}

impl ComponentDefinition {
    /// Parses a definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::Deserialization`] if the text does not match
    /// the definition format.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a definition from YAML text.
    ///
    /// YAML reads unquoted non-integer numbers as binary floats, so a
    /// `default` or `choices` entry written that way is rejected. Decimal
    /// literals must be quoted (`default: "0.1"`).
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::Deserialization`] if the text does not match
    /// the definition format, or [`ManifoldError::Config`] for an unquoted
    /// non-integer literal.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let yaml_error = |e: serde_yaml::Error| {
            let (line, column) = e.location().map_or((0, 0), |l| (l.line(), l.column()));
            ManifoldError::Deserialization {
                message: e.to_string(),
                line,
                column,
            }
        };
        let definition: Self = serde_yaml::from_str(text).map_err(yaml_error)?;
        let raw: serde_yaml::Value = serde_yaml::from_str(text).map_err(yaml_error)?;
        check_yaml_literals(&raw)?;
        Ok(definition)
    }

    /// Loads a definition file. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading component definition");
        let content = std::fs::read_to_string(path).map_err(|e| ManifoldError::io(path, e))?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// The declared component name, if `info` is present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.info.as_ref().map(|info| info.name.as_str())
    }
}

fn check_yaml_literals(raw: &serde_yaml::Value) -> Result<()> {
    check_yaml_params(raw.get("params"), "params")?;
    let services = raw.get("services").and_then(serde_yaml::Value::as_sequence);
    for (index, service) in services.into_iter().flatten().enumerate() {
        check_yaml_params(service.get("params"), &format!("services[{index}].params"))?;
    }
    Ok(())
}

fn check_yaml_params(params: Option<&serde_yaml::Value>, path: &str) -> Result<()> {
    let params = params.and_then(serde_yaml::Value::as_sequence);
    for (index, param) in params.into_iter().flatten().enumerate() {
        if let Some(default) = param.get("default") {
            check_yaml_number(default, &format!("{path}[{index}].default"))?;
        }
        let choices = param.get("choices").and_then(serde_yaml::Value::as_sequence);
        for (choice_index, choice) in choices.into_iter().flatten().enumerate() {
            check_yaml_number(choice, &format!("{path}[{index}].choices[{choice_index}]"))?;
        }
    }
    Ok(())
}

fn check_yaml_number(value: &serde_yaml::Value, path: &str) -> Result<()> {
    match value {
        serde_yaml::Value::Number(n) if n.is_f64() => Err(ManifoldError::config(format!(
            "{path}: unquoted number {n} is read as a binary float and loses precision; \
             quote decimal literals, e.g. \"0.1\""
        ))),
        _ => Ok(()),
    }
}

fn literal_text<E: serde::de::Error>(value: serde_json::Value) -> std::result::Result<String, E> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(E::custom(format!("expected a scalar literal, found {other}"))),
    }
}

fn scalar_literal<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde_json::Value>::deserialize(deserializer)?
        .filter(|v| !v.is_null())
        .map(literal_text)
        .transpose()
}

fn scalar_literals<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<serde_json::Value>>::deserialize(deserializer)?
        .map(|items| items.into_iter().map(literal_text).collect())
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const YAML: &str = "
info:
  name: TestComponent
  desc: Demonstrates positional parameters
params:
  - name: api_key
    type: password
    desc: Key for the backend
services:
  - name: foobar
    desc: Some service
    positional_params: [num]
    params:
      - { name: text, type: string, desc: A text }
      - { name: num, type: number, desc: A number, default: 10 }
";

    #[test]
    fn yaml_definition_parses_with_numeric_default() {
        let def = ComponentDefinition::from_yaml_str(YAML).expect("parse");
        assert_eq!(def.name(), Some("TestComponent"));
        assert_eq!(def.params[0].kind, ParameterType::Password);
        let service = &def.services[0];
        assert_eq!(service.params[1].default.as_deref(), Some("10"));
        assert_eq!(service.declared_positionals(), vec!["num".to_string()]);
    }

    #[test]
    fn yaml_unquoted_decimal_default_is_rejected() {
        let text = "
info: { name: C }
services:
  - name: s
    params:
      - { name: ratio, type: number, default: 1.00000000000000000001 }
";
        let err = ComponentDefinition::from_yaml_str(text).unwrap_err();
        assert!(matches!(err, ManifoldError::Config { .. }), "got: {err}");
        let msg = err.to_string();
        assert!(msg.contains("services[0].params[0].default"), "got: {msg}");
        assert!(msg.contains("quote"), "got: {msg}");
    }

    #[test]
    fn yaml_unquoted_decimal_choice_is_rejected() {
        let text = "
info: { name: C }
params:
  - { name: p, type: number, default: 1, choices: [1, 2.5] }
";
        let err = ComponentDefinition::from_yaml_str(text).unwrap_err();
        assert!(err.to_string().contains("params[0].choices[1]"), "got: {err}");
    }

    #[test]
    fn yaml_quoted_decimal_keeps_every_digit() {
        let text = "
info: { name: C }
params:
  - { name: p, type: number, default: \"1.00000000000000000001\", choices: [\"1.00000000000000000001\", 2] }
";
        let def = ComponentDefinition::from_yaml_str(text).expect("parse");
        assert_eq!(def.params[0].default.as_deref(), Some("1.00000000000000000001"));
        assert_eq!(
            def.params[0].choices,
            Some(vec!["1.00000000000000000001".to_string(), "2".to_string()])
        );
    }

    #[test]
    fn json_definition_parses_choices_and_flags() {
        let text = r#"{
            "info": {"name": "C"},
            "services": [{
                "name": "s",
                "allow_params_in_body": true,
                "input_types": [null],
                "params": [
                    {"name": "n", "type": "number_list", "default": 22, "choices": [11, 22], "positional": true}
                ]
            }]
        }"#;
        let def = ComponentDefinition::from_json_str(text).expect("parse");
        let service = &def.services[0];
        assert!(service.params_in_body);
        assert_eq!(service.declared_input_types(), Some(vec![None]));
        assert_eq!(
            service.params[0].choices,
            Some(vec!["11".to_string(), "22".to_string()])
        );
        assert_eq!(service.declared_positionals(), vec!["n".to_string()]);
    }

    #[test]
    fn singular_content_types_come_first() {
        let service = ServiceDecl {
            output_type: Some("text/plain".into()),
            output_types: vec!["application/json".into()],
            input_type: Some("text/csv".into()),
            ..ServiceDecl::default()
        };
        assert_eq!(service.declared_output_types(), vec!["text/plain", "application/json"]);
        assert_eq!(service.declared_input_types(), Some(vec![Some("text/csv".to_string())]));
        assert_eq!(ServiceDecl::default().declared_input_types(), None);
    }

    #[test]
    fn unknown_parameter_type_is_rejected() {
        let text = r#"{"params": [{"name": "d", "type": "date"}]}"#;
        let err = ComponentDefinition::from_json_str(text).unwrap_err();
        assert!(matches!(err, ManifoldError::Deserialization { .. }), "got: {err}");
    }

    #[test]
    fn container_default_is_rejected() {
        let text = r#"{"params": [{"name": "d", "type": "string", "default": [1]}]}"#;
        assert!(ComponentDefinition::from_json_str(text).is_err());
    }

    #[test]
    fn load_picks_format_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().expect("tempfile");
        write!(file, "{YAML}").expect("write");
        let def = ComponentDefinition::load(file.path()).expect("load");
        assert_eq!(def.services.len(), 1);
    }
}
