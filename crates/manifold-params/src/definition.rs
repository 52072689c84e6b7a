//! Validated parameter schema entries.
//!
//! A [`ParameterDef`] does not carry its own name. The name is the key under
//! which the owning service or component stores it.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use manifold_common::error::{ManifoldError, Result};
use manifold_value::value::{MAX_EXPONENT, exponent_in_bounds};
use manifold_value::{Map, Value};

use crate::kind::ParameterType;

/// Schema entry for a single parameter.
///
/// Defaults and choices are stored as scalars matching the kind's element
/// type. For list kinds the default is one element, not a list; see
/// [`ParameterDef::default_argument`] for how it applies to a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDef {
    kind: ParameterType,
    description: String,
    required: bool,
    default: Option<Value>,
    choices: Option<Vec<Value>>,
}

impl ParameterDef {
    /// Builds a definition from its declared, still textual, form.
    ///
    /// # Errors
    ///
    /// - [`ManifoldError::Config`] if an optional parameter has no default, a
    ///   required one has a default, a literal does not parse for the kind,
    ///   or choices are declared for a kind that does not support them.
    /// - [`ManifoldError::MalformedDescriptor`] if the default is not one of
    ///   the declared choices.
    pub fn parse(
        kind: ParameterType,
        description: impl Into<String>,
        required: bool,
        raw_default: Option<&str>,
        raw_choices: Option<&[String]>,
    ) -> Result<Self> {
        let default = match (required, raw_default) {
            (false, None) => {
                return Err(ManifoldError::config(
                    "a default value is required for optional parameters",
                ));
            }
            (true, Some(raw)) => {
                return Err(ManifoldError::config(format!(
                    "a default value ('{raw}') cannot be provided for a required parameter"
                )));
            }
            (false, Some(raw)) => Some(parse_scalar(kind, raw)?),
            (true, None) => None,
        };

        let choices = match raw_choices {
            Some(raw) if !raw.is_empty() => {
                if !kind.supports_choices() {
                    return Err(ManifoldError::config(format!(
                        "choices are not supported for '{kind}' parameters"
                    )));
                }
                Some(
                    raw.iter()
                        .map(|c| parse_scalar(kind, c))
                        .collect::<Result<Vec<_>>>()?,
                )
            }
            _ => None,
        };

        if let (Some(default), Some(choices)) = (&default, &choices) {
            if !choices.contains(default) {
                return Err(ManifoldError::malformed(
                    "specified default value is not listed in 'choices'",
                ));
            }
        }

        Ok(Self {
            kind,
            description: description.into(),
            required,
            default,
            choices,
        })
    }

    /// A required parameter without choices.
    pub fn required(kind: ParameterType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            required: true,
            default: None,
            choices: None,
        }
    }

    /// An optional parameter with a textual default.
    ///
    /// # Errors
    ///
    /// Returns an error if the default does not parse for the kind.
    pub fn optional(
        kind: ParameterType,
        description: impl Into<String>,
        raw_default: &str,
    ) -> Result<Self> {
        Self::parse(kind, description, false, Some(raw_default), None)
    }

    /// The parameter's kind.
    #[must_use]
    pub const fn kind(&self) -> ParameterType {
        self.kind
    }

    /// Human description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether callers must supply a value.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Whether values are lists.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        self.kind.is_list()
    }

    /// The declared default scalar, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The declared choices, if any.
    #[must_use]
    pub fn choices(&self) -> Option<&[Value]> {
        self.choices.as_deref()
    }

    /// Renders the definition as a plain record:
    /// `type`, `desc`, `required`, `default` (optional parameters only),
    /// `val_choices` and, for list kinds, `multi_choice` (when choices exist).
    #[must_use]
    pub fn to_descriptive_record(&self) -> Value {
        let mut record = Map::new();
        let _ = record.insert("type".into(), Value::from(self.kind.as_str()));
        let _ = record.insert("desc".into(), Value::from(self.description.as_str()));
        let _ = record.insert("required".into(), Value::Bool(self.required));
        if !self.required {
            let _ = record.insert("default".into(), self.default.clone().unwrap_or_default());
        }
        if let Some(choices) = &self.choices {
            let _ = record.insert("val_choices".into(), Value::List(choices.clone()));
            if self.is_list() {
                let _ = record.insert("multi_choice".into(), Value::Bool(true));
            }
        }
        Value::Map(record)
    }
}

/// Parses one textual literal into the element type of `kind`.
///
/// # Errors
///
/// Returns [`ManifoldError::Config`] for malformed number or boolean literals.
pub fn parse_scalar(kind: ParameterType, raw: &str) -> Result<Value> {
    match kind {
        ParameterType::String | ParameterType::Password | ParameterType::StringList => {
            Ok(Value::from(raw))
        }
        ParameterType::Number | ParameterType::NumberList => {
            let n = BigDecimal::from_str(raw.trim())
                .map_err(|_| ManifoldError::config(format!("malformed number literal '{raw}'")))?;
            if !exponent_in_bounds(&n) {
                return Err(ManifoldError::config(format!(
                    "number literal '{raw}' has an exponent beyond {MAX_EXPONENT}"
                )));
            }
            Ok(Value::Number(n))
        }
        ParameterType::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(ManifoldError::config(format!(
                    "malformed boolean literal '{raw}', expected 'true' or 'false'"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn string_choice_record_has_no_multi_choice() {
        let choices = strings(&["Foo A", "Foo B", "Foo C"]);
        let def = ParameterDef::parse(
            ParameterType::String,
            "This is a string choice type",
            false,
            Some("Foo B"),
            Some(&choices),
        )
        .expect("valid");
        let record = def.to_descriptive_record();
        assert_eq!(record.get("type"), Some(&Value::from("string")));
        assert_eq!(record.get("default"), Some(&Value::from("Foo B")));
        assert_eq!(
            record.get("val_choices"),
            Some(&Value::List(vec!["Foo A".into(), "Foo B".into(), "Foo C".into()]))
        );
        assert!(record.get("multi_choice").is_none());
    }

    #[test]
    fn list_choice_record_is_multi_choice() {
        let choices = strings(&["11", "22", "33", "44"]);
        let def = ParameterDef::parse(
            ParameterType::NumberList,
            "numeric list",
            false,
            Some("22"),
            Some(&choices),
        )
        .expect("valid");
        let record = def.to_descriptive_record();
        assert_eq!(record.get("multi_choice"), Some(&Value::Bool(true)));
        assert_eq!(record.get("default"), Some(&Value::from(22)));
    }

    #[test]
    fn default_outside_choices_fails() {
        let choices = strings(&["Foo A", "Foo B"]);
        let err = ParameterDef::parse(
            ParameterType::String,
            "d",
            false,
            Some("foo b"),
            Some(&choices),
        )
        .unwrap_err();
        assert!(matches!(err, ManifoldError::MalformedDescriptor { .. }), "got: {err}");
    }

    #[test]
    fn numeric_default_matches_choice_by_value() {
        let choices = strings(&["1", "2", "3.0"]);
        let def = ParameterDef::parse(ParameterType::Number, "d", false, Some("3"), Some(&choices));
        assert!(def.is_ok());
    }

    #[test]
    fn malformed_number_literal_is_config_error() {
        let err = ParameterDef::optional(ParameterType::Number, "d", "ten").unwrap_err();
        assert!(matches!(err, ManifoldError::Config { .. }));
        assert!(err.to_string().contains("ten"), "got: {err}");

        let choices = strings(&["1", "two"]);
        let err = ParameterDef::parse(ParameterType::NumberList, "d", true, None, Some(&choices))
            .unwrap_err();
        assert!(err.to_string().contains("two"), "got: {err}");
    }

    #[test]
    fn oversized_exponent_literal_is_config_error() {
        let err = ParameterDef::optional(ParameterType::Number, "d", "1e9999999").unwrap_err();
        assert!(matches!(err, ManifoldError::Config { .. }), "got: {err}");
    }

    #[test]
    fn boolean_accepts_only_true_or_false() {
        let def = ParameterDef::optional(ParameterType::Boolean, "d", "TRUE").expect("valid");
        assert_eq!(def.default_value(), Some(&Value::Bool(true)));
        assert!(ParameterDef::optional(ParameterType::Boolean, "d", "yes").is_err());
    }

    #[test]
    fn optional_without_default_fails() {
        let err = ParameterDef::parse(ParameterType::String, "d", false, None, None).unwrap_err();
        assert!(matches!(err, ManifoldError::Config { .. }));
    }

    #[test]
    fn required_with_default_fails() {
        assert!(ParameterDef::parse(ParameterType::String, "d", true, Some("x"), None).is_err());
    }

    #[test]
    fn choices_rejected_for_password() {
        let choices = strings(&["a"]);
        let err = ParameterDef::parse(ParameterType::Password, "d", true, None, Some(&choices))
            .unwrap_err();
        assert!(err.to_string().contains("not supported"), "got: {err}");
    }

    #[test]
    fn required_record_omits_default() {
        let def = ParameterDef::required(ParameterType::String, "api key");
        let record = def.to_descriptive_record();
        assert_eq!(record.get("required"), Some(&Value::Bool(true)));
        assert!(record.get("default").is_none());
        assert!(record.get("val_choices").is_none());
    }

    #[test]
    fn list_default_is_stored_as_single_scalar() {
        let def = ParameterDef::optional(ParameterType::StringList, "d", "a").expect("valid");
        assert_eq!(def.default_value(), Some(&Value::from("a")));
    }

    #[test]
    fn empty_choice_list_counts_as_no_choices() {
        let def = ParameterDef::parse(ParameterType::String, "d", false, Some("x"), Some(&[]))
            .expect("valid");
        assert!(def.choices().is_none());
    }
}
