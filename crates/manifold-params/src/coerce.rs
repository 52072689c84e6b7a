//! Request-time conversion of raw values into typed arguments.
//!
//! Raw request values arrive as strings from a query string or as decoded
//! JSON from a body. Each is converted to the parameter's declared kind
//! before it reaches a service handler.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use manifold_common::error::{ManifoldError, Result};
use manifold_value::Value;
use manifold_value::value::{MAX_EXPONENT, decimal_text, exponent_in_bounds};

use crate::definition::ParameterDef;
use crate::kind::ParameterType;

const TRUE_WORDS: [&str; 5] = ["y", "yes", "true", "t", "1"];
const FALSE_WORDS: [&str; 5] = ["n", "no", "false", "f", "0"];

impl ParameterDef {
    /// Converts a raw request value into this parameter's kind.
    ///
    /// List kinds accept either a list or a single scalar, which is wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::TypeCoercion`] naming `name` if the value (or
    /// any list element) does not fit.
    pub fn coerce(&self, name: &str, raw: &Value) -> Result<Value> {
        let kind = self.kind();
        if !kind.is_list() {
            return coerce_scalar(kind, name, raw);
        }
        let element = kind.element_type();
        match raw {
            Value::List(items) => items
                .iter()
                .map(|item| coerce_scalar(element, name, item))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            scalar => Ok(Value::List(vec![coerce_scalar(element, name, scalar)?])),
        }
    }

    /// Checks an already coerced value against the declared choices.
    /// Every element is checked for list kinds. Parameters without choices
    /// accept anything.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::BadRequest`] for the first value that is not
    /// a declared choice.
    pub fn check_choices(&self, name: &str, value: &Value) -> Result<()> {
        let Some(choices) = self.choices() else {
            return Ok(());
        };
        let provided: &[Value] = match value {
            Value::List(items) => items,
            scalar => std::slice::from_ref(scalar),
        };
        for item in provided {
            if !choices.contains(item) {
                let shown = item.to_text().unwrap_or_else(|| item.type_name().to_string());
                return Err(ManifoldError::bad_request(format!(
                    "value '{shown}' for parameter '{name}' is not one of the permitted choices"
                )));
            }
        }
        Ok(())
    }

    /// The argument used when a caller omits this parameter. List kinds
    /// broadcast their scalar default into a one-element list.
    #[must_use]
    pub fn default_argument(&self) -> Option<Value> {
        let default = self.default_value()?.clone();
        if self.is_list() {
            Some(Value::List(vec![default]))
        } else {
            Some(default)
        }
    }
}

fn coerce_scalar(kind: ParameterType, name: &str, raw: &Value) -> Result<Value> {
    match kind {
        ParameterType::String | ParameterType::Password | ParameterType::StringList => {
            match raw {
                Value::String(_) => Ok(raw.clone()),
                Value::Number(n) => Ok(Value::String(decimal_text(bounded(name, n)?))),
                Value::Bool(b) => Ok(Value::String(b.to_string())),
                other => Err(mismatch(name, "a string", other)),
            }
        }
        ParameterType::Number | ParameterType::NumberList => match raw {
            Value::Number(n) => Ok(Value::Number(bounded(name, n)?.clone())),
            Value::String(s) => {
                let n = BigDecimal::from_str(s.trim())
                    .map_err(|_| ManifoldError::coercion(name, format!("'{s}' is not a number")))?;
                bounded(name, &n)?;
                Ok(Value::Number(n))
            }
            other => Err(mismatch(name, "a number", other)),
        },
        ParameterType::Boolean => match raw {
            Value::Bool(_) => Ok(raw.clone()),
            Value::String(s) => {
                let word = s.trim().to_ascii_lowercase();
                if TRUE_WORDS.contains(&word.as_str()) {
                    Ok(Value::Bool(true))
                } else if FALSE_WORDS.contains(&word.as_str()) {
                    Ok(Value::Bool(false))
                } else {
                    Err(ManifoldError::coercion(name, format!("'{s}' is not a boolean")))
                }
            }
            other => Err(mismatch(name, "a boolean", other)),
        },
    }
}

fn bounded<'a>(name: &str, n: &'a BigDecimal) -> Result<&'a BigDecimal> {
    if exponent_in_bounds(n) {
        Ok(n)
    } else {
        tracing::debug!(parameter = name, "rejecting number with oversized exponent");
        Err(ManifoldError::coercion(
            name,
            format!("number exponent is beyond {MAX_EXPONENT}"),
        ))
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> ManifoldError {
    tracing::debug!(parameter = name, expected, got = got.type_name(), "coercion failed");
    ManifoldError::coercion(name, format!("expected {expected}, got {}", got.type_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_def(kind: ParameterType, default: &str, choices: &[&str]) -> ParameterDef {
        let choices: Vec<String> = choices.iter().map(|s| (*s).to_string()).collect();
        ParameterDef::parse(kind, "d", false, Some(default), Some(&choices)).expect("valid")
    }

    #[test]
    fn numeric_strings_become_numbers() {
        let def = ParameterDef::optional(ParameterType::Number, "n", "10").expect("valid");
        assert_eq!(def.coerce("num", &Value::from("42")).expect("coerce"), Value::from(42));
        assert_eq!(def.coerce("num", &Value::from(7)).expect("coerce"), Value::from(7));
    }

    #[test]
    fn non_numeric_string_is_coercion_error() {
        let def = ParameterDef::required(ParameterType::Number, "n");
        let err = def.coerce("num", &Value::from("abc")).unwrap_err();
        assert!(matches!(err, ManifoldError::TypeCoercion { ref parameter, .. } if parameter == "num"));
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn oversized_exponent_is_coercion_error() {
        let def = ParameterDef::required(ParameterType::Number, "n");
        let err = def.coerce("num", &Value::from("1e10000000")).unwrap_err();
        assert!(matches!(err, ManifoldError::TypeCoercion { .. }), "got: {err}");
        assert!(def.coerce("num", &Value::from("1e-100000")).is_err());
        assert_eq!(def.coerce("num", &Value::from("1e3")).expect("coerce"), Value::from(1000));

        let huge = BigDecimal::from_str("1e10000000").expect("decimal");
        let text = ParameterDef::required(ParameterType::String, "s");
        assert!(text.coerce("s", &Value::Number(huge)).is_err());
    }

    #[test]
    fn boolean_words_are_recognised() {
        let def = ParameterDef::required(ParameterType::Boolean, "b");
        for word in ["y", "Yes", "TRUE", "t", "1"] {
            assert_eq!(def.coerce("flag", &Value::from(word)).expect("coerce"), Value::Bool(true));
        }
        for word in ["n", "no", "False", "f", "0"] {
            assert_eq!(def.coerce("flag", &Value::from(word)).expect("coerce"), Value::Bool(false));
        }
        assert!(def.coerce("flag", &Value::from("maybe")).is_err());
    }

    #[test]
    fn text_kinds_render_scalars_as_text() {
        let def = ParameterDef::required(ParameterType::String, "s");
        assert_eq!(def.coerce("s", &Value::from(3)).expect("coerce"), Value::from("3"));
        assert_eq!(def.coerce("s", &Value::Bool(true)).expect("coerce"), Value::from("true"));
        assert!(def.coerce("s", &Value::Null).is_err());
    }

    #[test]
    fn list_kinds_wrap_single_scalars() {
        let def = ParameterDef::required(ParameterType::NumberList, "l");
        assert_eq!(
            def.coerce("l", &Value::from("5")).expect("coerce"),
            Value::List(vec![Value::from(5)])
        );
        let raw = Value::List(vec![Value::from("1"), Value::from(2)]);
        assert_eq!(
            def.coerce("l", &raw).expect("coerce"),
            Value::List(vec![Value::from(1), Value::from(2)])
        );
        let bad = Value::List(vec![Value::from(1), Value::from("x")]);
        assert!(def.coerce("l", &bad).is_err());
    }

    #[test]
    fn choices_are_enforced_per_element() {
        let def = choice_def(ParameterType::StringList, "a", &["a", "b"]);
        let ok = Value::List(vec![Value::from("a"), Value::from("b")]);
        assert!(def.check_choices("tags", &ok).is_ok());
        let bad = Value::List(vec![Value::from("a"), Value::from("c")]);
        let err = def.check_choices("tags", &bad).unwrap_err();
        assert!(err.to_string().contains("'c'"), "got: {err}");
    }

    #[test]
    fn scalar_choice_is_case_sensitive() {
        let def = choice_def(ParameterType::String, "Foo B", &["Foo A", "Foo B"]);
        assert!(def.check_choices("c", &Value::from("Foo A")).is_ok());
        assert!(def.check_choices("c", &Value::from("foo a")).is_err());
    }

    #[test]
    fn parameters_without_choices_accept_anything() {
        let def = ParameterDef::required(ParameterType::String, "s");
        assert!(def.check_choices("s", &Value::from("anything")).is_ok());
    }

    #[test]
    fn list_default_broadcasts_into_single_element_list() {
        let def = ParameterDef::optional(ParameterType::StringList, "d", "x").expect("valid");
        assert_eq!(def.default_argument(), Some(Value::List(vec![Value::from("x")])));
        let scalar = ParameterDef::optional(ParameterType::Number, "d", "10").expect("valid");
        assert_eq!(scalar.default_argument(), Some(Value::from(10)));
        assert_eq!(ParameterDef::required(ParameterType::Number, "d").default_argument(), None);
    }
}
