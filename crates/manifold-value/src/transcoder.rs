//! JSON transcoding for [`Value`].
//!
//! Containers translate structurally and recursively: maps become objects,
//! lists become arrays, and back. Scalars are encoded natively; their text is
//! identical to what a list-wrap-then-strip encoder would emit, so clients
//! see no difference.
//!
//! Numbers pass through `serde_json`'s arbitrary-precision mode, so the digits
//! of a decimal literal are never routed through `f64`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use manifold_common::error::{ManifoldError, Result};

use crate::value::{MAX_EXPONENT, Map, Value, exponent_in_bounds};

/// Encodes a value as compact JSON text.
///
/// # Errors
///
/// Returns an error if a number cannot be represented as a JSON number.
pub fn serialize(value: &Value) -> Result<String> {
    let json = to_json(value)?;
    serde_json::to_string(&json).map_err(|e| ManifoldError::Serialization {
        message: e.to_string(),
    })
}

/// Encodes a value as indented JSON text.
///
/// # Errors
///
/// Returns an error if a number cannot be represented as a JSON number.
pub fn serialize_pretty(value: &Value) -> Result<String> {
    let json = to_json(value)?;
    serde_json::to_string_pretty(&json).map_err(|e| ManifoldError::Serialization {
        message: e.to_string(),
    })
}

/// Decodes JSON text into a value, converting every nested object into a
/// [`Map`] and every array into a list.
///
/// # Errors
///
/// Returns [`ManifoldError::Deserialization`] with the line and column of the
/// offending fragment when the text is not valid JSON.
pub fn deserialize(text: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        tracing::debug!(line = e.line(), column = e.column(), "rejecting malformed JSON input");
        ManifoldError::Deserialization {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    })?;
    from_json(json)
}

/// Converts a `serde_json` tree into a [`Value`].
///
/// # Errors
///
/// Returns an error if a JSON number is not a valid decimal literal.
pub fn from_json(json: serde_json::Value) -> Result<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(parse_number(&n)?),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(from_json).collect::<Result<_>>()?)
        }
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| from_json(v).map(|v| (k, v)))
                .collect::<Result<Map>>()?,
        ),
    })
}

/// Converts a [`Value`] into a `serde_json` tree.
///
/// # Errors
///
/// Returns an error if a number cannot be represented as a JSON number.
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Value::Number(encode_number(n)?),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::List(items) => {
            serde_json::Value::Array(items.iter().map(to_json).collect::<Result<_>>()?)
        }
        Value::Map(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| to_json(v).map(|v| (k.clone(), v)))
                .collect::<Result<serde_json::Map<_, _>>>()?,
        ),
    })
}

fn parse_number(n: &serde_json::Number) -> Result<BigDecimal> {
    let literal = n.to_string();
    let number = BigDecimal::from_str(&literal).map_err(|e| ManifoldError::Deserialization {
        message: format!("invalid number literal '{literal}': {e}"),
        line: 0,
        column: 0,
    })?;
    if !exponent_in_bounds(&number) {
        return Err(ManifoldError::Deserialization {
            message: format!("number literal '{literal}' has an exponent beyond {MAX_EXPONENT}"),
            line: 0,
            column: 0,
        });
    }
    Ok(number)
}

fn encode_number(n: &BigDecimal) -> Result<serde_json::Number> {
    let literal = n.to_string();
    serde_json::from_str::<serde_json::Number>(&literal).map_err(|e| {
        ManifoldError::Serialization {
            message: format!("number '{literal}' is not representable in JSON: {e}"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Value {
        Value::Number(BigDecimal::from_str(s).expect("decimal"))
    }

    /// The encoding a list-wrap-then-strip encoder produces for a scalar.
    fn boxed_scalar_text(value: &Value) -> String {
        let wrapped = serialize(&Value::List(vec![value.clone()])).expect("serialize");
        wrapped[1..wrapped.len() - 1].to_string()
    }

    #[test]
    fn nested_structure_round_trips_structurally() {
        let original = deserialize(r#"{"a": 1, "b": [true, "x", null]}"#).expect("decode");
        let expected: Value = [
            ("a", Value::from(1)),
            (
                "b",
                Value::List(vec![Value::Bool(true), Value::from("x"), Value::Null]),
            ),
        ]
        .into_iter()
        .collect();
        assert_eq!(original, expected);

        let text = serialize(&original).expect("encode");
        let back = deserialize(&text).expect("decode again");
        assert_eq!(back, original);
    }

    #[test]
    fn container_wire_format_is_compact_json() {
        let value: Value = [("k", Value::List(vec![Value::from(1), Value::from("v")]))]
            .into_iter()
            .collect();
        assert_eq!(serialize(&value).expect("encode"), r#"{"k":[1,"v"]}"#);
    }

    #[test]
    fn decimals_survive_without_float_drift() {
        let text = r#"{"price": 0.1, "id": 12345678901234567890123456789}"#;
        let value = deserialize(text).expect("decode");
        assert_eq!(value.get("price"), Some(&dec("0.1")));
        assert_eq!(value.get("id"), Some(&dec("12345678901234567890123456789")));
        let encoded = serialize(&value).expect("encode");
        assert!(encoded.contains("12345678901234567890123456789"), "got: {encoded}");
        assert!(encoded.contains("0.1"), "got: {encoded}");
    }

    #[test]
    fn bare_scalars_encode_natively() {
        assert_eq!(serialize(&Value::from("x")).expect("encode"), r#""x""#);
        assert_eq!(serialize(&Value::Bool(true)).expect("encode"), "true");
        assert_eq!(serialize(&Value::Null).expect("encode"), "null");
        assert_eq!(serialize(&Value::from(42)).expect("encode"), "42");
    }

    #[test]
    fn native_scalar_text_matches_boxed_encoding() {
        for scalar in [Value::from("Foo B"), Value::Bool(false), Value::Null, dec("10.25")] {
            let native = serialize(&scalar).expect("encode");
            assert_eq!(native, boxed_scalar_text(&scalar));
        }
    }

    #[test]
    fn bare_scalars_decode_back() {
        assert_eq!(deserialize(r#""x""#).expect("decode"), Value::from("x"));
        assert_eq!(deserialize("10").expect("decode"), Value::from(10));
        assert_eq!(deserialize("false").expect("decode"), Value::Bool(false));
    }

    #[test]
    fn empty_containers_keep_their_kind() {
        assert_eq!(deserialize("{}").expect("decode"), Value::Map(Map::new()));
        assert_eq!(deserialize("[]").expect("decode"), Value::List(Vec::new()));
    }

    #[test]
    fn malformed_input_reports_position() {
        let err = deserialize("{\n  \"a\": [1, 2,\n}").unwrap_err();
        match err {
            ManifoldError::Deserialization { line, column, .. } => {
                assert_eq!(line, 3);
                assert!(column >= 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_exponent_is_rejected() {
        let err = deserialize(r#"{"q": 1e10000000}"#).unwrap_err();
        assert!(matches!(err, ManifoldError::Deserialization { .. }), "got: {err}");
        assert!(err.to_string().contains("exponent"), "got: {err}");
        assert!(deserialize("[1e-5000]").is_err());
        assert_eq!(deserialize("2e3").expect("decode"), Value::from(2000));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(deserialize("[1] [2]").is_err());
    }
}
