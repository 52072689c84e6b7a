//! The generic value model.

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;

/// String-keyed mapping of values. Key order carries no meaning.
pub type Map = BTreeMap<String, Value>;

/// A language-neutral value.
///
/// Numbers are arbitrary-precision decimals so that money- or ID-like values
/// survive a trip through the engine without binary floating-point drift.
/// Equality on numbers compares by value: `10` equals `10.0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// An exact decimal number.
    Number(BigDecimal),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// A string-keyed mapping of values.
    Map(Map),
}

impl Value {
    /// Returns a short name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Returns `true` for `Value::Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for lists and maps.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Returns the string slice if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<&BigDecimal> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the elements if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Consumes the value and returns the entries if this is a map.
    #[must_use]
    pub fn into_map(self) -> Option<Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key if this is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Renders a scalar as plain text, the way it appears in a URL query or
    /// a choice list. Numbers are printed without trailing zeros.
    /// Containers have no text form.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => Some(String::new()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(decimal_text(n)),
            Self::String(s) => Some(s.clone()),
            Self::List(_) | Self::Map(_) => None,
        }
    }
}

/// Largest decimal exponent, in either direction, a number may carry.
///
/// Rescaling, comparing or printing a number costs time proportional to its
/// exponent, so values decoded from untrusted input are held to this bound.
pub const MAX_EXPONENT: i64 = 4096;

/// Whether the number's exponent lies within [`MAX_EXPONENT`].
#[must_use]
pub fn exponent_in_bounds(n: &BigDecimal) -> bool {
    let (_, scale) = n.as_bigint_and_exponent();
    scale.unsigned_abs() <= MAX_EXPONENT.unsigned_abs()
}

/// Prints a decimal in plain notation without trailing fractional zeros.
///
/// Numbers whose exponent exceeds [`MAX_EXPONENT`] are printed as
/// `<digits>e<exponent>` instead of being expanded.
#[must_use]
pub fn decimal_text(n: &BigDecimal) -> String {
    let normalized = n.normalized();
    let (digits, scale) = normalized.as_bigint_and_exponent();
    if scale.unsigned_abs() > MAX_EXPONENT.unsigned_abs() {
        format!("{digits}e{}", -scale)
    } else if scale <= 0 {
        n.with_scale(0).to_string()
    } else {
        normalized.to_string()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<BigDecimal> for Value {
    fn from(n: BigDecimal) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(BigDecimal::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(BigDecimal::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(BigDecimal::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}
