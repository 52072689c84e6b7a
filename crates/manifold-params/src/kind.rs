//! Parameter kind tags.

use std::fmt;
use std::str::FromStr;

use manifold_common::error::ManifoldError;
use serde::{Deserialize, Serialize};

/// Semantic type of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// Free text.
    String,
    /// Free text that clients should not echo.
    Password,
    /// `true` or `false`.
    Boolean,
    /// Exact decimal number.
    Number,
    /// List of text values.
    StringList,
    /// List of exact decimal numbers.
    NumberList,
}

impl ParameterType {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::String,
        Self::Password,
        Self::Boolean,
        Self::Number,
        Self::StringList,
        Self::NumberList,
    ];

    /// Returns the tag used in metadata documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Password => "password",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::StringList => "string_list",
            Self::NumberList => "number_list",
        }
    }

    /// Whether values of this kind are lists.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::StringList | Self::NumberList)
    }

    /// Whether a choice set may be declared for this kind.
    #[must_use]
    pub const fn supports_choices(self) -> bool {
        !matches!(self, Self::Boolean | Self::Password)
    }

    /// The scalar kind of a single element. Scalar kinds return themselves.
    #[must_use]
    pub const fn element_type(self) -> Self {
        match self {
            Self::StringList => Self::String,
            Self::NumberList => Self::Number,
            other => other,
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = ManifoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ManifoldError::config(format!("unknown parameter type: {s}")))
    }
}
