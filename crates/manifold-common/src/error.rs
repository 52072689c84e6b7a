//! Unified error types for the Manifold workspace.
//!
//! Build-time variants (`Config`, `DuplicateKey`, `MalformedDescriptor`) abort
//! descriptor construction. Request-time variants (`Deserialization`,
//! `TypeCoercion`, `BadRequest`, `NotFound`, `UnsupportedMediaType`) are turned
//! into client-facing results at the dispatch boundary.
//!
//! The enum is `Clone` so that a failed descriptor build can be cached and
//! handed to every caller that asks for the same component.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::types::status;

/// Top-level error type shared across the workspace.
#[derive(Debug, Clone, Error)]
pub enum ManifoldError {
    /// A declaration or configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A name was registered twice in the same scope.
    #[error("{scope}{kind} '{name}' already exists")]
    DuplicateKey {
        /// Declaration the clash happened in, as a `"service 'x': "` prefix.
        /// Empty at the top level.
        scope: String,
        /// What kind of entry clashed (`parameter`, `service`, `component`).
        kind: &'static str,
        /// The clashing name.
        name: String,
    },

    /// A service or parameter declaration is internally inconsistent.
    #[error("malformed descriptor: {message}")]
    MalformedDescriptor {
        /// Description of the inconsistency.
        message: String,
    },

    /// Serialized input could not be decoded.
    #[error("could not de-serialize data at line {line}, column {column}: {message}")]
    Deserialization {
        /// Decoder message.
        message: String,
        /// One-based line of the offending fragment (0 when unknown).
        line: usize,
        /// One-based column of the offending fragment (0 when unknown).
        column: usize,
    },

    /// A value could not be encoded.
    #[error("could not serialize data: {message}")]
    Serialization {
        /// Encoder message.
        message: String,
    },

    /// A raw request value does not fit the declared parameter type.
    #[error("incompatible type for parameter '{parameter}': {message}")]
    TypeCoercion {
        /// Parameter name.
        parameter: String,
        /// Why the conversion failed.
        message: String,
    },

    /// The request is malformed in some other way (missing or invalid values).
    #[error("bad request: {message}")]
    BadRequest {
        /// Client-facing explanation.
        message: String,
    },

    /// A requested entry does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing entry.
        kind: &'static str,
        /// Identifier of the missing entry.
        id: String,
    },

    /// The request carries input the service does not accept.
    #[error("unsupported media type: {message}")]
    UnsupportedMediaType {
        /// Client-facing explanation.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },
}

impl ManifoldError {
    /// Shorthand for a [`ManifoldError::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Shorthand for a [`ManifoldError::MalformedDescriptor`].
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            message: message.into(),
        }
    }

    /// Shorthand for a top-level [`ManifoldError::DuplicateKey`].
    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateKey {
            scope: String::new(),
            kind,
            name: name.into(),
        }
    }

    /// Shorthand for a [`ManifoldError::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Shorthand for a [`ManifoldError::TypeCoercion`].
    pub fn coercion(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeCoercion {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Wraps an I/O error together with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Prefixes the message of a declaration error (configuration,
    /// duplicate key or malformed descriptor) with the declaration it came
    /// from. Other variants pass through.
    #[must_use]
    pub fn in_context(self, context: &str) -> Self {
        match self {
            Self::Config { message } => Self::Config {
                message: format!("{context}: {message}"),
            },
            Self::MalformedDescriptor { message } => Self::MalformedDescriptor {
                message: format!("{context}: {message}"),
            },
            Self::DuplicateKey { scope, kind, name } => Self::DuplicateKey {
                scope: format!("{context}: {scope}"),
                kind,
                name,
            },
            other => other,
        }
    }

    /// Whether this error belongs to the build-time (fatal) category.
    #[must_use]
    pub const fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::DuplicateKey { .. } | Self::MalformedDescriptor { .. }
        )
    }

    /// HTTP status code used when this error reaches a client.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Deserialization { .. } | Self::TypeCoercion { .. } | Self::BadRequest { .. } => {
                status::BAD_REQUEST
            }
            Self::NotFound { .. } => status::NOT_FOUND,
            Self::UnsupportedMediaType { .. } => status::UNSUPPORTED_MEDIA_TYPE,
            Self::Config { .. }
            | Self::DuplicateKey { .. }
            | Self::MalformedDescriptor { .. }
            | Self::Serialization { .. }
            | Self::Io { .. } => status::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ManifoldError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            Self::Deserialization {
                message: err.to_string(),
                line: err.line(),
                column: err.column(),
            }
        } else {
            Self::Serialization {
                message: err.to_string(),
            }
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ManifoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_message_names_kind_and_key() {
        let err = ManifoldError::duplicate("parameter", "api_key");
        assert_eq!(err.to_string(), "parameter 'api_key' already exists");
        assert!(err.is_build_error());
    }

    #[test]
    fn in_context_scopes_duplicate_keys() {
        let err = ManifoldError::duplicate("parameter", "text").in_context("service 'foobar'");
        assert_eq!(err.to_string(), "service 'foobar': parameter 'text' already exists");
        assert!(matches!(err, ManifoldError::DuplicateKey { kind: "parameter", .. }));
    }

    #[test]
    fn request_errors_map_to_client_statuses() {
        assert_eq!(ManifoldError::coercion("num", "not a number").status(), 400);
        assert_eq!(ManifoldError::bad_request("missing").status(), 400);
        let not_found = ManifoldError::NotFound {
            kind: "service",
            id: "ghost".into(),
        };
        assert_eq!(not_found.status(), 404);
        let media = ManifoldError::UnsupportedMediaType {
            message: "no input".into(),
        };
        assert_eq!(media.status(), 415);
        assert!(!media.is_build_error());
    }

    #[test]
    fn json_syntax_errors_carry_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\"a\": }").unwrap_err();
        let converted = ManifoldError::from(err);
        match converted {
            ManifoldError::Deserialization { line, column, .. } => {
                assert_eq!(line, 1);
                assert!(column > 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn errors_are_cloneable() {
        let err = ManifoldError::io("/tmp/x", std::io::Error::other("boom"));
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
