//! Domain primitive types used across the Manifold workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ManifoldError;

/// HTTP method of an inbound request or an outbound resource access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl HttpMethod {
    /// Returns the canonical upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ManifoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(ManifoldError::bad_request(format!("unknown HTTP method: {s}"))),
        }
    }
}

/// HTTP status codes used by service results.
pub mod status {
    /// 200
    pub const OK: u16 = 200;
    /// 201
    pub const CREATED: u16 = 201;
    /// 204
    pub const NO_CONTENT: u16 = 204;
    /// 307
    pub const TEMPORARY_REDIRECT: u16 = 307;
    /// 400
    pub const BAD_REQUEST: u16 = 400;
    /// 401
    pub const UNAUTHORIZED: u16 = 401;
    /// 404
    pub const NOT_FOUND: u16 = 404;
    /// 405
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    /// 415
    pub const UNSUPPORTED_MEDIA_TYPE: u16 = 415;
    /// 500
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}
