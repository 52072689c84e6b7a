//! Inbound service requests.

use std::collections::BTreeMap;

use manifold_common::error::{ManifoldError, Result};
use manifold_common::types::HttpMethod;

/// A request for one service of one resource, already stripped of the
/// resource prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Service name.
    pub service: String,
    /// Path segments after the service name. Empty segments are kept here
    /// and skipped during positional mapping.
    pub segments: Vec<String>,
    /// Named query parameters.
    pub query: BTreeMap<String, String>,
    /// Raw request body.
    pub body: Option<String>,
    /// Content type of the body.
    pub content_type: Option<String>,
}

impl ServiceRequest {
    /// A `GET` request for `service` with no parameters.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Self::default()
        }
    }

    /// Splits a path of the form `service/seg1/seg2` into a request.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::BadRequest`] if the path names no service.
    pub fn from_path(method: HttpMethod, path: &str) -> Result<Self> {
        let mut parts = path.trim_start_matches('/').split('/');
        let service = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ManifoldError::bad_request("request path names no service"))?;
        Ok(Self {
            method,
            service: service.to_string(),
            segments: parts.map(str::to_string).collect(),
            ..Self::default()
        })
    }

    /// Sets the method.
    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Appends a positional path segment.
    #[must_use]
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    /// Adds a named query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.query.insert(name.into(), value.into());
        self
    }

    /// Sets the body and its content type.
    #[must_use]
    pub fn body(mut self, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self.body = Some(body.into());
        self
    }
}
