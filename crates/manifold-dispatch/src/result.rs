//! HTTP-style results returned by service handlers.

use std::collections::BTreeMap;

use manifold_common::error::ManifoldError;
use manifold_common::types::{HttpMethod, status};
use manifold_value::Value;

/// Outcome of a service call: status code, optional entity and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResult {
    /// HTTP status code.
    pub status: u16,
    /// Response entity, if any.
    pub entity: Option<Value>,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Content type chosen by the handler, if it chose one.
    pub negotiated_type: Option<String>,
}

impl ServiceResult {
    /// A result with the given status and entity.
    #[must_use]
    pub fn new(status: u16, entity: Option<Value>) -> Self {
        Self {
            status,
            entity,
            headers: BTreeMap::new(),
            negotiated_type: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.headers.insert(name.into(), value.into());
        self
    }

    /// Records the content type the handler produced.
    #[must_use]
    pub fn with_negotiated_type(mut self, content_type: impl Into<String>) -> Self {
        self.negotiated_type = Some(content_type.into());
        self
    }

    /// 200 with an entity.
    #[must_use]
    pub fn ok(entity: impl Into<Value>) -> Self {
        Self::new(status::OK, Some(entity.into()))
    }

    /// 201 with a `Location` header and an optional entity.
    #[must_use]
    pub fn created(location: &str, entity: Option<Value>) -> Self {
        Self::new(status::CREATED, entity).with_header("Location", location)
    }

    /// 204 without entity.
    #[must_use]
    pub fn no_content() -> Self {
        Self::new(status::NO_CONTENT, None)
    }

    /// 307 with a `Location` header.
    #[must_use]
    pub fn temporary_redirect(location: &str) -> Self {
        Self::new(status::TEMPORARY_REDIRECT, None).with_header("Location", location)
    }

    /// 400 with a message.
    #[must_use]
    pub fn bad_request(message: &str) -> Self {
        Self::message(status::BAD_REQUEST, message)
    }

    /// 401 with a message.
    #[must_use]
    pub fn unauthorized(message: &str) -> Self {
        Self::message(status::UNAUTHORIZED, message)
    }

    /// 404 with a message.
    #[must_use]
    pub fn not_found(message: &str) -> Self {
        Self::message(status::NOT_FOUND, message)
    }

    /// 405 naming the rejected method.
    #[must_use]
    pub fn method_not_allowed(method: HttpMethod) -> Self {
        Self::message(status::METHOD_NOT_ALLOWED, &format!("Method Not Allowed: {method}"))
    }

    /// 415 with a message.
    #[must_use]
    pub fn unsupported_media_type(message: &str) -> Self {
        Self::message(status::UNSUPPORTED_MEDIA_TYPE, message)
    }

    /// 500 with a message.
    #[must_use]
    pub fn internal_server_error(message: &str) -> Self {
        Self::message(status::INTERNAL_SERVER_ERROR, message)
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    fn message(status: u16, message: &str) -> Self {
        Self::new(status, Some(Value::from(message)))
    }
}

impl From<ManifoldError> for ServiceResult {
    fn from(err: ManifoldError) -> Self {
        Self::message(err.status(), &err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_sets_location() {
        let res = ServiceResult::created("/resource/MyRes", None);
        assert_eq!(res.status, 201);
        assert_eq!(res.headers.get("Location").map(String::as_str), Some("/resource/MyRes"));
        assert!(res.is_success());
    }

    #[test]
    fn method_not_allowed_names_method() {
        let res = ServiceResult::method_not_allowed(HttpMethod::Delete);
        assert_eq!(res.status, 405);
        assert_eq!(res.entity, Some(Value::from("Method Not Allowed: DELETE")));
    }

    #[test]
    fn errors_become_client_results() {
        let res = ServiceResult::from(ManifoldError::coercion("num", "'x' is not a number"));
        assert_eq!(res.status, 400);
        assert!(!res.is_success());
        let res = ServiceResult::from(ManifoldError::config("broken"));
        assert_eq!(res.status, 500);
    }
}
