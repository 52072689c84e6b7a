//! Per-request call state handed to service handlers.

use std::sync::Arc;

use manifold_common::error::{ManifoldError, Result};
use manifold_common::types::HttpMethod;
use manifold_value::{Map, Value};

use crate::accessor::ResourceAccessor;

/// A resource: a named, configured instance of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    /// Resource name.
    pub name: String,
    /// Creation parameters stored with the resource.
    pub params: Map,
}

impl Resource {
    /// A resource with the given creation parameters.
    pub fn new(name: impl Into<String>, params: Map) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// One marshaled argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Parameter name.
    pub name: String,
    /// Typed value.
    pub value: Value,
}

/// Everything a handler sees about the request it serves.
///
/// Built fresh for each request and never shared between requests.
#[derive(Clone)]
pub struct CallContext {
    service: String,
    method: HttpMethod,
    resource: Option<Resource>,
    arguments: Vec<Argument>,
    input: Option<Value>,
    accessor: Option<Arc<dyn ResourceAccessor>>,
}

impl std::fmt::Debug for CallContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext")
            .field("service", &self.service)
            .field("method", &self.method)
            .field("resource", &self.resource)
            .field("arguments", &self.arguments)
            .field("input", &self.input)
            .field("has_accessor", &self.accessor.is_some())
            .finish()
    }
}

impl CallContext {
    /// Assembles a context. Arguments must already be in declared order.
    pub fn new(
        service: impl Into<String>,
        method: HttpMethod,
        resource: Option<Resource>,
        arguments: Vec<Argument>,
        input: Option<Value>,
        accessor: Option<Arc<dyn ResourceAccessor>>,
    ) -> Self {
        Self {
            service: service.into(),
            method,
            resource,
            arguments,
            input,
            accessor,
        }
    }

    /// The service being called.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The request method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// The resource being served, if the call targets one.
    #[must_use]
    pub const fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    /// A creation parameter stored with the resource.
    #[must_use]
    pub fn resource_param(&self, name: &str) -> Option<&Value> {
        self.resource.as_ref().and_then(|r| r.params.get(name))
    }

    /// Arguments in declared order.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Argument values in declared order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.arguments.iter().map(|a| a.value.clone()).collect()
    }

    /// Looks up an argument by name.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// The request body, unless it was consumed as parameters.
    #[must_use]
    pub const fn input(&self) -> Option<&Value> {
        self.input.as_ref()
    }

    /// The host's resource accessor.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::Config`] if the host did not provide one.
    pub fn accessor(&self) -> Result<&dyn ResourceAccessor> {
        self.accessor
            .as_deref()
            .ok_or_else(|| ManifoldError::config("no resource accessor is configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_keep_declared_order() {
        let ctx = CallContext::new(
            "foobar",
            HttpMethod::Get,
            None,
            vec![
                Argument {
                    name: "text".into(),
                    value: Value::from("hi"),
                },
                Argument {
                    name: "num".into(),
                    value: Value::from(10),
                },
            ],
            None,
            None,
        );
        assert_eq!(ctx.values(), vec![Value::from("hi"), Value::from(10)]);
        assert_eq!(ctx.arg("num"), Some(&Value::from(10)));
        assert!(ctx.accessor().is_err());
    }

    #[test]
    fn resource_params_are_visible() {
        let params: Map = [("api_key".to_string(), Value::from("secret"))].into_iter().collect();
        let ctx = CallContext::new(
            "s",
            HttpMethod::Post,
            Some(Resource::new("MyRes", params)),
            Vec::new(),
            None,
            None,
        );
        assert_eq!(ctx.resource_param("api_key"), Some(&Value::from("secret")));
        assert_eq!(ctx.resource().map(|r| r.name.as_str()), Some("MyRes"));
    }
}
