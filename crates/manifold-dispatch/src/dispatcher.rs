//! Request dispatch and argument marshaling.
//!
//! Turns a [`ServiceRequest`] into a typed, defaulted, declared-order
//! argument list and calls the component. Per-request failures become
//! client-facing [`ServiceResult`]s; the cached descriptor is only read.

use std::collections::BTreeMap;
use std::sync::Arc;

use manifold_common::constants::ANY_INPUT;
use manifold_common::error::{ManifoldError, Result};
use manifold_descriptor::ServiceDescriptor;
use manifold_value::{Value, deserialize};

use crate::accessor::ResourceAccessor;
use crate::context::{Argument, CallContext, Resource};
use crate::registry::RegisteredComponent;
use crate::request::ServiceRequest;
use crate::result::ServiceResult;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Dispatches requests into registered components.
#[derive(Clone, Default)]
pub struct Dispatcher {
    accessor: Option<Arc<dyn ResourceAccessor>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("has_accessor", &self.accessor.is_some())
            .finish()
    }
}

impl Dispatcher {
    /// A dispatcher without host capabilities.
    #[must_use]
    pub const fn new() -> Self {
        Self { accessor: None }
    }

    /// Makes `accessor` available to every handler through its context.
    #[must_use]
    pub fn with_accessor(mut self, accessor: Arc<dyn ResourceAccessor>) -> Self {
        self.accessor = Some(accessor);
        self
    }

    /// Serves one request.
    ///
    /// # Pipeline
    ///
    /// 1. The service must exist (404 otherwise).
    /// 2. Non-empty path segments fill the positional parameters in order;
    ///    named query parameters take precedence.
    /// 3. A body sent to a service that takes no input is rejected (415).
    /// 4. With params-in-body, a JSON object body supplies parameters not
    ///    already given, and is consumed.
    /// 5. Required parameters must be present (400); defaults are filled,
    ///    values coerced and checked against their choices.
    /// 6. The component is called with arguments in declared order.
    pub fn dispatch(
        &self,
        component: &RegisteredComponent,
        resource: Option<&Resource>,
        request: &ServiceRequest,
    ) -> ServiceResult {
        let result = self
            .prepare(component, resource, request)
            .and_then(|ctx| component.provider().call(&ctx));
        let result = result.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "service call failed");
            ServiceResult::from(e)
        });
        tracing::info!(
            component = %component.name(),
            service = %request.service,
            status = result.status,
            "service dispatched"
        );
        result
    }

    /// Runs the pipeline up to, but not including, the component call.
    ///
    /// # Errors
    ///
    /// Returns the per-request error the client should see.
    pub fn prepare(
        &self,
        component: &RegisteredComponent,
        resource: Option<&Resource>,
        request: &ServiceRequest,
    ) -> Result<CallContext> {
        let service = component
            .built()
            .descriptor
            .service(&request.service)
            .ok_or_else(|| ManifoldError::NotFound {
                kind: "service",
                id: format!("'{}' is not exposed by this resource", request.service),
            })?;

        let mut raw: BTreeMap<String, Value> = request
            .query
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect();
        map_positionals(service, &request.segments, &mut raw);

        let mut input = decode_input(service, request)?;
        if service.params_in_body() {
            if let Some(Value::Map(body)) = input.take_if(|v| matches!(v, Value::Map(_))) {
                for (name, value) in body {
                    let _ = raw.entry(name).or_insert(value);
                }
            }
        }

        let arguments = marshal(component, &request.service, service, &raw)?;
        Ok(CallContext::new(
            request.service.clone(),
            request.method,
            resource.cloned(),
            arguments,
            input,
            self.accessor.clone(),
        ))
    }
}

fn map_positionals(
    service: &ServiceDescriptor,
    segments: &[String],
    raw: &mut BTreeMap<String, Value>,
) {
    let values = segments.iter().filter(|s| !s.is_empty());
    for (name, value) in service.positional_params().iter().zip(values) {
        let _ = raw
            .entry(name.clone())
            .or_insert_with(|| Value::from(value.as_str()));
    }
}

fn decode_input(service: &ServiceDescriptor, request: &ServiceRequest) -> Result<Option<Value>> {
    let Some(body) = request.body.as_deref().filter(|b| !b.is_empty()) else {
        return Ok(None);
    };
    let accepted = service.input_types();
    if accepted.is_empty() || service.accepts_no_input() {
        return Err(ManifoldError::UnsupportedMediaType {
            message: format!("service '{}' does not accept a request body", request.service),
        });
    }

    let content_type = request.content_type.as_deref().unwrap_or(JSON_CONTENT_TYPE);
    let media = content_type.split(';').next().unwrap_or_default().trim();
    if media.eq_ignore_ascii_case(JSON_CONTENT_TYPE) {
        return deserialize(body).map(Some).map_err(|e| {
            ManifoldError::bad_request(format!("input content is malformed: {e}"))
        });
    }
    let listed = accepted
        .iter()
        .flatten()
        .any(|t| t.eq_ignore_ascii_case(media) || t == ANY_INPUT);
    if !listed {
        return Err(ManifoldError::UnsupportedMediaType {
            message: format!("content type '{media}' is not accepted"),
        });
    }
    Ok(Some(Value::from(body)))
}

fn marshal(
    component: &RegisteredComponent,
    service_name: &str,
    service: &ServiceDescriptor,
    raw: &BTreeMap<String, Value>,
) -> Result<Vec<Argument>> {
    for name in raw.keys().filter(|n| service.param(n).is_none()) {
        tracing::debug!(parameter = %name, service = service_name, "ignoring unknown parameter");
    }

    let slots = component.parameter_order(service_name)?;
    let mut arguments = Vec::with_capacity(slots.len());
    for slot in slots {
        let Some(def) = service.param(&slot.name) else {
            continue;
        };
        let value = match raw.get(&slot.name) {
            Some(given) => {
                let value = def.coerce(&slot.name, given)?;
                def.check_choices(&slot.name, &value)?;
                value
            }
            None => def.default_argument().ok_or_else(|| {
                ManifoldError::bad_request(format!("missing mandatory parameter '{}'", slot.name))
            })?,
        };
        tracing::debug!(parameter = %slot.name, kind = %slot.kind, "argument marshaled");
        arguments.push(Argument {
            name: slot.name.clone(),
            value,
        });
    }
    Ok(arguments)
}
