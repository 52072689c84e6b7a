//! Access to other resources from inside a service handler.
//!
//! The host implements [`ResourceAccessor`]; handlers reach it through
//! [`CallContext::accessor`](crate::context::CallContext::accessor). Storage
//! and resource lifecycle stay on the host's side of this trait.

use manifold_common::error::Result;
use manifold_common::types::HttpMethod;
use manifold_value::{Map, Value};

/// Status and payload returned by a resource access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResult {
    /// HTTP status code.
    pub status: u16,
    /// Decoded response data.
    pub data: Option<Value>,
}

/// Outcome of creating a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeResourceResult {
    /// Human status text reported by the host.
    pub status: String,
    /// Final resource name.
    pub name: String,
    /// URI of the new resource.
    pub uri: String,
}

/// Host capabilities a component may use while serving a request.
pub trait ResourceAccessor: Send + Sync {
    /// Calls another resource or one of its services.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is unknown or the call fails.
    fn access_resource(
        &self,
        uri: &str,
        input: Option<&Value>,
        params: &Map,
        method: HttpMethod,
    ) -> Result<HttpResult>;

    /// Creates a new resource from a component.
    ///
    /// # Errors
    ///
    /// Returns an error if the component is unknown or the parameters are
    /// rejected.
    fn make_resource(
        &self,
        component: &str,
        suggested_name: &str,
        description: &str,
        specialized: bool,
        params: &Map,
    ) -> Result<MakeResourceResult>;
}
