//! # manifold-dispatch
//!
//! Routes service requests into component handlers.
//!
//! Handles:
//! - **Registry**: components registered by name, descriptors built once.
//! - **Dispatcher**: positional mapping, input gating, body parameters,
//!   defaults, coercion and declared-order argument marshaling.
//! - **Result**: the HTTP-style status vocabulary handlers answer with.
//! - **Contracts**: [`ServiceProvider`], [`ResourceAccessor`] and
//!   [`ScriptBridge`], the seams components and their host meet at.

pub mod accessor;
pub mod bridge;
pub mod context;
pub mod dispatcher;
pub mod provider;
pub mod registry;
pub mod request;
pub mod result;

pub use accessor::{HttpResult, MakeResourceResult, ResourceAccessor};
pub use bridge::ScriptBridge;
pub use context::{Argument, CallContext, Resource};
pub use dispatcher::Dispatcher;
pub use provider::ServiceProvider;
pub use registry::{ComponentRegistry, RegisteredComponent};
pub use request::ServiceRequest;
pub use result::ServiceResult;
