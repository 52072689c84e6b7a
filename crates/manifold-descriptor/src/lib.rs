//! # manifold-descriptor
//!
//! Turns a component declaration into an immutable, cached descriptor and
//! renders it as a self-describing metadata document.
//!
//! Handles:
//! - **Definition**: the declarative input format (in code, JSON or YAML).
//! - **Model**: [`ComponentDescriptor`] and [`ServiceDescriptor`].
//! - **Builder**: validation and the per-service parameter call order.
//! - **Cache**: [`DescriptorCell`], one build per component, shared by all callers.
//! - **Serializer**: metadata and services documents.

pub mod builder;
pub mod cache;
pub mod definition;
pub mod model;
pub mod serializer;

pub use builder::{BuiltComponent, ParameterSlot, build};
pub use cache::DescriptorCell;
pub use definition::{ComponentDefinition, ComponentInfo, ParameterDecl, ServiceDecl};
pub use model::{ComponentDescriptor, ServiceDescriptor};
