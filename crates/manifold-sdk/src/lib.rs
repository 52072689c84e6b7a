//! # manifold-sdk
//!
//! Public SDK for writing Manifold components in Rust.
//!
//! Provides three main entry points:
//! - [`ComponentBuilder`](builder::ComponentBuilder): Fluent API for declaring
//!   a component, its creation parameters and its services.
//! - [`NativeComponent`](native::NativeComponent): Pairs a declaration with
//!   Rust handlers, one per service.
//! - [`BridgedComponent`](bridged::BridgedComponent): Exposes a
//!   [`ScriptBridge`](manifold_dispatch::ScriptBridge) as a component.
//!
//! # Example
//!
//! ```rust,no_run
//! use manifold_params::ParameterType;
//! use manifold_sdk::builder::{ComponentBuilder, ParamBuilder, ServiceBuilder};
//! use manifold_sdk::native::NativeComponent;
//! use manifold_dispatch::ServiceResult;
//!
//! let definition = ComponentBuilder::new("Greeter")
//!     .desc("Says hello")
//!     .service(
//!         ServiceBuilder::new("hello")
//!             .param(ParamBuilder::new("name", ParameterType::String).default("world"))
//!             .positional("name"),
//!     )
//!     .build();
//!
//! let component = NativeComponent::new(definition)
//!     .handler("hello", |ctx| Ok(ServiceResult::ok(ctx.values())));
//! ```

pub mod bridged;
pub mod builder;
pub mod native;
