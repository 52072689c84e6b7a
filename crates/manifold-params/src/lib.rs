//! # manifold-params
//!
//! The closed set of parameter kinds a component may declare, and the
//! validated [`ParameterDef`] schema entry built from a declaration.
//!
//! - **Kind**: [`ParameterType`] tags (`string`, `password`, `boolean`,
//!   `number`, `string_list`, `number_list`).
//! - **Definition**: default and choice parsing, descriptive records.
//! - **Coerce**: request-time conversion of raw values into typed arguments.

pub mod coerce;
pub mod definition;
pub mod kind;

pub use definition::ParameterDef;
pub use kind::ParameterType;
