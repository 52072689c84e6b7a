//! # manifold-common
//!
//! Shared error taxonomy, configuration model, HTTP vocabulary and constants
//! used across the entire Manifold workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the primitives every other crate builds upon.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
