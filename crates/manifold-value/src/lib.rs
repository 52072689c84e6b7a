//! # manifold-value
//!
//! The language-neutral value model exchanged between components, the
//! dispatcher and clients, plus the transcoder that moves it to and from JSON.
//!
//! - **Value**: `null`, booleans, exact decimal numbers, strings, ordered
//!   lists and string-keyed maps, nested arbitrarily.
//! - **Transcoder**: recursive conversion between JSON text and [`Value`].

pub mod transcoder;
pub mod value;

pub use transcoder::{deserialize, from_json, serialize, serialize_pretty, to_json};
pub use value::{Map, Value};
