//! Process-wide configuration model.
//!
//! The configuration is loaded once at process start and handed to every
//! component by reference. Nothing in the workspace looks it up globally.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{ManifoldError, Result};

/// Root configuration for the Manifold engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifoldConfig {
    /// URI prefix for component code.
    pub prefix_code: String,
    /// URI prefix for resources.
    pub prefix_resource: String,
    /// URI prefix for specialized component resources.
    pub prefix_specialized: String,
    /// Output content types for services that declare none.
    pub default_output_types: Vec<String>,
    /// Input content types for services that declare none.
    pub default_input_types: Vec<String>,
}

impl Default for ManifoldConfig {
    fn default() -> Self {
        Self {
            prefix_code: constants::PREFIX_CODE.to_string(),
            prefix_resource: constants::PREFIX_RESOURCE.to_string(),
            prefix_specialized: constants::PREFIX_SPECIALIZED.to_string(),
            default_output_types: to_owned_list(constants::DEFAULT_OUTPUT_TYPES),
            default_input_types: to_owned_list(constants::DEFAULT_INPUT_TYPES),
        }
    }
}

impl ManifoldConfig {
    /// Loads a configuration file. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");
        let content =
            std::fs::read_to_string(path).map_err(|e| ManifoldError::io(path, e))?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| {
                ManifoldError::config(format!("{}: {e}", path.display()))
            })
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }

    /// Returns the code URI of a component, e.g. `/code/TestComponent`.
    #[must_use]
    pub fn code_uri(&self, component_name: &str) -> String {
        format!("{}/{component_name}", self.prefix_code)
    }

    /// Returns the URI of a resource, e.g. `/resource/MySearch`.
    #[must_use]
    pub fn resource_uri(&self, resource_name: &str, specialized: bool) -> String {
        let prefix = if specialized {
            &self.prefix_specialized
        } else {
            &self.prefix_resource
        };
        format!("{prefix}/{resource_name}")
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
