//! Build-once descriptor storage.

use std::sync::{Arc, OnceLock};

use manifold_common::error::Result;

use crate::builder::BuiltComponent;

/// Holds the result of building one component.
///
/// The first caller of [`DescriptorCell::get_or_build`] runs the build;
/// concurrent callers block until it finishes and then observe the same
/// result. Failures are stored too, so a broken definition is reported the
/// same way to every caller and never rebuilt.
#[derive(Debug, Default)]
pub struct DescriptorCell {
    cell: OnceLock<Result<Arc<BuiltComponent>>>,
}

impl DescriptorCell {
    /// Creates an empty cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Returns the cached descriptor, running `build` if this is the first call.
    ///
    /// # Errors
    ///
    /// Returns the (cached) build error.
    pub fn get_or_build<F>(&self, build: F) -> Result<Arc<BuiltComponent>>
    where
        F: FnOnce() -> Result<BuiltComponent>,
    {
        self.cell
            .get_or_init(|| {
                let result = build().map(Arc::new);
                match &result {
                    Ok(built) => tracing::debug!(component = %built.name(), "descriptor cached"),
                    Err(e) => tracing::warn!(error = %e, "descriptor build failed, caching error"),
                }
                result
            })
            .clone()
    }

    /// Returns the cached result without building.
    #[must_use]
    pub fn get(&self) -> Option<Result<Arc<BuiltComponent>>> {
        self.cell.get().cloned()
    }

    /// Whether a build has completed, successfully or not.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
