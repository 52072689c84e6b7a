//! The seam between the dispatcher and component implementations.

use manifold_common::error::Result;
use manifold_descriptor::ComponentDefinition;

use crate::context::CallContext;
use crate::result::ServiceResult;

/// A component the dispatcher can describe and call.
///
/// Native components and script-bridged components both implement this.
/// The definition is read once, at registration.
pub trait ServiceProvider: Send + Sync {
    /// The component's declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the component cannot describe itself.
    fn definition(&self) -> Result<ComponentDefinition>;

    /// Calls the service named by [`CallContext::service`].
    ///
    /// # Errors
    ///
    /// Errors are turned into client-facing results by the dispatcher.
    fn call(&self, ctx: &CallContext) -> Result<ServiceResult>;
}
