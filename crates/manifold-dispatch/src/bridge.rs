//! Contract for components implemented in an embedded scripting language.
//!
//! A bridge hands over a declarative definition, which goes through the
//! same builder as native components, and answers invocations by name.
//! It never sees the registry or the host beyond what it is given.

use manifold_common::error::Result;
use manifold_descriptor::ComponentDefinition;
use manifold_value::Value;

/// A component whose services run outside Rust.
pub trait ScriptBridge: Send + Sync {
    /// The component's declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot describe itself.
    fn definition(&self) -> Result<ComponentDefinition>;

    /// Invokes `method` with arguments in declared order.
    ///
    /// # Errors
    ///
    /// Returns an error if the method is unknown or the script fails.
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value>;
}
