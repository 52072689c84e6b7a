//! Components backed by a scripting bridge.

use manifold_common::error::Result;
use manifold_descriptor::ComponentDefinition;
use manifold_dispatch::{CallContext, ScriptBridge, ServiceProvider, ServiceResult};

/// Exposes a [`ScriptBridge`] through the [`ServiceProvider`] seam.
///
/// The bridge's definition goes through the same builder as a native one.
/// Calls are forwarded by service name with arguments in declared order,
/// and the returned value becomes a `200` entity.
#[derive(Debug)]
pub struct BridgedComponent<B> {
    bridge: B,
}

impl<B: ScriptBridge> BridgedComponent<B> {
    /// Wraps a bridge.
    pub const fn new(bridge: B) -> Self {
        Self { bridge }
    }

    /// The wrapped bridge.
    pub const fn bridge(&self) -> &B {
        &self.bridge
    }
}

impl<B: ScriptBridge> ServiceProvider for BridgedComponent<B> {
    fn definition(&self) -> Result<ComponentDefinition> {
        self.bridge.definition()
    }

    fn call(&self, ctx: &CallContext) -> Result<ServiceResult> {
        tracing::debug!(service = %ctx.service(), args = ctx.arguments().len(), "invoking bridged service");
        let value = self.bridge.invoke(ctx.service(), &ctx.values())?;
        Ok(ServiceResult::ok(value))
    }
}
