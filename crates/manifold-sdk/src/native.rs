//! Components implemented by Rust closures.

use std::collections::BTreeMap;
use std::sync::Arc;

use manifold_common::error::{ManifoldError, Result};
use manifold_descriptor::ComponentDefinition;
use manifold_dispatch::{CallContext, ServiceProvider, ServiceResult};

type Handler = Arc<dyn Fn(&CallContext) -> Result<ServiceResult> + Send + Sync>;

/// A declaration plus one handler per service.
#[derive(Clone)]
pub struct NativeComponent {
    definition: ComponentDefinition,
    handlers: BTreeMap<String, Handler>,
}

impl std::fmt::Debug for NativeComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeComponent")
            .field("name", &self.definition.name())
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl NativeComponent {
    /// Wraps a declaration with no handlers yet.
    #[must_use]
    pub fn new(definition: ComponentDefinition) -> Self {
        Self {
            definition,
            handlers: BTreeMap::new(),
        }
    }

    /// Installs the handler for `service`, replacing any earlier one.
    #[must_use]
    pub fn handler<F>(mut self, service: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&CallContext) -> Result<ServiceResult> + Send + Sync + 'static,
    {
        let _ = self.handlers.insert(service.into(), Arc::new(handler));
        self
    }
}

impl ServiceProvider for NativeComponent {
    /// Returns the declaration after checking that every declared service
    /// has a handler.
    fn definition(&self) -> Result<ComponentDefinition> {
        if let Some(missing) = self
            .definition
            .services
            .iter()
            .find(|s| !self.handlers.contains_key(&s.name))
        {
            return Err(ManifoldError::config(format!(
                "service '{}' has no handler",
                missing.name
            )));
        }
        Ok(self.definition.clone())
    }

    fn call(&self, ctx: &CallContext) -> Result<ServiceResult> {
        let handler = self
            .handlers
            .get(ctx.service())
            .ok_or_else(|| ManifoldError::NotFound {
                kind: "service",
                id: ctx.service().to_string(),
            })?;
        handler(ctx)
    }
}
