//! Component registration and descriptor lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use manifold_common::config::ManifoldConfig;
use manifold_common::error::{ManifoldError, Result};
use manifold_descriptor::serializer::metadata_document;
use manifold_descriptor::{BuiltComponent, ComponentDefinition, DescriptorCell, ParameterSlot, build};
use manifold_value::Value;

use crate::provider::ServiceProvider;

/// A component together with its built descriptor.
#[derive(Clone)]
pub struct RegisteredComponent {
    provider: Arc<dyn ServiceProvider>,
    built: Arc<BuiltComponent>,
}

impl std::fmt::Debug for RegisteredComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredComponent")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

impl RegisteredComponent {
    /// Pairs a provider with its already built descriptor.
    #[must_use]
    pub fn new(provider: Arc<dyn ServiceProvider>, built: Arc<BuiltComponent>) -> Self {
        Self { provider, built }
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.built.name()
    }

    /// The built descriptor.
    #[must_use]
    pub fn built(&self) -> &BuiltComponent {
        &self.built
    }

    /// The component implementation.
    #[must_use]
    pub fn provider(&self) -> &dyn ServiceProvider {
        self.provider.as_ref()
    }

    /// The self-describing metadata document.
    #[must_use]
    pub fn metadata_document(&self, config: &ManifoldConfig) -> Value {
        metadata_document(&self.built, config)
    }

    /// The declared argument order of a service.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::NotFound`] for an unknown service.
    pub fn parameter_order(&self, service: &str) -> Result<&[ParameterSlot]> {
        self.built.parameter_order(service)
    }
}

struct Entry {
    provider: Arc<dyn ServiceProvider>,
    definition: ComponentDefinition,
    cell: DescriptorCell,
}

/// Components by name.
///
/// Registration is single-threaded; lookups take `&self` and may run from
/// many threads at once. Each descriptor is built at most once.
pub struct ComponentRegistry {
    config: ManifoldConfig,
    entries: BTreeMap<String, Entry>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new(config: ManifoldConfig) -> Self {
        Self {
            config,
            entries: BTreeMap::new(),
        }
    }

    /// The configuration descriptors are built with.
    #[must_use]
    pub const fn config(&self) -> &ManifoldConfig {
        &self.config
    }

    /// Registers a component and builds its descriptor immediately.
    ///
    /// # Errors
    ///
    /// Returns the build error, or [`ManifoldError::DuplicateKey`] if the
    /// name is taken. Nothing is registered on error.
    pub fn register(&mut self, provider: Arc<dyn ServiceProvider>) -> Result<RegisteredComponent> {
        let (name, entry) = self.prepare(provider)?;
        let built = entry.cell.get_or_build(|| build(&entry.definition, &self.config))?;
        let registered = RegisteredComponent::new(Arc::clone(&entry.provider), built);
        let _ = self.entries.insert(name, entry);
        Ok(registered)
    }

    /// Registers a component and defers building until first lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition cannot be read or names no
    /// component, or [`ManifoldError::DuplicateKey`] if the name is taken.
    pub fn register_deferred(&mut self, provider: Arc<dyn ServiceProvider>) -> Result<String> {
        let (name, entry) = self.prepare(provider)?;
        let _ = self.entries.insert(name.clone(), entry);
        Ok(name)
    }

    /// Looks up a component, building its descriptor on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::NotFound`] for an unknown name, or the
    /// cached build error.
    pub fn component(&self, name: &str) -> Result<RegisteredComponent> {
        let entry = self.entries.get(name).ok_or_else(|| ManifoldError::NotFound {
            kind: "component",
            id: name.to_string(),
        })?;
        let built = entry.cell.get_or_build(|| build(&entry.definition, &self.config))?;
        Ok(RegisteredComponent::new(Arc::clone(&entry.provider), built))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn prepare(&self, provider: Arc<dyn ServiceProvider>) -> Result<(String, Entry)> {
        let definition = provider.definition()?;
        let name = definition
            .name()
            .ok_or_else(|| ManifoldError::config("component definition has no info block"))?
            .to_string();
        if self.entries.contains_key(&name) {
            return Err(ManifoldError::duplicate("component", name));
        }
        tracing::info!(component = %name, "registering component");
        Ok((
            name,
            Entry {
                provider,
                definition,
                cell: DescriptorCell::new(),
            },
        ))
    }
}
