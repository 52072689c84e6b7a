//! Descriptor construction and validation.
//!
//! The builder works on local state only and returns a complete
//! [`BuiltComponent`] or the first error it hits. A half-built descriptor is
//! never visible to anyone.

use std::collections::BTreeMap;

use manifold_common::config::ManifoldConfig;
use manifold_common::error::{ManifoldError, Result};
use manifold_params::{ParameterDef, ParameterType};

use crate::definition::{ComponentDefinition, ComponentInfo, ParameterDecl, ServiceDecl};
use crate::model::{ComponentDescriptor, ServiceDescriptor};

/// One argument position of a service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSlot {
    /// Parameter name.
    pub name: String,
    /// Declared kind.
    pub kind: ParameterType,
}

/// A validated descriptor together with its per-service call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltComponent {
    /// The component metadata.
    pub descriptor: ComponentDescriptor,
    /// Service name to parameter slots, in declaration order.
    pub call_order: BTreeMap<String, Vec<ParameterSlot>>,
}

impl BuiltComponent {
    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// The declared argument order of a service.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::NotFound`] for an unknown service.
    pub fn parameter_order(&self, service: &str) -> Result<&[ParameterSlot]> {
        self.call_order
            .get(service)
            .map(Vec::as_slice)
            .ok_or_else(|| ManifoldError::NotFound {
                kind: "service",
                id: service.to_string(),
            })
    }
}

/// Builds and validates a component descriptor.
///
/// # Steps
///
/// 1. The `info` block must be present and name the component.
/// 2. Resource-creation parameters are parsed and inserted.
/// 3. Each service gets its content types (falling back to `config`), its
///    parameters in declaration order, and its positional names.
///
/// # Errors
///
/// Returns the first [`ManifoldError::Config`],
/// [`ManifoldError::DuplicateKey`] or [`ManifoldError::MalformedDescriptor`]
/// encountered.
pub fn build(definition: &ComponentDefinition, config: &ManifoldConfig) -> Result<BuiltComponent> {
    let info = check_info(definition)?;
    tracing::info!(component = %info.name, "building component descriptor");

    let mut descriptor = ComponentDescriptor::new(&info.name, &info.desc, &info.doc);
    for decl in &definition.params {
        descriptor.add_parameter(&decl.name, build_parameter(decl)?)?;
    }

    let mut call_order = BTreeMap::new();
    for decl in &definition.services {
        let (service, slots) = build_service(decl, config)
            .map_err(|e| e.in_context(&format!("service '{}'", decl.name)))?;
        descriptor.add_service(&decl.name, service)?;
        let _ = call_order.insert(decl.name.clone(), slots);
    }

    tracing::info!(
        component = %info.name,
        params = descriptor.params().len(),
        services = descriptor.services().len(),
        "component descriptor built"
    );
    Ok(BuiltComponent {
        descriptor,
        call_order,
    })
}

fn check_info(definition: &ComponentDefinition) -> Result<&ComponentInfo> {
    let info = definition
        .info
        .as_ref()
        .ok_or_else(|| ManifoldError::config("component definition has no info block"))?;
    if info.name.trim().is_empty() {
        return Err(ManifoldError::config("component name must not be empty"));
    }
    Ok(info)
}

fn build_parameter(decl: &ParameterDecl) -> Result<ParameterDef> {
    tracing::debug!(parameter = %decl.name, kind = %decl.kind, "building parameter");
    ParameterDef::parse(
        decl.kind,
        decl.desc.as_str(),
        decl.default.is_none(),
        decl.default.as_deref(),
        decl.choices.as_deref(),
    )
    .map_err(|e| e.in_context(&format!("parameter '{}'", decl.name)))
}

fn build_service(
    decl: &ServiceDecl,
    config: &ManifoldConfig,
) -> Result<(ServiceDescriptor, Vec<ParameterSlot>)> {
    let mut service = ServiceDescriptor::new(
        decl.desc.as_str(),
        decl.params_in_body,
        resolve_output_types(decl, config),
        resolve_input_types(decl, config),
    );

    let mut slots = Vec::with_capacity(decl.params.len());
    for param in &decl.params {
        service.add_parameter(&param.name, build_parameter(param)?)?;
        slots.push(ParameterSlot {
            name: param.name.clone(),
            kind: param.kind,
        });
    }

    service.set_positional_params(&decl.declared_positionals())?;
    Ok((service, slots))
}

fn resolve_output_types(decl: &ServiceDecl, config: &ManifoldConfig) -> Vec<String> {
    let declared = decl.declared_output_types();
    if declared.is_empty() {
        config.default_output_types.clone()
    } else {
        declared
    }
}

fn resolve_input_types(decl: &ServiceDecl, config: &ManifoldConfig) -> Vec<Option<String>> {
    decl.declared_input_types().unwrap_or_else(|| {
        config
            .default_input_types
            .iter()
            .cloned()
            .map(Some)
            .collect()
    })
}
