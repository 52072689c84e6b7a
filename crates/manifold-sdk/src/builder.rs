//! Fluent API for declaring components.
//!
//! The builders only assemble a [`ComponentDefinition`]. Validation happens
//! when the definition is built into a descriptor, at registration.

use manifold_descriptor::{ComponentDefinition, ComponentInfo, ParameterDecl, ServiceDecl};
use manifold_params::ParameterType;

/// Builder for one parameter declaration.
#[derive(Debug, Clone)]
pub struct ParamBuilder {
    decl: ParameterDecl,
}

impl ParamBuilder {
    /// Creates a required parameter of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            decl: ParameterDecl::new(name, kind, String::new()),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.decl.desc = desc.into();
        self
    }

    /// Sets a default literal, which makes the parameter optional.
    #[must_use]
    pub fn default(mut self, literal: impl Into<String>) -> Self {
        self.decl.default = Some(literal.into());
        self
    }

    /// Adds a permitted value.
    #[must_use]
    pub fn choice(mut self, literal: impl Into<String>) -> Self {
        self.decl.choices.get_or_insert_with(Vec::new).push(literal.into());
        self
    }

    /// Marks the parameter as positional.
    #[must_use]
    pub const fn positional(mut self) -> Self {
        self.decl.positional = true;
        self
    }

    /// Finishes the declaration.
    #[must_use]
    pub fn build(self) -> ParameterDecl {
        self.decl
    }
}

/// Builder for one service declaration.
#[derive(Debug, Clone)]
pub struct ServiceBuilder {
    decl: ServiceDecl,
}

impl ServiceBuilder {
    /// Creates a service with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            decl: ServiceDecl {
                name: name.into(),
                ..ServiceDecl::default()
            },
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.decl.desc = desc.into();
        self
    }

    /// Allows parameters to arrive in a JSON request body.
    #[must_use]
    pub const fn params_in_body(mut self) -> Self {
        self.decl.params_in_body = true;
        self
    }

    /// Adds an output content type.
    #[must_use]
    pub fn output_type(mut self, content_type: impl Into<String>) -> Self {
        self.decl.output_types.push(content_type.into());
        self
    }

    /// Adds an input content type.
    #[must_use]
    pub fn input_type(mut self, content_type: impl Into<String>) -> Self {
        self.decl
            .input_types
            .get_or_insert_with(Vec::new)
            .push(Some(content_type.into()));
        self
    }

    /// Declares that the service takes no request body.
    #[must_use]
    pub fn no_input(mut self) -> Self {
        self.decl.input_types = Some(vec![None]);
        self
    }

    /// Adds a parameter. Call order follows the order of these calls.
    #[must_use]
    pub fn param(mut self, param: ParamBuilder) -> Self {
        self.decl.params.push(param.build());
        self
    }

    /// Appends a positional parameter name.
    #[must_use]
    pub fn positional(mut self, name: impl Into<String>) -> Self {
        self.decl.positional_params.push(name.into());
        self
    }

    /// Finishes the declaration.
    #[must_use]
    pub fn build(self) -> ServiceDecl {
        self.decl
    }
}

/// Builder for a component declaration.
#[derive(Debug, Clone)]
pub struct ComponentBuilder {
    info: ComponentInfo,
    params: Vec<ParameterDecl>,
    services: Vec<ServiceDecl>,
}

impl ComponentBuilder {
    /// Creates a builder for the named component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: ComponentInfo {
                name: name.into(),
                ..ComponentInfo::default()
            },
            params: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Sets the one-line description.
    #[must_use]
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.info.desc = desc.into();
        self
    }

    /// Sets the longer documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.info.doc = doc.into();
        self
    }

    /// Adds a resource-creation parameter.
    #[must_use]
    pub fn param(mut self, param: ParamBuilder) -> Self {
        self.params.push(param.build());
        self
    }

    /// Adds a service.
    #[must_use]
    pub fn service(mut self, service: ServiceBuilder) -> Self {
        self.services.push(service.build());
        self
    }

    /// Finishes the declaration.
    #[must_use]
    pub fn build(self) -> ComponentDefinition {
        ComponentDefinition {
            info: Some(self.info),
            params: self.params,
            services: self.services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_declared_definition() {
        let def = ComponentBuilder::new("TestComponent")
            .desc("Test")
            .param(ParamBuilder::new("api_key", ParameterType::Password).desc("key"))
            .service(
                ServiceBuilder::new("foobar")
                    .desc("Some service")
                    .param(ParamBuilder::new("text", ParameterType::String))
                    .param(ParamBuilder::new("num", ParameterType::Number).default("10"))
                    .positional("num"),
            )
            .build();
        assert_eq!(def.name(), Some("TestComponent"));
        assert_eq!(def.params[0].kind, ParameterType::Password);
        let svc = &def.services[0];
        assert_eq!(svc.params[1].default.as_deref(), Some("10"));
        assert_eq!(svc.positional_params, vec!["num".to_string()]);
    }

    #[test]
    fn choices_accumulate_in_order() {
        let decl = ParamBuilder::new("pick", ParameterType::String)
            .choice("Foo A")
            .choice("Foo B")
            .default("Foo B")
            .build();
        assert_eq!(decl.choices, Some(vec!["Foo A".to_string(), "Foo B".to_string()]));
    }

    #[test]
    fn no_input_replaces_declared_input_types() {
        let svc = ServiceBuilder::new("s").input_type("text/csv").no_input().build();
        assert_eq!(svc.input_types, Some(vec![None]));
    }
}
