//! The immutable descriptor model.
//!
//! Descriptors are assembled by the builder and never mutated after the
//! build completes. Keys are stored in sorted maps; declaration order of
//! service parameters is kept separately in the call-order index.

use std::collections::BTreeMap;

use manifold_common::error::{ManifoldError, Result};
use manifold_params::ParameterDef;

/// Validated metadata of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    desc: String,
    params_in_body: bool,
    params: BTreeMap<String, ParameterDef>,
    positional_params: Vec<String>,
    output_types: Vec<String>,
    input_types: Vec<Option<String>>,
}

impl ServiceDescriptor {
    /// Creates a service with resolved content types and no parameters.
    pub fn new(
        desc: impl Into<String>,
        params_in_body: bool,
        output_types: Vec<String>,
        input_types: Vec<Option<String>>,
    ) -> Self {
        Self {
            desc: desc.into(),
            params_in_body,
            params: BTreeMap::new(),
            positional_params: Vec::new(),
            output_types,
            input_types,
        }
    }

    /// Adds a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::DuplicateKey`] if the name is taken.
    pub fn add_parameter(&mut self, name: impl Into<String>, def: ParameterDef) -> Result<()> {
        insert_unique(&mut self.params, "parameter", name.into(), def)
    }

    /// Records which parameters may be supplied positionally, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::MalformedDescriptor`] if a name does not
    /// refer to a parameter of this service, or
    /// [`ManifoldError::DuplicateKey`] if a name is listed twice. Nothing is
    /// recorded then.
    pub fn set_positional_params(&mut self, names: &[String]) -> Result<()> {
        if let Some(missing) = names.iter().find(|n| !self.params.contains_key(*n)) {
            return Err(ManifoldError::malformed(format!(
                "parameter '{missing}' from positionals does not exist"
            )));
        }
        let mut seen: Vec<&String> = self.positional_params.iter().collect();
        for name in names {
            if seen.contains(&name) {
                return Err(ManifoldError::duplicate("positional parameter", name.as_str()));
            }
            seen.push(name);
        }
        self.positional_params.extend_from_slice(names);
        Ok(())
    }

    /// Human description.
    #[must_use]
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Whether parameters may arrive in the request body.
    #[must_use]
    pub const fn params_in_body(&self) -> bool {
        self.params_in_body
    }

    /// Parameters by name.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, ParameterDef> {
        &self.params
    }

    /// Looks up one parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParameterDef> {
        self.params.get(name)
    }

    /// Positional parameter names, in URL order.
    #[must_use]
    pub fn positional_params(&self) -> &[String] {
        &self.positional_params
    }

    /// Output content types.
    #[must_use]
    pub fn output_types(&self) -> &[String] {
        &self.output_types
    }

    /// Input content types. `None` entries stand for "no input".
    #[must_use]
    pub fn input_types(&self) -> &[Option<String>] {
        &self.input_types
    }

    /// Whether the service declares that it takes no request body at all.
    #[must_use]
    pub fn accepts_no_input(&self) -> bool {
        matches!(self.input_types.as_slice(), [None])
    }
}

/// Validated metadata of one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    name: String,
    desc: String,
    doc: String,
    params: BTreeMap<String, ParameterDef>,
    services: BTreeMap<String, ServiceDescriptor>,
}

impl ComponentDescriptor {
    /// Creates a component with no parameters or services.
    pub fn new(name: impl Into<String>, desc: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            doc: doc.into(),
            params: BTreeMap::new(),
            services: BTreeMap::new(),
        }
    }

    /// Adds a resource-creation parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::DuplicateKey`] if the name is taken.
    pub fn add_parameter(&mut self, name: impl Into<String>, def: ParameterDef) -> Result<()> {
        insert_unique(&mut self.params, "parameter", name.into(), def)
    }

    /// Adds a service.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::DuplicateKey`] if the name is taken.
    pub fn add_service(&mut self, name: impl Into<String>, service: ServiceDescriptor) -> Result<()> {
        insert_unique(&mut self.services, "service", name.into(), service)
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description.
    #[must_use]
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Longer documentation.
    #[must_use]
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Resource-creation parameters by name.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, ParameterDef> {
        &self.params
    }

    /// Services by name.
    #[must_use]
    pub const fn services(&self) -> &BTreeMap<String, ServiceDescriptor> {
        &self.services
    }

    /// Looks up one service.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services.get(name)
    }
}

fn insert_unique<V>(
    map: &mut BTreeMap<String, V>,
    kind: &'static str,
    name: String,
    value: V,
) -> Result<()> {
    if map.contains_key(&name) {
        return Err(ManifoldError::duplicate(kind, name));
    }
    let _ = map.insert(name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use manifold_params::ParameterType;

    use super::*;

    fn service() -> ServiceDescriptor {
        ServiceDescriptor::new("s", false, vec!["application/json".into()], vec![None])
    }

    #[test]
    fn duplicate_service_parameter_fails() {
        let mut svc = service();
        svc.add_parameter("text", ParameterDef::required(ParameterType::String, "a"))
            .expect("first insert");
        let err = svc
            .add_parameter("text", ParameterDef::required(ParameterType::Number, "b"))
            .unwrap_err();
        assert_eq!(err.to_string(), "parameter 'text' already exists");
        assert_eq!(svc.params().len(), 1);
    }

    #[test]
    fn dangling_positional_fails_and_records_nothing() {
        let mut svc = service();
        svc.add_parameter("num", ParameterDef::required(ParameterType::Number, "n"))
            .expect("insert");
        let names = vec!["num".to_string(), "ghost".to_string()];
        let err = svc.set_positional_params(&names).unwrap_err();
        assert!(matches!(err, ManifoldError::MalformedDescriptor { .. }));
        assert!(err.to_string().contains("ghost"), "got: {err}");
        assert!(svc.positional_params().is_empty());
    }

    #[test]
    fn repeated_positional_name_fails_and_records_nothing() {
        let mut svc = service();
        svc.add_parameter("num", ParameterDef::required(ParameterType::Number, "n"))
            .expect("insert");
        let names = vec!["num".to_string(), "num".to_string()];
        let err = svc.set_positional_params(&names).unwrap_err();
        assert!(
            matches!(err, ManifoldError::DuplicateKey { kind: "positional parameter", .. }),
            "got: {err}"
        );
        assert!(svc.positional_params().is_empty());
    }

    #[test]
    fn duplicate_service_fails() {
        let mut comp = ComponentDescriptor::new("C", "d", "");
        comp.add_service("a", service()).expect("first");
        let err = comp.add_service("a", service()).unwrap_err();
        assert!(matches!(err, ManifoldError::DuplicateKey { kind: "service", .. }));
    }

    #[test]
    fn no_input_marker_is_detected() {
        assert!(service().accepts_no_input());
        let svc = ServiceDescriptor::new("s", false, vec![], vec![Some("text/csv".into()), None]);
        assert!(!svc.accepts_no_input());
    }
}
