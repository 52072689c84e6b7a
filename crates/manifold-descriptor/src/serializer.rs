//! Rendering descriptors as plain metadata documents.
//!
//! Documents are [`Value`] trees; the transcoder turns them into JSON text.
//! Service records may also come back from storage already flattened, so a
//! params map can mix [`ParamEntry::Declared`] and [`ParamEntry::Flattened`]
//! entries. Both render identically.

use std::collections::BTreeMap;

use manifold_common::config::ManifoldConfig;
use manifold_common::constants::{ALLOWABLE_SERVICE_KEYS, DOC_SUFFIX};
use manifold_common::error::{ManifoldError, Result};
use manifold_params::{ParameterDef, ParameterType};
use manifold_value::{Map, Value};

use crate::builder::BuiltComponent;
use crate::model::ServiceDescriptor;

/// A parameter in a service record: either a live definition or a record
/// that was flattened before being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamEntry {
    /// A validated definition.
    Declared(ParameterDef),
    /// An already flattened descriptive record.
    Flattened(Value),
}

impl ParamEntry {
    /// The descriptive record of this parameter.
    #[must_use]
    pub fn to_record(&self) -> Value {
        match self {
            Self::Declared(def) => def.to_descriptive_record(),
            Self::Flattened(record) => record.clone(),
        }
    }
}

/// The describable part of one service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDocument {
    /// Human description.
    pub desc: String,
    /// Parameters by name.
    pub params: BTreeMap<String, ParamEntry>,
    /// Whether parameters may arrive in the request body.
    pub allow_params_in_body: bool,
    /// Positional parameter names.
    pub positional_params: Vec<String>,
    /// Output content types. Omitted from the record when empty.
    pub output_types: Vec<String>,
    /// Input content types. Omitted from the record when empty.
    pub input_types: Vec<Option<String>>,
}

impl ServiceDocument {
    /// Captures a built service.
    #[must_use]
    pub fn from_descriptor(service: &ServiceDescriptor) -> Self {
        Self {
            desc: service.desc().to_string(),
            params: service
                .params()
                .iter()
                .map(|(name, def)| (name.clone(), ParamEntry::Declared(def.clone())))
                .collect(),
            allow_params_in_body: service.params_in_body(),
            positional_params: service.positional_params().to_vec(),
            output_types: service.output_types().to_vec(),
            input_types: service.input_types().to_vec(),
        }
    }

    /// Reads a service record loaded back from storage.
    ///
    /// # Errors
    ///
    /// Returns [`ManifoldError::MalformedDescriptor`] if the record is not a
    /// map, carries a key outside the allowed set, or a known key has the
    /// wrong shape.
    pub fn from_stored(name: &str, stored: &Value) -> Result<Self> {
        let map = stored.as_map().ok_or_else(|| {
            ManifoldError::malformed(format!("description for service '{name}' is not a map"))
        })?;
        if let Some(key) = map.keys().find(|k| !ALLOWABLE_SERVICE_KEYS.contains(&k.as_str())) {
            return Err(ManifoldError::malformed(format!(
                "unknown key '{key}' in description for service '{name}'; allowed keys are: {}",
                ALLOWABLE_SERVICE_KEYS.join(", ")
            )));
        }

        let shape = |key: &str, expected: &str| {
            ManifoldError::malformed(format!(
                "key '{key}' in description for service '{name}' must be {expected}"
            ))
        };

        let mut doc = Self::default();
        if let Some(desc) = map.get("desc") {
            doc.desc = desc.as_str().ok_or_else(|| shape("desc", "a string"))?.to_string();
        }
        if let Some(params) = map.get("params") {
            let params = params.as_map().ok_or_else(|| shape("params", "a map"))?;
            doc.params = params
                .iter()
                .map(|(k, v)| (k.clone(), ParamEntry::Flattened(v.clone())))
                .collect();
        }
        if let Some(flag) = map.get("allow_params_in_body") {
            doc.allow_params_in_body = flag
                .as_bool()
                .ok_or_else(|| shape("allow_params_in_body", "a boolean"))?;
        }
        if let Some(list) = map.get("positional_params") {
            doc.positional_params =
                string_list(list).ok_or_else(|| shape("positional_params", "a list of strings"))?;
        }
        if let Some(list) = map.get("output_types") {
            doc.output_types =
                string_list(list).ok_or_else(|| shape("output_types", "a list of strings"))?;
        }
        if let Some(list) = map.get("input_types") {
            doc.input_types = list
                .as_list()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|item| match item {
                            Value::Null => Some(None),
                            Value::String(s) => Some(Some(s.clone())),
                            _ => None,
                        })
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or_else(|| shape("input_types", "a list of strings or nulls"))?;
        }
        Ok(doc)
    }

    /// Renders the record published for the service at `uri`.
    #[must_use]
    pub fn to_record(&self, uri: &str) -> Value {
        let mut record = Map::new();
        let _ = record.insert("uri".into(), Value::from(uri));
        let _ = record.insert("desc".into(), Value::from(self.desc.as_str()));
        let params: Map = self
            .params
            .iter()
            .map(|(name, entry)| (name.clone(), entry.to_record()))
            .collect();
        let _ = record.insert("params".into(), Value::Map(params));
        if self.allow_params_in_body {
            let _ = record.insert("allow_params_in_body".into(), Value::Bool(true));
        }
        if !self.positional_params.is_empty() {
            let _ = record.insert("positional_params".into(), text_list(&self.positional_params));
        }
        if !self.output_types.is_empty() {
            let _ = record.insert("output_types".into(), text_list(&self.output_types));
        }
        if !self.input_types.is_empty() {
            let inputs = self.input_types.iter().cloned().map(Value::from).collect();
            let _ = record.insert("input_types".into(), Value::List(inputs));
        }
        Value::Map(record)
    }
}

/// Renders a params map as name to descriptive record.
#[must_use]
pub fn params_document(params: &BTreeMap<String, ParameterDef>) -> Value {
    params
        .iter()
        .map(|(name, def)| (name.as_str(), def.to_descriptive_record()))
        .collect()
}

/// Renders services keyed by name, each with `uri = base_uri + "/" + name`.
/// Returns [`Value::Null`] when there are no services.
#[must_use]
pub fn services_document(services: &BTreeMap<String, ServiceDescriptor>, base_uri: &str) -> Value {
    let docs: BTreeMap<String, ServiceDocument> = services
        .iter()
        .map(|(name, svc)| (name.clone(), ServiceDocument::from_descriptor(svc)))
        .collect();
    stored_services_document(&docs, base_uri)
}

/// Like [`services_document`], for service records that were loaded back
/// from storage.
#[must_use]
pub fn stored_services_document(docs: &BTreeMap<String, ServiceDocument>, base_uri: &str) -> Value {
    if docs.is_empty() {
        return Value::Null;
    }
    docs.iter()
        .map(|(name, doc)| (name.as_str(), doc.to_record(&format!("{base_uri}/{name}"))))
        .collect()
}

/// The fixed parameters a client supplies when creating a resource from the
/// component named `component_name`.
#[must_use]
pub fn resource_creation_params(component_name: &str) -> Value {
    let mut params = BTreeMap::new();
    let _ = params.insert(
        "suggested_name".to_string(),
        ParameterDef::required(
            ParameterType::String,
            "Can be used to suggest the resource name to the server",
        ),
    );
    // Literal defaults below always parse for their kinds.
    if let Ok(desc) = ParameterDef::optional(
        ParameterType::String,
        "Specifies a description for this new resource",
        &format!("A '{component_name}' resource"),
    ) {
        let _ = params.insert("desc".to_string(), desc);
    }
    if let Ok(specialized) = ParameterDef::optional(
        ParameterType::Boolean,
        "Specifies if we want to create a specialized component resource (true) or a normal resource (false)",
        "false",
    ) {
        let _ = params.insert("specialized".to_string(), specialized);
    }
    params_document(&params)
}

/// The self-describing document of a built component: `uri`, `name`,
/// `desc`, `doc`, `params`, `services` and `resource_creation_params`.
#[must_use]
pub fn metadata_document(built: &BuiltComponent, config: &ManifoldConfig) -> Value {
    let descriptor = &built.descriptor;
    let code_uri = config.code_uri(descriptor.name());
    tracing::debug!(component = %descriptor.name(), uri = %code_uri, "rendering metadata document");

    let mut doc = Map::new();
    let _ = doc.insert("uri".into(), Value::from(code_uri.as_str()));
    let _ = doc.insert("name".into(), Value::from(descriptor.name()));
    let _ = doc.insert("desc".into(), Value::from(descriptor.desc()));
    let _ = doc.insert("doc".into(), Value::from(format!("{code_uri}{DOC_SUFFIX}")));
    let _ = doc.insert("params".into(), params_document(descriptor.params()));
    let _ = doc.insert(
        "services".into(),
        services_document(descriptor.services(), &code_uri),
    );
    let _ = doc.insert(
        "resource_creation_params".into(),
        resource_creation_params(descriptor.name()),
    );
    Value::Map(doc)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_list()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn text_list(items: &[String]) -> Value {
    items.iter().map(|s| Value::from(s.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use manifold_value::deserialize;

    use super::*;
    use crate::builder::build;
    use crate::definition::{ComponentDefinition, ComponentInfo, ParameterDecl, ServiceDecl};

    fn built(services: Vec<ServiceDecl>) -> BuiltComponent {
        let def = ComponentDefinition {
            info: Some(ComponentInfo {
                name: "TestComponent".into(),
                desc: "Test".into(),
                doc: String::new(),
            }),
            params: vec![ParameterDecl::new("api_key", ParameterType::Password, "key")],
            services,
        };
        build(&def, &ManifoldConfig::default()).expect("build")
    }

    #[test]
    fn metadata_document_has_uris_and_creation_params() {
        let doc = metadata_document(&built(Vec::new()), &ManifoldConfig::default());
        assert_eq!(doc.get("uri"), Some(&Value::from("/code/TestComponent")));
        assert_eq!(doc.get("doc"), Some(&Value::from("/code/TestComponent/doc")));
        assert_eq!(doc.get("services"), Some(&Value::Null));

        let rcp = doc.get("resource_creation_params").expect("creation params");
        let desc_default = rcp.get("desc").and_then(|d| d.get("default"));
        assert_eq!(desc_default, Some(&Value::from("A 'TestComponent' resource")));
        let specialized = rcp.get("specialized").expect("specialized");
        assert_eq!(specialized.get("type"), Some(&Value::from("boolean")));
        assert_eq!(specialized.get("default"), Some(&Value::Bool(false)));
        let suggested = rcp.get("suggested_name").expect("suggested_name");
        assert_eq!(suggested.get("required"), Some(&Value::Bool(true)));
    }

    #[test]
    fn service_records_are_relative_to_the_base_uri() {
        let svc = ServiceDecl {
            name: "foobar".into(),
            desc: "Some service".into(),
            params_in_body: true,
            input_types: Some(vec![None]),
            params: vec![ParameterDecl {
                positional: true,
                ..ParameterDecl::new("text", ParameterType::String, "A text")
            }],
            ..ServiceDecl::default()
        };
        let component = built(vec![svc]);
        let doc = services_document(component.descriptor.services(), "/resource/MyRes");
        let record = doc.get("foobar").expect("service record");
        assert_eq!(record.get("uri"), Some(&Value::from("/resource/MyRes/foobar")));
        assert_eq!(record.get("allow_params_in_body"), Some(&Value::Bool(true)));
        assert_eq!(record.get("positional_params"), Some(&Value::List(vec!["text".into()])));
        assert_eq!(record.get("input_types"), Some(&Value::List(vec![Value::Null])));
        assert_eq!(
            record.get("output_types").and_then(Value::as_list).map(<[Value]>::len),
            Some(4)
        );
    }

    #[test]
    fn stored_record_renders_like_declared_one() {
        let component = built(vec![ServiceDecl {
            name: "s".into(),
            params: vec![ParameterDecl {
                default: Some("10".into()),
                ..ParameterDecl::new("num", ParameterType::Number, "n")
            }],
            ..ServiceDecl::default()
        }]);
        let live = services_document(component.descriptor.services(), "/code/X");
        let stored_record = live.get("s").expect("record").clone();

        let mut stored_map = stored_record.into_map().expect("map");
        let _ = stored_map.remove("uri");
        let doc = ServiceDocument::from_stored("s", &Value::Map(stored_map)).expect("stored");
        let docs: BTreeMap<_, _> = [("s".to_string(), doc)].into_iter().collect();
        assert_eq!(stored_services_document(&docs, "/code/X"), live);
    }

    #[test]
    fn stored_record_with_unknown_key_fails() {
        let stored = deserialize(r#"{"desc": "x", "handler": "foo"}"#).expect("decode");
        let err = ServiceDocument::from_stored("s", &stored).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown key 'handler'"), "got: {msg}");
        assert!(msg.contains("positional_params"), "got: {msg}");
    }

    #[test]
    fn stored_record_with_wrong_shape_fails() {
        let stored = deserialize(r#"{"positional_params": "num"}"#).expect("decode");
        assert!(ServiceDocument::from_stored("s", &stored).is_err());
    }

    #[test]
    fn mixed_param_entries_render_the_same() {
        let def = ParameterDef::optional(ParameterType::Number, "n", "3").expect("valid");
        let declared = ParamEntry::Declared(def.clone());
        let flattened = ParamEntry::Flattened(def.to_descriptive_record());
        assert_eq!(declared.to_record(), flattened.to_record());
    }
}
