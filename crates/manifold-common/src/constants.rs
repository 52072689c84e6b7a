//! System-wide constants and defaults.

/// URI prefix under which component code (metadata) is published.
pub const PREFIX_CODE: &str = "/code";

/// URI prefix under which resources are published.
pub const PREFIX_RESOURCE: &str = "/resource";

/// URI prefix under which specialized component resources are published.
pub const PREFIX_SPECIALIZED: &str = "/specialized";

/// Content types a service produces when it declares none.
pub const DEFAULT_OUTPUT_TYPES: &[&str] = &["application/json", "application/xml", "text/html", "*/*"];

/// Content types a service accepts when it declares none.
pub const DEFAULT_INPUT_TYPES: &[&str] = &["application/json", "application/x-www-form-urlencoded"];

/// Content type that matches any request body.
pub const ANY_INPUT: &str = "";

/// Suffix appended to a component's code URI to form its documentation link.
pub const DOC_SUFFIX: &str = "/doc";

/// Keys a stored service record may carry.
pub const ALLOWABLE_SERVICE_KEYS: &[&str] = &[
    "desc",
    "params",
    "positional_params",
    "allow_params_in_body",
    "output_types",
    "input_types",
];
