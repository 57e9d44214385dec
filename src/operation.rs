//! Operation descriptors and schema loading.
//!
//! An [`Operation`] is the immutable definition of one callable endpoint:
//! a dotted name, an HTTP method, a path template with `{param}`
//! placeholders, and an optional host-override variable. Descriptors are
//! loaded once from a declarative YAML list into an [`OperationSet`];
//! required positional parameters and a human-readable call signature are
//! derived from the path template at load time.

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::SchemaError;
use crate::method::RestMethod;

/// Matches one `{param}` placeholder in a path template.
pub(crate) static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// The builtin npm registry ACL schema shipped with the crate.
const BUILTIN_SCHEMA: &str = include_str!("../operations.yml");

/// One schema entry as written in the YAML document.
#[derive(Debug, Deserialize)]
struct RawOperation {
    name: String,
    #[serde(default)]
    method: Option<String>,
    path: String,
    #[serde(default)]
    host: Option<String>,
}

/// Immutable definition of one callable endpoint.
#[derive(Debug, Clone)]
pub struct Operation {
    name: String,
    method: RestMethod,
    path: String,
    host_var: Option<String>,
    required_args: Vec<String>,
    signature: String,
}

impl Operation {
    fn from_raw(raw: RawOperation) -> Result<Self, SchemaError> {
        let method = match &raw.method {
            Some(value) => {
                RestMethod::from_str(value.trim()).map_err(|_| SchemaError::InvalidMethod {
                    operation: raw.name.clone(),
                    method: value.clone(),
                })?
            }
            None => RestMethod::default(),
        };

        let required_args = path_params(&raw.path);
        for (index, param) in required_args.iter().enumerate() {
            if required_args[..index].contains(param) {
                return Err(SchemaError::DuplicatePathParam {
                    operation: raw.name,
                    param: param.clone(),
                });
            }
        }

        let signature = derive_signature(&raw.name, method, &required_args);

        Ok(Self {
            name: raw.name,
            method,
            path: raw.path,
            host_var: raw.host,
            required_args,
            signature,
        })
    }

    /// Dotted-namespace identifier, e.g. `packages.get`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// HTTP method; GET when the schema entry omits one.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Path template with zero or more `{param}` placeholders.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Environment variable that overrides protocol+host for this
    /// operation, if the schema declares one.
    pub fn host_var(&self) -> Option<&str> {
        self.host_var.as_deref()
    }

    /// Required positional parameter names, in order of appearance in the
    /// path template.
    pub fn required_args(&self) -> &[String] {
        &self.required_args
    }

    /// Human-readable call signature, e.g.
    /// `packages.get(packageName, [query], [options])`.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Extracts placeholder names from a path template, in order of appearance.
fn path_params(path: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(path)
        .map(|captures| captures[1].to_string())
        .collect()
}

fn derive_signature(name: &str, method: RestMethod, required_args: &[String]) -> String {
    let mut parts: Vec<String> = required_args.to_vec();
    match method {
        RestMethod::Put | RestMethod::Post => parts.push("body".to_string()),
        RestMethod::Get => parts.push("[query]".to_string()),
        RestMethod::Delete => {}
    }
    parts.push("[options]".to_string());
    format!("{name}({})", parts.join(", "))
}

/// An ordered collection of operations, indexed by dotted name.
#[derive(Debug, Clone)]
pub struct OperationSet {
    operations: Vec<Operation>,
    index: HashMap<String, usize>,
}

impl OperationSet {
    /// Loads an operation set from a YAML document.
    ///
    /// ## Errors
    ///
    /// Returns a [`SchemaError`] if the document fails to parse, an
    /// operation name repeats, a method is invalid, or a path template
    /// repeats a placeholder.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        let raw: Vec<RawOperation> = serde_yaml::from_str(yaml)?;
        let mut operations = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());

        for entry in raw {
            let operation = Operation::from_raw(entry)?;
            if index
                .insert(operation.name().to_string(), operations.len())
                .is_some()
            {
                return Err(SchemaError::DuplicateOperation(operation.name().to_string()));
            }
            operations.push(operation);
        }

        Ok(Self { operations, index })
    }

    /// Loads the builtin npm registry ACL schema.
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::from_yaml_str(BUILTIN_SCHEMA)
    }

    /// Looks an operation up by dotted name.
    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.index.get(name).map(|&i| &self.operations[i])
    }

    /// Iterates operations in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
