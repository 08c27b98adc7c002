use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    #[serde(rename = "formData")]
    FormData,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Body => "body",
        }
    }
}

/// An operation parameter.
///
/// Non-body parameters carry their schema keywords inline (`type`, `format`,
/// `items`, `enum`, ...); those land in `keywords` so the converter can
/// reshape them into a property schema without enumerating the vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Body parameters only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(flatten, default, skip_serializing_if = "IndexMap::is_empty")]
    pub keywords: IndexMap<String, Value>,
}

impl Parameter {
    /// A stub parameter, synthesized for dangling `#/parameters/...` refs.
    pub fn stub(name: &str) -> Self {
        Self {
            name: name.to_string(),
            location: ParameterLocation::Query,
            description: None,
            required: false,
            schema: None,
            keywords: IndexMap::new(),
        }
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Box<Parameter>),
}
