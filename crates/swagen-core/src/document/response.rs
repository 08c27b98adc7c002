use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A response object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(flatten, default, skip_serializing_if = "IndexMap::is_empty")]
    pub extras: IndexMap<String, Value>,
}

impl Response {
    /// A stub response, synthesized for dangling `#/responses/...` refs.
    pub fn stub() -> Self {
        Self::default()
    }
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}
