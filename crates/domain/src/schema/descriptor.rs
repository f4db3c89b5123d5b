//! Self-describing schema descriptors for discovery by external tooling.

use serde::{Deserialize, Serialize};

use super::field::{FieldKind, FieldSpec};

/// Everything a UI or doc generator needs to know about one device type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDescriptor {
    pub domain: String,
    pub commands: Vec<ActionDescriptor>,
    pub events: Vec<ActionDescriptor>,
}

/// One action and the fields it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub action: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
}

impl FieldDescriptor {
    pub(crate) fn required(spec: &FieldSpec) -> Self {
        let (min, max, len) = match spec.kind {
            FieldKind::Int { min, max } => (min, max, None),
            FieldKind::IntList { len } => (None, None, len),
            FieldKind::Text { .. } => (None, None, None),
        };
        Self {
            name: spec.name.to_string(),
            type_tag: spec.kind.type_tag().to_string(),
            required: true,
            min,
            max,
            len,
        }
    }
}
