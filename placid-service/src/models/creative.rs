//! Creative generation request and the payload forwarded to Placid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /api/generate-ad`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreativeRequest {
    /// Template to render. Empty means "use the configured default".
    pub template_id: String,
    /// Layer name to value. Keys are passed through without checking them
    /// against the template's layers.
    pub modifications: BTreeMap<String, ModificationValue>,
    #[serde(default = "default_create_now")]
    pub create_now: bool,
}

fn default_create_now() -> bool {
    true
}

/// A single modification value as sent by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModificationValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<serde_json::Value>),
    Map(serde_json::Map<String, serde_json::Value>),
}

impl ModificationValue {
    /// String form sent upstream, or `None` for null (the entry is dropped).
    ///
    /// Booleans are capitalized (`True`/`False`). Lists and maps have no natural scalar form; they are sent as compact
    /// JSON text.
    pub fn to_modification_string(&self) -> Option<String> {
        match self {
            ModificationValue::Null => None,
            ModificationValue::Bool(true) => Some("True".to_string()),
            ModificationValue::Bool(false) => Some("False".to_string()),
            ModificationValue::Number(value) => Some(value.to_string()),
            ModificationValue::Text(value) => Some(value.clone()),
            ModificationValue::List(items) => {
                Some(serde_json::Value::Array(items.clone()).to_string())
            }
            ModificationValue::Map(entries) => {
                Some(serde_json::Value::Object(entries.clone()).to_string())
            }
        }
    }
}

impl CreativeRequest {
    /// The caller's template id when non-empty, else `default`.
    pub fn effective_template_id<'a>(&'a self, default: Option<&'a str>) -> Option<&'a str> {
        if self.template_id.is_empty() {
            default.filter(|id| !id.is_empty())
        } else {
            Some(&self.template_id)
        }
    }
}

/// Drop null values and stringify everything else.
pub fn clean_modifications(
    modifications: &BTreeMap<String, ModificationValue>,
) -> BTreeMap<String, String> {
    modifications
        .iter()
        .filter_map(|(key, value)| {
            value
                .to_modification_string()
                .map(|text| (key.clone(), text))
        })
        .collect()
}

/// JSON body of `POST /api/rest/{template_id}` on the Placid API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativePayload {
    pub create_now: bool,
    pub modifications: BTreeMap<String, String>,
}

impl From<&CreativeRequest> for CreativePayload {
    fn from(request: &CreativeRequest) -> Self {
        Self {
            create_now: request.create_now,
            modifications: clean_modifications(&request.modifications),
        }
    }
}
