use crate::ids;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One fully resolved check, ready for evaluation and reporting.
///
/// `attrs` carries everything else the rule author wrote: the check's own keys (minus
/// `tag`) followed by the rule definition's keys (minus `data`). It serializes flat, so a
/// verbose report shows the entry exactly as one mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub name: String,
    pub tag: String,
    pub module: String,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl RuleEntry {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            module: ids::MODULE_SYSCTL.to_string(),
            attrs: Map::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Any `control` key marks the entry as exempt, whatever its value.
    pub fn is_controlled(&self) -> bool {
        self.attrs.contains_key(ids::KEY_CONTROL)
    }

    pub fn control(&self) -> Option<&Value> {
        self.attrs.get(ids::KEY_CONTROL)
    }

    pub fn description(&self) -> Option<&Value> {
        self.attrs.get(ids::KEY_DESCRIPTION)
    }

    pub fn match_output(&self) -> Option<&Value> {
        self.attrs.get(ids::KEY_MATCH_OUTPUT)
    }

    pub fn profile(&self) -> Option<&str> {
        self.attrs.get(ids::KEY_PROFILE).and_then(Value::as_str)
    }
}

/// Plain-text form of a document scalar, used wherever values are compared as strings.
///
/// Strings are taken verbatim (no JSON quoting); `null` becomes the empty string.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
