use anyhow::Context;
use serde_json::Value;
use std::collections::BTreeMap;
use sysguard_domain::ValueLookup;
use sysguard_domain::error::LookupError;
use sysguard_types::entry::scalar_text;

/// Parameter values captured from a host, keyed by dotted parameter name.
///
/// Built from a YAML (or JSON) mapping such as `{"kernel.randomize_va_space": 2}`. Scalars are
/// compared by their text form; list values are joined with tabs, the way multi-field kernel
/// parameters print.
#[derive(Clone, Debug, Default)]
pub struct SnapshotLookup {
    values: BTreeMap<String, String>,
}

impl SnapshotLookup {
    pub fn from_text(text: &str) -> anyhow::Result<Self> {
        let doc = crate::load::parse_document(text).context("parse values snapshot")?;
        let map = match doc {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::default()),
            _ => anyhow::bail!("values snapshot must be a mapping of parameter names to values"),
        };
        let values = map
            .into_iter()
            .map(|(k, v)| (k, value_text(&v)))
            .collect();
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join("\t"),
        other => scalar_text(other),
    }
}

impl ValueLookup for SnapshotLookup {
    fn lookup(&self, parameter: &str) -> Result<String, LookupError> {
        self.values
            .get(parameter)
            .cloned()
            .ok_or_else(|| LookupError::Unavailable(parameter.to_string()))
    }
}
