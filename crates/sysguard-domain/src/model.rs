use crate::error::ShapeError;
use serde_json::{Map, Value};
use sysguard_types::ids;

/// A parsed rule document and the profile it was loaded from.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileDocument {
    pub profile: String,
    pub document: Value,
}

impl ProfileDocument {
    pub fn new(profile: impl Into<String>, document: Value) -> Self {
        Self {
            profile: profile.into(),
            document,
        }
    }
}

/// Typed view over one rule definition.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleDefinition {
    /// Host pattern -> variant, in document order.
    pub data: Map<String, Value>,

    /// Every other key (`description`, `alert`, `trigger`, `nova_profile`, ...).
    pub attrs: Map<String, Value>,
}

impl RuleDefinition {
    pub fn from_value(value: &Value) -> Result<Self, ShapeError> {
        let Value::Object(obj) = value else {
            return Err(ShapeError::DefinitionNotMapping);
        };
        let data = match obj.get(ids::KEY_DATA) {
            None => return Err(ShapeError::MissingData),
            Some(Value::Object(data)) => data.clone(),
            // `data:` with nothing under it applies to no host.
            Some(Value::Null) => Map::new(),
            Some(_) => return Err(ShapeError::DataNotMapping),
        };
        let attrs = obj
            .iter()
            .filter(|(k, _)| k.as_str() != ids::KEY_DATA)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Self { data, attrs })
    }
}

/// What a rule author wrote under a check name.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckSpec {
    /// Legacy shorthand: the scalar itself is the tag.
    Scalar(Value),
    /// `tag`, `match_output`, optional `control`, and free-form keys.
    Mapping(Map<String, Value>),
}

impl CheckSpec {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => CheckSpec::Mapping(map),
            other => CheckSpec::Scalar(other),
        }
    }
}

/// The checks selected for a host, in either accepted document shape.
///
/// Both shapes mean the same thing; [`crate::normalize::normalize`] flattens either into
/// `(checkName, CheckSpec)` pairs.
#[derive(Clone, Debug, PartialEq)]
pub enum Variant {
    /// `- checkName: spec` items.
    List(Vec<Map<String, Value>>),
    /// `checkName: spec` written directly as a mapping.
    Map(Map<String, Value>),
}

impl Variant {
    /// `pattern` only feeds error messages.
    pub fn from_value(pattern: &str, value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::Object(map) => Ok(Variant::Map(map.clone())),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(map) => Ok(map.clone()),
                    _ => Err(ShapeError::VariantItem {
                        pattern: pattern.to_string(),
                        index,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Variant::List),
            _ => Err(ShapeError::VariantShape {
                pattern: pattern.to_string(),
            }),
        }
    }
}
