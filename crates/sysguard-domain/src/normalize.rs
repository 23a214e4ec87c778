use crate::error::ShapeError;
use crate::model::{CheckSpec, Variant};
use serde_json::Value;

/// Flatten a variant into `(checkName, CheckSpec)` pairs.
///
/// List items keep their order; a list item carrying several keys contributes each of them
/// in turn. Mapping variants come out in document order.
pub fn normalize(variant: &Variant) -> Vec<(String, CheckSpec)> {
    match variant {
        Variant::List(items) => items.iter().flat_map(pairs).collect(),
        Variant::Map(map) => pairs(map),
    }
}

/// Parse and normalize in one step.
pub fn normalize_value(pattern: &str, value: &Value) -> Result<Vec<(String, CheckSpec)>, ShapeError> {
    Variant::from_value(pattern, value).map(|variant| normalize(&variant))
}

fn pairs(map: &serde_json::Map<String, Value>) -> Vec<(String, CheckSpec)> {
    map.iter()
        .map(|(name, spec)| (name.clone(), CheckSpec::from_value(spec.clone())))
        .collect()
}
