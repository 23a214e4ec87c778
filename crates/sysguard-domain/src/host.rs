use crate::glob::glob_match;
use serde_json::{Map, Value};
use sysguard_types::ids;

/// The variant chosen for a host, with the pattern key that selected it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selected<'a> {
    pub pattern: &'a str,
    pub variant: &'a Value,
}

/// Pick the variant that applies to `host`.
///
/// Pattern keys are tried in document order and the first key with a matching glob wins;
/// there is no specificity scoring. A key may list several globs separated by commas. The
/// literal `*` key is only consulted when nothing else matched. A matching key whose variant
/// is empty (`null`) does not count as a match.
///
/// Without a host identity only the `*` fallback can apply.
pub fn select_variant<'a>(host: Option<&str>, patterns: &'a Map<String, Value>) -> Option<Selected<'a>> {
    if let Some(host) = host {
        for (key, variant) in patterns {
            if key == ids::WILDCARD_PATTERN || variant.is_null() {
                continue;
            }
            if key.split(',').map(str::trim).any(|glob| glob_match(host, glob)) {
                return Some(Selected {
                    pattern: key,
                    variant,
                });
            }
        }
    }

    patterns
        .get_key_value(ids::WILDCARD_PATTERN)
        .filter(|(_, variant)| !variant.is_null())
        .map(|(pattern, variant)| Selected {
            pattern: pattern.as_str(),
            variant,
        })
}
