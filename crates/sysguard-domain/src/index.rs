use crate::error::{RuleShapeError, ShapeError};
use crate::host::select_variant;
use crate::model::{CheckSpec, RuleDefinition};
use crate::normalize::normalize_value;
use crate::store::RuleStore;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use sysguard_types::entry::scalar_text;
use sysguard_types::{RuleEntry, ids};
use tracing::{debug, warn};

/// Canonical entries grouped by tag, tags in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagIndex {
    tags: Vec<(String, Vec<RuleEntry>)>,
    positions: BTreeMap<String, usize>,
}

/// A built index plus the rule ids that had to be dropped.
#[derive(Clone, Debug, Default)]
pub struct IndexBuild {
    pub index: TagIndex,
    pub errors: Vec<RuleShapeError>,
}

impl TagIndex {
    /// Resolve every stored rule for `host` and group the resulting entries by tag.
    ///
    /// A shape error anywhere in a rule id discards all of that id's entries; other ids are
    /// indexed normally.
    pub fn build(store: &RuleStore, host: Option<&str>) -> IndexBuild {
        let mut build = IndexBuild::default();
        for rule in store.rules() {
            match entries_for_rule(&rule.definition, host) {
                Ok(entries) => {
                    for entry in entries {
                        build.index.push(entry);
                    }
                }
                Err(source) => {
                    let err = RuleShapeError {
                        rule_id: rule.id.clone(),
                        profile: rule
                            .definition
                            .get(ids::KEY_PROFILE)
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        source,
                    };
                    warn!("skipping {err}");
                    build.errors.push(err);
                }
            }
        }
        debug!(
            tags = build.index.len(),
            entries = build.index.entry_count(),
            skipped = build.errors.len(),
            "built tag index"
        );
        build
    }

    pub fn push(&mut self, entry: RuleEntry) {
        match self.positions.get(&entry.tag) {
            Some(&pos) => self.tags[pos].1.push(entry),
            None => {
                self.positions.insert(entry.tag.clone(), self.tags.len());
                self.tags.push((entry.tag.clone(), vec![entry]));
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<&[RuleEntry]> {
        self.positions
            .get(tag)
            .map(|&pos| self.tags[pos].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleEntry])> {
        self.tags
            .iter()
            .map(|(tag, entries)| (tag.as_str(), entries.as_slice()))
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.tags.iter().map(|(_, entries)| entries.len()).sum()
    }
}

/// Canonical entries of one rule definition for `host`; empty when no pattern applies.
pub fn entries_for_rule(definition: &Value, host: Option<&str>) -> Result<Vec<RuleEntry>, ShapeError> {
    let def = RuleDefinition::from_value(definition)?;
    let Some(selected) = select_variant(host, &def.data) else {
        return Ok(Vec::new());
    };
    normalize_value(selected.pattern, selected.variant)?
        .into_iter()
        .map(|(name, spec)| canonical_entry(name, spec, &def.attrs))
        .collect()
}

/// Build one entry: reserved keys first, then the check's keys (minus `tag`), then whatever
/// rule-level keys the check did not already set.
pub fn canonical_entry(
    name: String,
    spec: CheckSpec,
    rule_attrs: &Map<String, Value>,
) -> Result<RuleEntry, ShapeError> {
    let (tag, check_attrs) = match spec {
        CheckSpec::Mapping(mut map) => {
            let tag = map
                .remove(ids::KEY_TAG)
                .ok_or_else(|| ShapeError::MissingTag {
                    check: name.clone(),
                })?;
            (tag_text(&name, &tag)?, map)
        }
        CheckSpec::Scalar(tag) => (tag_text(&name, &tag)?, Map::new()),
    };

    let mut entry = RuleEntry::new(name, tag);
    for (key, value) in check_attrs {
        if !is_reserved(&key) {
            entry.attrs.insert(key, value);
        }
    }
    for (key, value) in rule_attrs {
        if !is_reserved(key) && !entry.attrs.contains_key(key) {
            entry.attrs.insert(key.clone(), value.clone());
        }
    }
    Ok(entry)
}

fn tag_text(check: &str, tag: &Value) -> Result<String, ShapeError> {
    match tag {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(scalar_text(tag)),
        _ => Err(ShapeError::InvalidTag {
            check: check.to_string(),
        }),
    }
}

fn is_reserved(key: &str) -> bool {
    matches!(key, ids::KEY_NAME | ids::KEY_TAG | ids::KEY_MODULE)
}
