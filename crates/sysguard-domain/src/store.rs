use crate::model::ProfileDocument;
use serde_json::Value;
use sysguard_types::ids;
use tracing::debug;

/// One `{ruleId: RuleDefinition}` entry as merged from a document.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredRule {
    pub id: String,
    pub definition: Value,
}

/// Raw rule definitions from every document of a run, in merge order.
///
/// Rule ids are not deduplicated: the same id from two documents is two entries, and each
/// contributes to the tag index on its own.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleStore {
    rules: Vec<StoredRule>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from profile documents, stamping provenance when `show_profile` is set.
    pub fn from_documents(documents: &[ProfileDocument], show_profile: bool) -> Self {
        let mut store = Self::new();
        for doc in documents {
            let profile = show_profile.then_some(doc.profile.as_str());
            store.merge(&doc.document, profile);
        }
        store
    }

    /// Append every rule under the document's `sysctl` key.
    ///
    /// With a profile, mapping definitions get `nova_profile` set to it first.
    pub fn merge(&mut self, document: &Value, profile: Option<&str>) -> &mut Self {
        let Some(section) = document.get(ids::MODULE_SYSCTL) else {
            debug!("document has no `{}` section", ids::MODULE_SYSCTL);
            return self;
        };
        let Some(section) = section.as_object() else {
            debug!("`{}` section is not a mapping; ignoring it", ids::MODULE_SYSCTL);
            return self;
        };

        for (id, definition) in section {
            let mut definition = definition.clone();
            if let (Some(profile), Some(obj)) = (profile, definition.as_object_mut()) {
                obj.insert(ids::KEY_PROFILE.to_string(), Value::String(profile.to_string()));
            }
            self.rules.push(StoredRule {
                id: id.clone(),
                definition,
            });
        }
        debug!(rules = self.rules.len(), "merged rule document");
        self
    }

    pub fn rules(&self) -> &[StoredRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(ids: &[&str]) -> Value {
        let section: serde_json::Map<String, Value> = ids
            .iter()
            .map(|id| (id.to_string(), json!({"data": {}, "description": id})))
            .collect();
        json!({ "sysctl": section })
    }

    #[test]
    fn merge_keeps_duplicate_ids() {
        let mut store = RuleStore::new();
        store.merge(&doc(&["aslr", "suid"]), None);
        store.merge(&doc(&["aslr"]), None);

        let ids: Vec<&str> = store.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["aslr", "suid", "aslr"]);
    }

    #[test]
    fn merge_injects_profile_only_when_given() {
        let mut store = RuleStore::new();
        store.merge(&doc(&["aslr"]), Some("cis.centos-7"));
        store.merge(&doc(&["suid"]), None);

        assert_eq!(store.rules()[0].definition["nova_profile"], "cis.centos-7");
        assert!(store.rules()[1].definition.get("nova_profile").is_none());
    }

    #[test]
    fn merge_leaves_non_mapping_definitions_untouched() {
        let mut store = RuleStore::new();
        store.merge(&json!({"sysctl": {"odd": "not a mapping"}}), Some("p"));
        assert_eq!(store.rules()[0].definition, json!("not a mapping"));
    }

    #[test]
    fn documents_without_section_contribute_nothing() {
        let mut store = RuleStore::new();
        store.merge(&json!({"grep": {"x": {}}}), None);
        store.merge(&json!({"sysctl": ["not", "a", "mapping"]}), None);
        store.merge(&json!(null), None);
        assert!(store.is_empty());
    }

    #[test]
    fn from_documents_respects_show_profile() {
        let docs = vec![ProfileDocument::new("cis", doc(&["aslr"]))];
        let plain = RuleStore::from_documents(&docs, false);
        let tracked = RuleStore::from_documents(&docs, true);
        assert!(plain.rules()[0].definition.get("nova_profile").is_none());
        assert_eq!(tracked.rules()[0].definition["nova_profile"], "cis");
    }
}
