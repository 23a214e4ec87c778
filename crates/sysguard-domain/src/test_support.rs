use crate::error::LookupError;
use crate::evaluate::ValueLookup;
use crate::index::TagIndex;
use crate::store::RuleStore;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::BTreeMap;
use sysguard_types::RuleEntry;

/// Lookup table that records every parameter it was asked for.
pub struct FakeLookup {
    values: BTreeMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl FakeLookup {
    pub fn new(values: &[(&str, &str)]) -> Self {
        Self {
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ValueLookup for FakeLookup {
    fn lookup(&self, parameter: &str) -> Result<String, LookupError> {
        self.calls.borrow_mut().push(parameter.to_string());
        self.values
            .get(parameter)
            .cloned()
            .ok_or_else(|| LookupError::Unavailable(parameter.to_string()))
    }
}

pub fn entry(name: &str, tag: &str, match_output: &str) -> RuleEntry {
    RuleEntry::new(name, tag).with_attr("match_output", match_output)
}

pub fn index_of(entries: Vec<RuleEntry>) -> TagIndex {
    let mut index = TagIndex::default();
    for e in entries {
        index.push(e);
    }
    index
}

pub fn store_of(documents: &[Value]) -> RuleStore {
    let mut store = RuleStore::new();
    for doc in documents {
        store.merge(doc, None);
    }
    store
}

/// The canonical address-space randomization rule, one variant per CentOS release.
pub fn aslr_document() -> Value {
    json!({
        "sysctl": {
            "randomize_va_space": {
                "data": {
                    "CentOS-6": [
                        {"kernel.randomize_va_space": {"tag": "CIS-1.6.3", "match_output": "2"}}
                    ],
                    "CentOS-7": [
                        {"kernel.randomize_va_space": {"tag": "CIS-1.6.2", "match_output": "2"}}
                    ]
                },
                "description": "Enable Randomized Virtual Memory Region Placement (Scored)",
                "alert": "email",
                "trigger": "state"
            }
        }
    })
}
