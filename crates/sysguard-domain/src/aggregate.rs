use crate::evaluate::ClassifiedResult;
use serde_json::Value;
use std::collections::BTreeSet;
use sysguard_types::{ItemBody, Report, ReportItem, RuleEntry};

/// Shape classified results into the report.
///
/// Summary mode keeps one `{tag: description}` item per distinct (tag, description) pair,
/// and one `{tag: {description, control}}` item per distinct (tag, description, control) for
/// exempted rules; first occurrence wins. Verbose mode keeps every result with its full
/// entry. `Controlled` is left out when nothing was exempted.
pub fn aggregate(classified: Vec<ClassifiedResult>, verbose: bool) -> Report {
    let mut success = Vec::new();
    let mut failure = Vec::new();
    let mut controlled = Vec::new();
    for result in classified {
        match result {
            ClassifiedResult::Success(e) => success.push(e),
            ClassifiedResult::Failure(e) => failure.push(e),
            ClassifiedResult::Controlled(e) => controlled.push(e),
        }
    }

    let (success, failure, controlled) = if verbose {
        (full(success), full(failure), full(controlled))
    } else {
        (
            described(success),
            described(failure),
            controlled_summary(controlled),
        )
    };

    Report {
        success,
        failure,
        controlled: (!controlled.is_empty()).then_some(controlled),
    }
}

fn full(entries: Vec<RuleEntry>) -> Vec<ReportItem> {
    entries
        .into_iter()
        .map(|entry| ReportItem {
            tag: entry.tag.clone(),
            body: ItemBody::Entry(entry),
        })
        .collect()
}

fn described(entries: Vec<RuleEntry>) -> Vec<ReportItem> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for entry in entries {
        let description = entry.description().cloned().unwrap_or(Value::Null);
        if seen.insert((entry.tag.clone(), description.to_string())) {
            out.push(ReportItem {
                tag: entry.tag,
                body: ItemBody::Description(description),
            });
        }
    }
    out
}

fn controlled_summary(entries: Vec<RuleEntry>) -> Vec<ReportItem> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for entry in entries {
        let description = entry.description().cloned().unwrap_or(Value::Null);
        let control = entry
            .control()
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        let key = (
            entry.tag.clone(),
            description.to_string(),
            control.to_string(),
        );
        if seen.insert(key) {
            out.push(ReportItem {
                tag: entry.tag,
                body: ItemBody::Controlled {
                    description,
                    control,
                },
            });
        }
    }
    out
}
