use crate::entry::RuleEntry;
use crate::ids;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Stable schema identifier for the JSON envelope.
pub const SCHEMA_REPORT_V1: &str = "sysguard.report.v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
    Controlled,
}

/// What a report item says about its tag.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemBody {
    /// Summary mode: the rule description (`null` when the rule has none).
    Description(Value),
    /// Summary mode for exempted rules.
    Controlled { description: Value, control: Value },
    /// Verbose mode: the whole canonical entry.
    Entry(RuleEntry),
}

/// A single-key `{tag: body}` item.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportItem {
    pub tag: String,
    pub body: ItemBody,
}

impl ReportItem {
    pub fn description(&self) -> Option<&Value> {
        match &self.body {
            ItemBody::Description(d) => Some(d),
            ItemBody::Controlled { description, .. } => Some(description),
            ItemBody::Entry(entry) => entry.description(),
        }
        .filter(|v| !v.is_null())
    }

    pub fn control(&self) -> Option<&Value> {
        match &self.body {
            ItemBody::Controlled { control, .. } => Some(control),
            ItemBody::Entry(entry) => entry.control(),
            ItemBody::Description(_) => None,
        }
    }

    /// Rebuild an item read from JSON. The body shape follows from the report mode and the
    /// category holding the item; keys inside the body are never inspected to guess it.
    fn from_json(
        item: Map<String, Value>,
        outcome: Outcome,
        verbose: bool,
    ) -> Result<Self, String> {
        if item.len() != 1 {
            return Err(format!(
                "report item must have exactly one key, found {}",
                item.len()
            ));
        }
        let Some((tag, value)) = item.into_iter().next() else {
            return Err("empty report item".to_string());
        };
        let body = if verbose {
            let entry = serde_json::from_value(value)
                .map_err(|err| format!("item `{tag}` is not a rule entry: {err}"))?;
            ItemBody::Entry(entry)
        } else if outcome == Outcome::Controlled {
            let Value::Object(mut obj) = value else {
                return Err(format!("controlled item `{tag}` must be a mapping"));
            };
            ItemBody::Controlled {
                description: obj.remove(ids::KEY_DESCRIPTION).unwrap_or(Value::Null),
                control: obj
                    .remove(ids::KEY_CONTROL)
                    .unwrap_or_else(|| Value::String(String::new())),
            }
        } else {
            ItemBody::Description(value)
        };
        Ok(ReportItem { tag, body })
    }
}

impl Serialize for ReportItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match &self.body {
            ItemBody::Description(description) => map.serialize_entry(&self.tag, description)?,
            ItemBody::Controlled {
                description,
                control,
            } => {
                let mut inner = Map::new();
                inner.insert(ids::KEY_DESCRIPTION.to_string(), description.clone());
                inner.insert(ids::KEY_CONTROL.to_string(), control.clone());
                map.serialize_entry(&self.tag, &inner)?
            }
            ItemBody::Entry(entry) => map.serialize_entry(&self.tag, entry)?,
        }
        map.end()
    }
}

/// Outcome categories of one audit run.
///
/// `Controlled` is `None` (and absent from JSON) unless at least one rule was exempted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Report {
    #[serde(rename = "Success", default)]
    pub success: Vec<ReportItem>,
    #[serde(rename = "Failure", default)]
    pub failure: Vec<ReportItem>,
    #[serde(
        rename = "Controlled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub controlled: Option<Vec<ReportItem>>,
}

impl Report {
    pub fn items(&self, outcome: Outcome) -> &[ReportItem] {
        match outcome {
            Outcome::Success => &self.success,
            Outcome::Failure => &self.failure,
            Outcome::Controlled => self.controlled.as_deref().unwrap_or(&[]),
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failure.is_empty()
    }

    /// Read a report back from JSON. `verbose` must be the mode it was written in: it
    /// decides whether items hold full entries or summaries.
    pub fn from_json(value: Value, verbose: bool) -> Result<Self, serde_json::Error> {
        let raw: RawReport = serde_json::from_value(value)?;
        let items = |list: Vec<Map<String, Value>>, outcome: Outcome| {
            list.into_iter()
                .map(|item| ReportItem::from_json(item, outcome, verbose))
                .collect::<Result<Vec<_>, _>>()
                .map_err(serde_json::Error::custom)
        };
        Ok(Report {
            success: items(raw.success, Outcome::Success)?,
            failure: items(raw.failure, Outcome::Failure)?,
            controlled: raw
                .controlled
                .map(|list| items(list, Outcome::Controlled))
                .transpose()?,
        })
    }
}

/// `Report` as written, before item bodies are interpreted.
#[derive(Deserialize)]
struct RawReport {
    #[serde(rename = "Success", default)]
    success: Vec<Map<String, Value>>,
    #[serde(rename = "Failure", default)]
    failure: Vec<Map<String, Value>>,
    #[serde(rename = "Controlled", default)]
    controlled: Option<Vec<Map<String, Value>>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// A rule id the engine had to drop because its document shape was unusable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRule {
    pub rule_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub reason: String,
}

/// JSON envelope written by the CLI around a [`Report`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAuditReport")]
pub struct AuditReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub tags: String,
    pub verbose: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRule>,
    pub result: Report,
}

#[derive(Deserialize)]
struct RawAuditReport {
    schema: String,
    tool: ToolMeta,
    #[serde(with = "time::serde::rfc3339")]
    started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    finished_at: OffsetDateTime,
    #[serde(default)]
    host: Option<String>,
    tags: String,
    #[serde(default)]
    verbose: bool,
    #[serde(default)]
    skipped: Vec<SkippedRule>,
    result: Value,
}

impl TryFrom<RawAuditReport> for AuditReport {
    type Error = serde_json::Error;

    fn try_from(raw: RawAuditReport) -> Result<Self, Self::Error> {
        Ok(AuditReport {
            result: Report::from_json(raw.result, raw.verbose)?,
            schema: raw.schema,
            tool: raw.tool,
            started_at: raw.started_at,
            finished_at: raw.finished_at,
            host: raw.host,
            tags: raw.tags,
            verbose: raw.verbose,
            skipped: raw.skipped,
        })
    }
}
