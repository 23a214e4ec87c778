//! Render use cases: markdown and GitHub annotations from audit reports.

use anyhow::Context;
use serde_json::Value;
use sysguard_render::{RenderableItem, RenderableReport, RenderableStatus};
use sysguard_types::entry::scalar_text;
use sysguard_types::{AuditReport, ItemBody, ReportItem};

pub fn to_renderable(report: &AuditReport) -> RenderableReport {
    let result = &report.result;
    RenderableReport {
        status: if result.has_failures() {
            RenderableStatus::Fail
        } else {
            RenderableStatus::Pass
        },
        host: report.host.clone(),
        tags: report.tags.clone(),
        success: result.success.iter().map(item).collect(),
        failure: result.failure.iter().map(item).collect(),
        controlled: result
            .controlled
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(item)
            .collect(),
        skipped: report
            .skipped
            .iter()
            .map(|s| match &s.profile {
                Some(profile) => format!("rule `{}` ({}): {}", s.rule_id, profile, s.reason),
                None => format!("rule `{}`: {}", s.rule_id, s.reason),
            })
            .collect(),
    }
}

fn item(it: &ReportItem) -> RenderableItem {
    let (name, profile) = match &it.body {
        ItemBody::Entry(entry) => (
            Some(entry.name.clone()),
            entry.profile().map(str::to_string),
        ),
        _ => (None, None),
    };
    RenderableItem {
        tag: it.tag.clone(),
        description: it.description().map(scalar_text),
        control: it.control().map(text_or_blank),
        name,
        profile,
    }
}

fn text_or_blank(v: &Value) -> String {
    match scalar_text(v) {
        s if s.is_empty() => "(none)".to_string(),
        s => s,
    }
}

pub fn render_markdown(report: &AuditReport) -> String {
    sysguard_render::render_markdown(&to_renderable(report))
}

pub fn render_annotations(report: &AuditReport, max: usize) -> Vec<String> {
    sysguard_render::render_github_annotations(&to_renderable(report))
        .into_iter()
        .take(max)
        .collect()
}

pub fn serialize_report(report: &AuditReport) -> anyhow::Result<String> {
    let mut text = serde_json::to_string_pretty(report).context("serialize report")?;
    text.push('\n');
    Ok(text)
}

pub fn parse_report_json(text: &str) -> anyhow::Result<AuditReport> {
    serde_json::from_str(text).context("parse report JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sysguard_types::{Report, RuleEntry, SCHEMA_REPORT_V1, SkippedRule, ToolMeta};
    use time::macros::datetime;

    fn sample_report() -> AuditReport {
        let failing = RuleEntry::new("net.ipv4.ip_forward", "CIS-4.1.1")
            .with_attr("description", "Disable IP Forwarding (Scored)")
            .with_attr("match_output", "0")
            .with_attr("nova_profile", "cis.centos-7");
        AuditReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "sysguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: datetime!(2026-01-01 00:00:00 UTC),
            finished_at: datetime!(2026-01-01 00:00:01 UTC),
            host: Some("CentOS-7".to_string()),
            tags: "*".to_string(),
            verbose: false,
            skipped: vec![SkippedRule {
                rule_id: "broken".to_string(),
                profile: Some("cis".to_string()),
                reason: "rule definition has no `data` key".to_string(),
            }],
            result: Report {
                success: vec![ReportItem {
                    tag: "CIS-1.6.2".to_string(),
                    body: ItemBody::Description(json!("ASLR")),
                }],
                failure: vec![ReportItem {
                    tag: "CIS-4.1.1".to_string(),
                    body: ItemBody::Entry(failing),
                }],
                controlled: Some(vec![ReportItem {
                    tag: "CIS-4.1.2".to_string(),
                    body: ItemBody::Controlled {
                        description: json!("Disable redirects"),
                        control: Value::Null,
                    },
                }]),
            },
        }
    }

    #[test]
    fn renderable_carries_entry_details() {
        let r = to_renderable(&sample_report());
        assert_eq!(r.status, RenderableStatus::Fail);
        assert_eq!(r.success[0].description.as_deref(), Some("ASLR"));
        assert_eq!(r.failure[0].name.as_deref(), Some("net.ipv4.ip_forward"));
        assert_eq!(r.failure[0].profile.as_deref(), Some("cis.centos-7"));
        assert_eq!(r.controlled[0].control.as_deref(), Some("(none)"));
        assert_eq!(
            r.skipped,
            ["rule `broken` (cis): rule definition has no `data` key"]
        );
    }

    #[test]
    fn markdown_and_annotations() {
        let report = sample_report();
        let md = render_markdown(&report);
        assert!(md.contains("Status: **FAIL**"));
        assert!(md.contains("Disable IP Forwarding (Scored)"));

        let annotations = render_annotations(&report, 10);
        assert_eq!(annotations.len(), 1);
        assert!(annotations[0].starts_with("::error title=CIS-4.1.1::"));
        assert!(render_annotations(&report, 0).is_empty());
    }

    #[test]
    fn summary_report_json_survives_a_round_trip() {
        let mut report = sample_report();
        report.result.failure[0].body = ItemBody::Description(json!({"lang": "en"}));
        let text = serialize_report(&report).expect("serialize");
        assert!(text.ends_with('\n'));
        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed, report);
    }

    #[test]
    fn verbose_report_json_reads_back_entries() {
        let mut report = sample_report();
        report.verbose = true;
        report.result.success[0].body = ItemBody::Entry(
            RuleEntry::new("kernel.randomize_va_space", "CIS-1.6.2")
                .with_attr("description", "ASLR")
                .with_attr("match_output", "2"),
        );
        report.result.controlled = Some(vec![ReportItem {
            tag: "CIS-4.1.2".to_string(),
            body: ItemBody::Entry(
                RuleEntry::new("net.ipv4.conf.all.send_redirects", "CIS-4.1.2")
                    .with_attr("description", "Disable redirects")
                    .with_attr("control", "router"),
            ),
        }]);
        let text = serialize_report(&report).expect("serialize");
        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed, report);

        let r = to_renderable(&parsed);
        assert_eq!(r.failure[0].name.as_deref(), Some("net.ipv4.ip_forward"));
        assert_eq!(r.controlled[0].control.as_deref(), Some("router"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_report_json("{not json").is_err());
    }
}
