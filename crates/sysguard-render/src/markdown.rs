use crate::{RenderableItem, RenderableReport, RenderableStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Sysguard audit\n\n");
    let status = match report.status {
        RenderableStatus::Pass => "PASS",
        RenderableStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Status: **{}**\n- Host: `{}`\n- Tags: `{}`\n- Passed: {} / Failed: {} / Controlled: {}\n\n",
        status,
        report.host.as_deref().unwrap_or("unknown"),
        report.tags,
        report.success.len(),
        report.failure.len(),
        report.controlled.len()
    ));

    if !report.skipped.is_empty() {
        out.push_str(&format!(
            "> Note: {} malformed rule(s) skipped\n",
            report.skipped.len()
        ));
        for s in &report.skipped {
            out.push_str(&format!(">  - {}\n", s));
        }
        out.push('\n');
    }

    if report.success.is_empty() && report.failure.is_empty() && report.controlled.is_empty() {
        out.push_str("No rules applied.\n");
        return out;
    }

    section(&mut out, "Failure", &report.failure);
    section(&mut out, "Controlled", &report.controlled);
    section(&mut out, "Success", &report.success);

    out
}

fn section(out: &mut String, title: &str, items: &[RenderableItem]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("## {}\n\n", title));
    for item in items {
        out.push_str(&format!(
            "- `{}` {}",
            item.tag,
            item.description.as_deref().unwrap_or("(no description)")
        ));
        if let Some(name) = &item.name {
            out.push_str(&format!(" (`{}`)", name));
        }
        out.push('\n');
        if let Some(control) = &item.control {
            out.push_str(&format!("  - control: {}\n", control));
        }
        if let Some(profile) = &item.profile {
            out.push_str(&format!("  - profile: {}\n", profile));
        }
    }
    out.push('\n');
}
