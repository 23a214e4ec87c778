use crate::{RenderableItem, RenderableReport};

/// Render failing tags as GitHub Actions workflow command annotations.
///
/// Format: `::error title={tag}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    report
        .failure
        .iter()
        .map(|item| {
            let message = escape(&message(item));
            format!("::error title={}::{}", escape_property(&item.tag), message)
        })
        .collect()
}

fn message(item: &RenderableItem) -> String {
    let mut m = item
        .description
        .clone()
        .unwrap_or_else(|| "audit check failed".to_string());
    if let Some(name) = &item.name {
        m.push_str(&format!(" ({name})"));
    }
    m
}

fn escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape(s).replace(':', "%3A").replace(',', "%2C")
}
