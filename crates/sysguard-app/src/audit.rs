//! The `audit` use case: resolve config, load rule documents, evaluate, and wrap the report.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use sysguard_domain::ValueLookup;
use sysguard_settings::{Overrides, ResolvedConfig, SysguardConfigV1};
use sysguard_types::{AuditReport, SCHEMA_REPORT_V1, SkippedRule, ToolMeta};
use time::OffsetDateTime;
use tracing::info;

/// Input for the audit use case.
pub struct AuditInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Relative rule paths are resolved against this directory.
    pub base_dir: &'a Utf8Path,
    /// Source of live parameter values.
    pub lookup: &'a dyn ValueLookup,
}

/// Output from the audit use case.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub report: AuditReport,
    pub resolved: ResolvedConfig,
}

pub fn run_audit(input: AuditInput<'_>) -> anyhow::Result<AuditOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = if input.config_text.trim().is_empty() {
        SysguardConfigV1::default()
    } else {
        sysguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        sysguard_settings::resolve_config(cfg, input.overrides).context("resolve config")?;

    if resolved.rules.is_empty() {
        anyhow::bail!("no rule paths given (use --rules or `rules` in sysguard.toml)");
    }
    let paths: Vec<Utf8PathBuf> = resolved
        .rules
        .iter()
        .map(|p| input.base_dir.join(p))
        .collect();
    let documents = crate::load::load_documents(&paths).context("load rule documents")?;

    let run = sysguard_domain::audit(&documents, &resolved.options, input.lookup);
    info!(
        rules = run.rules_merged,
        entries = run.entries_indexed,
        success = run.report.success.len(),
        failure = run.report.failure.len(),
        skipped = run.skipped.len(),
        "audit finished"
    );

    let skipped = run
        .skipped
        .iter()
        .map(|err| SkippedRule {
            rule_id: err.rule_id.clone(),
            profile: err.profile.clone(),
            reason: err.source.to_string(),
        })
        .collect();

    let report = AuditReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "sysguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        host: resolved.options.host.clone(),
        tags: resolved.options.tags.clone(),
        verbose: resolved.options.verbose,
        skipped,
        result: run.report,
    };

    Ok(AuditOutput { report, resolved })
}

/// Process exit code for a finished audit: `2` when any tag failed, `0` otherwise.
pub fn verdict_exit_code(report: &AuditReport) -> i32 {
    if report.result.has_failures() { 2 } else { 0 }
}
