use crate::model::SysguardConfigV1;
use anyhow::Context;
use sysguard_domain::glob::Pattern;
use sysguard_domain::policy::{AuditOptions, Rollup};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub tags: Option<String>,
    pub host: Option<String>,
    pub verbose: Option<bool>,
    pub show_profile: Option<bool>,
    pub rollup: Option<String>,
    /// Replaces the config's `rules` list when non-empty.
    pub rules: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub options: AuditOptions,
    pub rules: Vec<String>,
}

pub fn resolve_config(
    cfg: SysguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut options = AuditOptions::default();

    if let Some(tags) = overrides.tags.or(cfg.tags) {
        validate_tag_glob(&tags)?;
        options.tags = tags;
    }

    options.host = overrides
        .host
        .or(cfg.host)
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty());

    if let Some(verbose) = overrides.verbose.or(cfg.verbose) {
        options.verbose = verbose;
    }
    if let Some(show_profile) = overrides.show_profile.or(cfg.show_profile) {
        options.show_profile = show_profile;
    }
    if let Some(rollup) = overrides.rollup.or(cfg.rollup) {
        options.rollup = parse_rollup(&rollup)?;
    }

    let rules = if overrides.rules.is_empty() {
        cfg.rules
    } else {
        overrides.rules
    };

    Ok(ResolvedConfig { options, rules })
}

fn validate_tag_glob(pattern: &str) -> anyhow::Result<()> {
    Pattern::try_new(pattern).with_context(|| format!("invalid tag glob: {pattern}"))?;
    Ok(())
}

fn parse_rollup(v: &str) -> anyhow::Result<Rollup> {
    match v {
        "last_seen" | "last-seen" => Ok(Rollup::LastSeen),
        "first_failure" | "first-failure" => Ok(Rollup::FirstFailure),
        other => anyhow::bail!("unknown rollup: {other} (expected last_seen|first_failure)"),
    }
}
