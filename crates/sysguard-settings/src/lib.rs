//! Config parsing and run option resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::SysguardConfigV1;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `sysguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<SysguardConfigV1> {
    let cfg: SysguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the options handed to the engine (config file + command-line overrides).
pub fn resolve_config(
    cfg: SysguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON Schema of the config file, pretty-printed.
pub fn config_schema_json() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(SysguardConfigV1);
    Ok(serde_json::to_string_pretty(&schema)?)
}
