use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `sysguard.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional so command-line flags can
/// fill the gaps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SysguardConfigV1 {
    /// Optional schema string for tooling (`sysguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Glob over audit tags to evaluate (default `*`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    /// Host identity to match rule patterns against, e.g. `CentOS Linux-7`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Report full rule entries instead of `{tag: description}` summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Record which profile each rule came from (`nova_profile`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_profile: Option<bool>,

    /// Tag rollup: `last_seen` (default) or `first_failure`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup: Option<String>,

    /// Rule files or directories of `*.yaml` rule profiles.
    #[serde(default)]
    pub rules: Vec<String>,
}
