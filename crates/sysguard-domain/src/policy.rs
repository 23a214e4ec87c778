/// How a tag's entries roll up into a single Success or Failure record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rollup {
    /// Report the last entry examined for the tag, controlled entries included. A tag with
    /// only controlled entries also lands in Success.
    #[default]
    LastSeen,
    /// Report the first failing entry of a failing tag; tags with nothing evaluated get no
    /// pass/fail record.
    FirstFailure,
}

#[derive(Clone, Debug)]
pub struct AuditOptions {
    /// Host identity (OS fingerprint such as `CentOS Linux-7`). `None` when unknown.
    pub host: Option<String>,
    /// Glob over tags; only matching tags are evaluated.
    pub tags: String,
    pub verbose: bool,
    /// Stamp `nova_profile` on every rule so verbose reports show where it came from.
    pub show_profile: bool,
    pub rollup: Rollup,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            host: None,
            tags: "*".to_string(),
            verbose: false,
            show_profile: false,
            rollup: Rollup::LastSeen,
        }
    }
}

impl AuditOptions {
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }
}
