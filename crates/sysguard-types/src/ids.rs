//! Stable identifiers shared by the engine and the report consumers.

/// Top-level document key holding kernel parameter rules, also stamped as `module`
/// on every canonical entry.
pub const MODULE_SYSCTL: &str = "sysctl";

/// Host pattern that applies when no other pattern matches.
pub const WILDCARD_PATTERN: &str = "*";

// Rule definition keys
pub const KEY_DATA: &str = "data";
pub const KEY_DESCRIPTION: &str = "description";
pub const KEY_PROFILE: &str = "nova_profile";

// Check spec keys
pub const KEY_TAG: &str = "tag";
pub const KEY_MATCH_OUTPUT: &str = "match_output";
pub const KEY_CONTROL: &str = "control";

// Canonical entry keys
pub const KEY_NAME: &str = "name";
pub const KEY_MODULE: &str = "module";

/// Prefix a lookup backend uses to signal that a parameter could not be read.
pub const LOOKUP_ERROR_PREFIX: &str = "error";
