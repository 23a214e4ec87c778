//! Error taxonomy of the engine.
//!
//! None of these abort a run: shape errors drop the offending rule id, lookup errors become
//! Failure classifications.

use thiserror::Error;

/// A rule document part that cannot be turned into canonical entries.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("rule definition is not a mapping")]
    DefinitionNotMapping,

    #[error("rule definition has no `data` key")]
    MissingData,

    #[error("`data` must map host patterns to variants")]
    DataNotMapping,

    #[error("variant for host pattern `{pattern}` is neither a list of mappings nor a mapping")]
    VariantShape { pattern: String },

    #[error("item {index} of the variant for host pattern `{pattern}` is not a mapping")]
    VariantItem { pattern: String, index: usize },

    #[error("check `{check}` has no `tag`")]
    MissingTag { check: String },

    #[error("check `{check}` has a tag that is not a scalar")]
    InvalidTag { check: String },
}

/// A [`ShapeError`] attributed to the rule id it disqualified.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("rule `{rule_id}`: {source}")]
pub struct RuleShapeError {
    pub rule_id: String,
    pub profile: Option<String>,
    #[source]
    pub source: ShapeError,
}

/// Raised by a [`crate::ValueLookup`] when a parameter cannot be read.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("parameter `{0}` is not available")]
    Unavailable(String),

    #[error("lookup backend failed: {0}")]
    Backend(String),
}
