//! Stable DTOs and IDs used across the sysguard workspace.
//!
//! This crate is intentionally boring:
//! - the canonical rule entry handed from the engine to reporting
//! - the outcome report and its JSON envelope
//! - stable string IDs (module name, categories, schema)

#![forbid(unsafe_code)]

pub mod entry;
pub mod ids;
pub mod receipt;

pub use entry::RuleEntry;
pub use receipt::{
    AuditReport, ItemBody, Outcome, Report, ReportItem, SkippedRule, ToolMeta, SCHEMA_REPORT_V1,
};
