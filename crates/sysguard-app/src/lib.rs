//! Use case orchestration for sysguard.
//!
//! This crate provides the application layer: loading rule documents, wiring the engine to a
//! value lookup, and rendering. It is intentionally thin and delegates the rule semantics to
//! `sysguard-domain`.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod audit;
mod load;
mod lookup;
mod render;

pub use audit::{AuditInput, AuditOutput, run_audit, verdict_exit_code};
pub use load::{load_documents, parse_document, profile_name};
pub use lookup::SnapshotLookup;
pub use render::{
    parse_report_json, render_annotations, render_markdown, serialize_report, to_renderable,
};
