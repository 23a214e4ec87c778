//! Pure rule matching and evaluation (no IO).
//!
//! Input: parsed rule documents, run options, and a live-value lookup supplied by the caller.
//! Output: the Success / Failure / Controlled report.

#![forbid(unsafe_code)]

pub mod error;
pub mod glob;
pub mod host;
pub mod index;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod store;

mod aggregate;
mod engine;
mod evaluate;

pub use aggregate::aggregate;
pub use engine::{AuditRun, audit};
pub use evaluate::{ClassifiedResult, ValueLookup, evaluate};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
