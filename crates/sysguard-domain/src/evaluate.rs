use crate::error::LookupError;
use crate::glob::Pattern;
use crate::index::TagIndex;
use crate::policy::Rollup;
use sysguard_types::entry::scalar_text;
use sysguard_types::{Outcome, RuleEntry, ids};
use tracing::trace;

/// Reads the live value of a named parameter.
///
/// Implementations decide where values come from (the running kernel, a snapshot file, a
/// test table). Any error is treated exactly like a mismatch.
pub trait ValueLookup {
    fn lookup(&self, parameter: &str) -> Result<String, LookupError>;
}

impl<F> ValueLookup for F
where
    F: Fn(&str) -> Result<String, LookupError>,
{
    fn lookup(&self, parameter: &str) -> Result<String, LookupError> {
        self(parameter)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassifiedResult {
    Success(RuleEntry),
    Failure(RuleEntry),
    Controlled(RuleEntry),
}

impl ClassifiedResult {
    pub fn outcome(&self) -> Outcome {
        match self {
            ClassifiedResult::Success(_) => Outcome::Success,
            ClassifiedResult::Failure(_) => Outcome::Failure,
            ClassifiedResult::Controlled(_) => Outcome::Controlled,
        }
    }

    pub fn entry(&self) -> &RuleEntry {
        match self {
            ClassifiedResult::Success(e)
            | ClassifiedResult::Failure(e)
            | ClassifiedResult::Controlled(e) => e,
        }
    }
}

/// Evaluate every tag matching `tag_pattern`, in index order.
///
/// Controlled entries are reported as such and never looked up. The remaining entries of a
/// tag must all pass for the tag to pass; each tag then yields one Success or Failure record
/// chosen by `rollup`.
pub fn evaluate<L>(
    index: &TagIndex,
    tag_pattern: &str,
    lookup: &L,
    rollup: Rollup,
) -> Vec<ClassifiedResult>
where
    L: ValueLookup + ?Sized,
{
    let filter = Pattern::new(tag_pattern);
    let mut out = Vec::new();

    for (tag, entries) in index.iter() {
        if !filter.is_match(tag) {
            continue;
        }

        let mut passed = true;
        let mut last_seen: Option<&RuleEntry> = None;
        let mut last_evaluated: Option<&RuleEntry> = None;
        let mut first_failure: Option<&RuleEntry> = None;

        for entry in entries {
            last_seen = Some(entry);
            if entry.is_controlled() {
                out.push(ClassifiedResult::Controlled(entry.clone()));
                continue;
            }
            last_evaluated = Some(entry);
            if !check_entry(entry, lookup) {
                passed = false;
                if first_failure.is_none() {
                    first_failure = Some(entry);
                }
            }
        }

        let representative = match rollup {
            Rollup::LastSeen => last_seen,
            Rollup::FirstFailure if passed => last_evaluated,
            Rollup::FirstFailure => first_failure,
        };
        if let Some(entry) = representative {
            out.push(if passed {
                ClassifiedResult::Success(entry.clone())
            } else {
                ClassifiedResult::Failure(entry.clone())
            });
        }
    }

    out
}

/// Whether the live value of `entry.name` equals its `match_output`.
pub fn check_entry<L>(entry: &RuleEntry, lookup: &L) -> bool
where
    L: ValueLookup + ?Sized,
{
    let actual = match lookup.lookup(&entry.name) {
        Ok(value) => value,
        Err(err) => {
            trace!(parameter = %entry.name, error = %err, "lookup failed");
            return false;
        }
    };
    if actual.is_empty() || actual.starts_with(ids::LOOKUP_ERROR_PREFIX) {
        trace!(parameter = %entry.name, value = %actual, "lookup returned no usable value");
        return false;
    }
    let Some(expected) = entry.match_output() else {
        trace!(parameter = %entry.name, "entry has no match_output");
        return false;
    };
    let expected = scalar_text(expected);
    trace!(parameter = %entry.name, %actual, %expected, "compared live value");
    actual == expected
}
