use crate::aggregate::aggregate;
use crate::error::RuleShapeError;
use crate::evaluate::{ValueLookup, evaluate};
use crate::index::TagIndex;
use crate::model::ProfileDocument;
use crate::policy::AuditOptions;
use crate::store::RuleStore;
use sysguard_types::Report;
use tracing::{debug, info_span};

/// Result of one audit: the report plus the rule ids that were skipped as malformed.
#[derive(Clone, Debug)]
pub struct AuditRun {
    pub report: Report,
    pub skipped: Vec<RuleShapeError>,
    /// Rules merged from all documents, before host selection.
    pub rules_merged: usize,
    /// Entries that applied to the host, before tag filtering.
    pub entries_indexed: usize,
}

/// Merge `documents`, select rules for the host, evaluate the requested tags, and shape the
/// report. Never fails: malformed rules are skipped and listed in [`AuditRun::skipped`].
pub fn audit<L>(documents: &[ProfileDocument], opts: &AuditOptions, lookup: &L) -> AuditRun
where
    L: ValueLookup + ?Sized,
{
    let span = info_span!("audit", host = opts.host.as_deref().unwrap_or("<unknown>"), tags = %opts.tags);
    let _guard = span.enter();

    let store = RuleStore::from_documents(documents, opts.show_profile);
    let build = TagIndex::build(&store, opts.host.as_deref());
    let classified = evaluate(&build.index, &opts.tags, lookup, opts.rollup);
    debug!(results = classified.len(), "evaluated tags");

    AuditRun {
        report: aggregate(classified, opts.verbose),
        skipped: build.errors,
        rules_merged: store.len(),
        entries_indexed: build.index.entry_count(),
    }
}
