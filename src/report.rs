//! End-of-run summary so a human can act on the unmatched list.

use tracing::{info, warn};

use crate::matcher::Matcher;

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub processed: usize,
    pub newly_matched: usize,
    pub newly_unmatched: usize,
}

pub fn summarize(matcher: &Matcher, processed: usize) -> RunSummary {
    RunSummary {
        processed,
        newly_matched: matcher.new_matches().len(),
        newly_unmatched: matcher.new_unmatched().len(),
    }
}

pub fn log_summary(matcher: &Matcher, summary: &RunSummary) {
    info!(
        "Processed {} records: {} newly matched, {} newly unmatched",
        summary.processed, summary.newly_matched, summary.newly_unmatched
    );

    for entry in matcher.new_matches() {
        info!(
            "Matched: {:?} -> {:?} (model {}, marka {})",
            entry.original, entry.normalized, entry.model_id, entry.marka_id
        );
    }

    for entry in matcher.new_unmatched() {
        warn!(
            "Unmatched: marka {:?} ({:?}) / model {:?} ({:?})",
            entry.marka_name, entry.original_marka, entry.model_name, entry.original_model
        );
    }
}
