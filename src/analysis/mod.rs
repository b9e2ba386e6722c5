//! Interval analysis
//!
//! Turns loaded event records into per-group summaries: intervals are computed
//! per visitor or session, bucketed by transition label (or kept as one
//! overall group) and each bucket is summarized.

pub mod grouping;
pub mod intervals;
pub mod stats;

pub use grouping::{group_intervals, IntervalGroup};
pub use intervals::{compute_intervals, elapsed_seconds, partition_by_group};
pub use stats::{percentile_sorted, summarize, Bounds, Summary};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::model::EventRecord;

/// Summary of one reported group together with its raw values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub label: Option<String>,
    pub title: String,
    pub summary: Summary,
    #[serde(skip)]
    pub values: Vec<f64>,
}

/// Result of analysing one log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub event_count: usize,
    pub interval_count: usize,
    pub groups: Vec<GroupReport>,
}

impl AnalysisOutcome {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Run interval computation, grouping and summarization
pub fn analyze(
    records: &[EventRecord],
    label_transitions: bool,
    by_transition: bool,
) -> Result<AnalysisOutcome> {
    let intervals = compute_intervals(records, label_transitions);

    let groups = group_intervals(&intervals, by_transition)
        .into_iter()
        .map(|group| {
            let summary = summarize(&group.values)?;
            debug!(
                "Summarized {}: n={} mean={:.3}",
                group.label.as_deref().unwrap_or("all intervals"),
                summary.count,
                summary.mean
            );
            Ok(GroupReport {
                title: group.title(),
                label: group.label,
                summary,
                values: group.values,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AnalysisOutcome {
        event_count: records.len(),
        interval_count: intervals.len(),
        groups,
    })
}
