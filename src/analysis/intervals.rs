//! Elapsed time between consecutive events of each group
//!
//! Records are partitioned by their grouping key, each partition is sorted by
//! timestamp (stable, so ties keep their input order) and every record after
//! the first yields one interval measured from its predecessor.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use crate::model::{EventRecord, IntervalRecord, Transition};

/// Compute intervals for all groups.
///
/// Output is ordered by group key, then by timestamp within a group. When
/// `label_transitions` is set each interval carries the pair of categories of
/// the two events it spans.
pub fn compute_intervals(records: &[EventRecord], label_transitions: bool) -> Vec<IntervalRecord> {
    let groups = partition_by_group(records);
    let mut intervals = Vec::with_capacity(records.len().saturating_sub(groups.len()));

    for (group, mut events) in groups {
        events.sort_by_key(|event| event.timestamp);

        intervals.extend(events.windows(2).map(|pair| {
            let (previous, current) = (pair[0], pair[1]);
            IntervalRecord {
                group: group.to_string(),
                elapsed_secs: elapsed_seconds(previous.timestamp, current.timestamp),
                transition: label_transitions.then(|| {
                    Transition::between(previous.event.as_deref(), current.event.as_deref())
                }),
            }
        }));
    }

    debug!(
        "Computed {} intervals from {} events",
        intervals.len(),
        records.len()
    );
    intervals
}

/// Group records by key, keeping input order inside each group
pub fn partition_by_group(records: &[EventRecord]) -> BTreeMap<&str, Vec<&EventRecord>> {
    let mut groups: BTreeMap<&str, Vec<&EventRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.group.as_str()).or_default().push(record);
    }
    groups
}

/// Seconds from `earlier` to `later`, fractional part preserved
pub fn elapsed_seconds(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    let delta = later - earlier;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        // Spans beyond ~292 years overflow nanoseconds
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}
