//! Bucketing of intervals for reporting

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::IntervalRecord;

/// Elapsed-time values that are summarized together.
///
/// `label` is the transition label, or `None` for the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalGroup {
    pub label: Option<String>,
    pub values: Vec<f64>,
}

impl IntervalGroup {
    pub fn title(&self) -> String {
        match &self.label {
            Some(label) => format!("{} interval distribution", label),
            None => "Distribution of operation intervals".to_string(),
        }
    }
}

/// Split intervals by transition label, in lexicographic label order.
///
/// Falls back to a single overall group when `by_transition` is false or the
/// intervals carry no labels. Returns nothing for an empty input.
pub fn group_intervals(intervals: &[IntervalRecord], by_transition: bool) -> Vec<IntervalGroup> {
    if intervals.is_empty() {
        return Vec::new();
    }

    let labelled = by_transition && intervals.iter().any(|i| i.transition.is_some());
    if !labelled {
        return vec![IntervalGroup {
            label: None,
            values: intervals.iter().map(|i| i.elapsed_secs).collect(),
        }];
    }

    let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for interval in intervals {
        let label = interval
            .transition
            .as_ref()
            .map(|t| t.label())
            .unwrap_or_else(|| crate::model::UNKNOWN_CATEGORY.to_string());
        buckets.entry(label).or_default().push(interval.elapsed_secs);
    }

    buckets
        .into_iter()
        .map(|(label, values)| IntervalGroup {
            label: Some(label),
            values,
        })
        .collect()
}
