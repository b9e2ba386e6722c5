//! Mapping of raw event codes onto canonical operation labels

use std::collections::HashMap;

/// Built-in mappings applied to every log with an event column
pub const DEFAULT_EVENT_LABELS: &[(&str, &str)] = &[
    ("view", "READ"),
    ("addtocart", "UPDATE"),
    ("transaction", "COMMIT"),
];

/// Lookup table from raw event codes to canonical labels.
///
/// Codes missing from the table pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLabels {
    table: HashMap<String, String>,
}

impl Default for EventLabels {
    fn default() -> Self {
        Self {
            table: DEFAULT_EVENT_LABELS
                .iter()
                .map(|(raw, label)| (raw.to_string(), label.to_string()))
                .collect(),
        }
    }
}

impl EventLabels {
    /// Built-in table extended (and overridden) by `extra`
    pub fn with_overrides<'a>(extra: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut labels = Self::default();
        for (raw, label) in extra {
            labels.table.insert(raw.clone(), label.clone());
        }
        labels
    }

    pub fn canonicalize(&self, raw: &str) -> String {
        self.table
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }
}
