//! Intervals derived from consecutive events of one group

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for a missing category on either side of a transition
pub const UNKNOWN_CATEGORY: &str = "UNKNOWN";

/// Ordered pair of event categories forming an interval
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Build a transition from optional categories, substituting `UNKNOWN`
    pub fn between(from: Option<&str>, to: Option<&str>) -> Self {
        Self::new(
            from.unwrap_or(UNKNOWN_CATEGORY),
            to.unwrap_or(UNKNOWN_CATEGORY),
        )
    }

    /// Label in `FROM->TO` form
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Elapsed time between an event and its predecessor in the same group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub group: String,
    /// Seconds since the previous event, fractional part preserved
    pub elapsed_secs: f64,
    /// Present only when the log carries event categories
    pub transition: Option<Transition>,
}
