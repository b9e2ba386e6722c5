//! Event records loaded from visitor and session logs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single row of an interaction log.
///
/// Records are built once by the loader and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Visitor or session identifier that partitions the log
    pub group: String,
    pub timestamp: DateTime<Utc>,
    /// Canonical event category, if the schema carries one
    pub event: Option<String>,
    pub item_id: Option<String>,
    pub transaction_id: Option<String>,
    /// Item category (session-log schema only)
    pub item_category: Option<String>,
}

impl EventRecord {
    pub fn new(group: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            group: group.into(),
            timestamp,
            event: None,
            item_id: None,
            transaction_id: None,
            item_category: None,
        }
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn with_transaction(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn with_item_category(mut self, category: impl Into<String>) -> Self {
        self.item_category = Some(category.into());
        self
    }
}
