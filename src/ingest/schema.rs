//! Log schema descriptors
//!
//! Each supported log layout is described by an ordered list of columns (used
//! when the file has no header) and the header names used to locate the same
//! columns when it does. The timestamp and grouping columns are required in
//! every layout; everything else is optional.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalysisError, ErrorCode};

/// Logical role of a column in an event log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Timestamp,
    Group,
    Event,
    ItemId,
    TransactionId,
    ItemCategory,
}

/// The log layouts the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogSchema {
    /// `timestamp, visitorid, event, itemid, transactionid`
    VisitorLog,
    /// `session_id, timestamp, item_id, category`
    SessionLog,
    /// `session_id, operation, timestamp`
    SessionOps,
}

const VISITOR_COLUMNS: &[(&str, Field)] = &[
    ("timestamp", Field::Timestamp),
    ("visitorid", Field::Group),
    ("event", Field::Event),
    ("itemid", Field::ItemId),
    ("transactionid", Field::TransactionId),
];

const SESSION_COLUMNS: &[(&str, Field)] = &[
    ("session_id", Field::Group),
    ("timestamp", Field::Timestamp),
    ("item_id", Field::ItemId),
    ("category", Field::ItemCategory),
];

const SESSION_OPS_COLUMNS: &[(&str, Field)] = &[
    ("session_id", Field::Group),
    ("operation", Field::Event),
    ("timestamp", Field::Timestamp),
];

impl LogSchema {
    /// Positional fallback order when no schema is forced
    pub const ALL: [LogSchema; 3] = [
        LogSchema::VisitorLog,
        LogSchema::SessionLog,
        LogSchema::SessionOps,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LogSchema::VisitorLog => "visitor",
            LogSchema::SessionLog => "session",
            LogSchema::SessionOps => "session-ops",
        }
    }

    /// Columns in their fixed positional order
    pub fn columns(&self) -> &'static [(&'static str, Field)] {
        match self {
            LogSchema::VisitorLog => VISITOR_COLUMNS,
            LogSchema::SessionLog => SESSION_COLUMNS,
            LogSchema::SessionOps => SESSION_OPS_COLUMNS,
        }
    }

    /// Header name of the given field, if this schema has it
    pub fn column_name(&self, field: Field) -> Option<&'static str> {
        self.columns()
            .iter()
            .find(|(_, f)| *f == field)
            .map(|(name, _)| *name)
    }

    /// Header names of the timestamp and grouping columns
    pub fn required_columns(&self) -> [&'static str; 2] {
        match self {
            LogSchema::VisitorLog => ["timestamp", "visitorid"],
            LogSchema::SessionLog | LogSchema::SessionOps => ["timestamp", "session_id"],
        }
    }

    /// Whether intervals of this schema carry transition labels
    pub fn labels_transitions(&self) -> bool {
        self.column_name(Field::Event).is_some()
    }

    /// Infer the schema from a header row
    pub fn detect(headers: &[String]) -> Option<LogSchema> {
        let has = |name: &str| headers.iter().any(|h| normalize_header(h) == name);

        if has("visitorid") {
            Some(LogSchema::VisitorLog)
        } else if has("session_id") && has("operation") {
            Some(LogSchema::SessionOps)
        } else if has("session_id") {
            Some(LogSchema::SessionLog)
        } else {
            None
        }
    }
}

impl fmt::Display for LogSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Schema requested by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaSelection {
    /// Detect from the header, or try every positional layout
    #[default]
    Auto,
    Visitor,
    Session,
    SessionOps,
}

impl SchemaSelection {
    /// Candidate schemas in the order they should be attempted
    pub fn candidates(&self) -> Vec<LogSchema> {
        match self {
            SchemaSelection::Auto => LogSchema::ALL.to_vec(),
            SchemaSelection::Visitor => vec![LogSchema::VisitorLog],
            SchemaSelection::Session => vec![LogSchema::SessionLog],
            SchemaSelection::SessionOps => vec![LogSchema::SessionOps],
        }
    }

    pub fn forced(&self) -> Option<LogSchema> {
        match self {
            SchemaSelection::Auto => None,
            SchemaSelection::Visitor => Some(LogSchema::VisitorLog),
            SchemaSelection::Session => Some(LogSchema::SessionLog),
            SchemaSelection::SessionOps => Some(LogSchema::SessionOps),
        }
    }
}

impl FromStr for SchemaSelection {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(SchemaSelection::Auto),
            "visitor" => Ok(SchemaSelection::Visitor),
            "session" => Ok(SchemaSelection::Session),
            "session-ops" | "session_ops" => Ok(SchemaSelection::SessionOps),
            other => Err(AnalysisError::config_with_code(
                ErrorCode::SCHEMA_UNKNOWN,
                format!(
                    "Unknown schema '{}'. Use auto, visitor, session or session-ops",
                    other
                ),
                None,
            )),
        }
    }
}

/// Resolved positions of each field within a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub schema: LogSchema,
    pub timestamp: usize,
    pub group: usize,
    pub event: Option<usize>,
    pub item_id: Option<usize>,
    pub transaction_id: Option<usize>,
    pub item_category: Option<usize>,
}

impl ColumnMap {
    /// Column positions for a headerless file
    pub fn positional(schema: LogSchema) -> Self {
        let position = |field: Field| schema.columns().iter().position(|(_, f)| *f == field);
        Self {
            schema,
            // Every schema lists both required fields
            timestamp: position(Field::Timestamp).unwrap_or(0),
            group: position(Field::Group).unwrap_or(0),
            event: position(Field::Event),
            item_id: position(Field::ItemId),
            transaction_id: position(Field::TransactionId),
            item_category: position(Field::ItemCategory),
        }
    }

    /// Column positions looked up by header name.
    ///
    /// Returns `None` when the timestamp or grouping column is absent.
    pub fn from_headers(schema: LogSchema, headers: &[String]) -> Option<Self> {
        let position = |field: Field| {
            schema
                .column_name(field)
                .and_then(|name| headers.iter().position(|h| normalize_header(h) == name))
        };

        Some(Self {
            schema,
            timestamp: position(Field::Timestamp)?,
            group: position(Field::Group)?,
            event: position(Field::Event),
            item_id: position(Field::ItemId),
            transaction_id: position(Field::TransactionId),
            item_category: position(Field::ItemCategory),
        })
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').to_lowercase()
}
