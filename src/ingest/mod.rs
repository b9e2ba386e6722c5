//! Loading of delimited event logs into [`EventRecord`](crate::model::EventRecord)s

pub mod labels;
pub mod loader;
pub mod schema;
pub mod timestamp;

pub use labels::{EventLabels, DEFAULT_EVENT_LABELS};
pub use loader::{load_events, parse_events, LoadOptions, LoadedLog};
pub use schema::{ColumnMap, Field, LogSchema, SchemaSelection};
pub use timestamp::{parse_textual_timestamp, parse_timestamp, timestamp_kind, TimestampKind};
