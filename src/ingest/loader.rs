//! Two-attempt event log loader
//!
//! A file declared to have a header is first read by column name. If the
//! timestamp or grouping column cannot be found there, the same bytes are read
//! again positionally using the fixed column order of each candidate schema.
//! Only when both attempts fail is a schema error reported.

use csv::{ReaderBuilder, StringRecord};
use std::cmp::Reverse;
use std::path::Path;
use tracing::{debug, info, warn};

use super::labels::EventLabels;
use super::schema::{ColumnMap, LogSchema, SchemaSelection};
use super::timestamp::{parse_textual_timestamp, parse_timestamp, timestamp_kind, TimestampKind};
use crate::error::{common, AnalysisError, ErrorCode, Result};
use crate::model::EventRecord;

/// Options controlling how a log file is read
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub has_header: bool,
    pub schema: SchemaSelection,
    pub labels: EventLabels,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            schema: SchemaSelection::Auto,
            labels: EventLabels::default(),
        }
    }
}

/// Event records together with how they were read
#[derive(Debug, Clone)]
pub struct LoadedLog {
    pub schema: LogSchema,
    pub records: Vec<EventRecord>,
    /// False when the positional layout was used
    pub used_header: bool,
    /// Rows dropped because their grouping key was blank
    pub skipped_rows: usize,
}

/// Read an event log from disk
pub fn load_events(path: &Path, options: &LoadOptions) -> Result<LoadedLog> {
    let data = std::fs::read(path).map_err(|e| {
        let code = if e.kind() == std::io::ErrorKind::NotFound {
            ErrorCode::IO_FILE_NOT_FOUND
        } else {
            ErrorCode::IO_READ_FAILED
        };
        AnalysisError::io_with_code(
            code,
            format!("Failed to read {}", path.display()),
            Some(path.to_path_buf()),
        )
        .with_source(e)
    })?;

    let log = parse_events(&data, options).map_err(|e| e.with_path(path))?;
    info!(
        "Loaded {} events from {} ({} schema, {})",
        log.records.len(),
        path.display(),
        log.schema,
        if log.used_header {
            "header"
        } else {
            "positional columns"
        }
    );
    Ok(log)
}

/// Parse an in-memory event log
pub fn parse_events(data: &[u8], options: &LoadOptions) -> Result<LoadedLog> {
    if options.has_header {
        if let Some(log) = read_with_header(data, options)? {
            return Ok(log);
        }
        warn!("Header row lacks the timestamp or grouping column, re-reading without header");
    }

    read_positional(data, options)
}

fn reader_builder(options: &LoadOptions, has_headers: bool) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(options.delimiter)
        .has_headers(has_headers)
        .flexible(true);
    builder
}

fn read_with_header(data: &[u8], options: &LoadOptions) -> Result<Option<LoadedLog>> {
    let mut reader = reader_builder(options, true).from_reader(data);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let map = options
        .schema
        .forced()
        .or_else(|| LogSchema::detect(&headers))
        .and_then(|schema| ColumnMap::from_headers(schema, &headers));

    let Some(map) = map else {
        debug!("No usable schema for header {:?}", headers);
        return Ok(None);
    };
    debug!("Header matched {} schema: {:?}", map.schema, map);

    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    build_log(&rows, &map, &options.labels, true).map(Some)
}

fn read_positional(data: &[u8], options: &LoadOptions) -> Result<LoadedLog> {
    let mut reader = reader_builder(options, false).from_reader(data);
    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

    if rows.is_empty() {
        return Err(common::empty_input());
    }

    let candidates = options.schema.candidates();
    let (map, skip) = match select_layout(&rows, &candidates, options.has_header) {
        Some(found) => found,
        None => match options.schema.forced() {
            // A forced schema reports the bad cell instead of a layout mismatch
            Some(schema) => (ColumnMap::positional(schema), 0),
            None => {
                warn!("Rows match none of the visitor, session or session-ops layouts");
                let err = common::missing_required_columns(&candidates[0].required_columns());
                return Err(if options.has_header {
                    err.with_context("neither by header name nor by column position")
                } else {
                    err
                });
            }
        },
    };

    if skip > 0 {
        warn!("Dropping unrecognized header row");
    }
    debug!("Positional layout: {} schema", map.schema);

    build_log(&rows[skip..], &map, &options.labels, false)
}

/// Pick the schema whose timestamp and grouping cells look most plausible on
/// the leading row. A textual date-time outranks an epoch integer, and ties go
/// to the earlier candidate. When a header was declared, a leading row that
/// fits no layout is treated as a stray header and the next row is inspected.
fn select_layout(
    rows: &[StringRecord],
    candidates: &[LogSchema],
    header_declared: bool,
) -> Option<(ColumnMap, usize)> {
    let max_skip = if header_declared { 1 } else { 0 };

    (0..=max_skip).find_map(|skip| {
        let row = rows.get(skip)?;
        candidates
            .iter()
            .enumerate()
            .filter_map(|(rank, schema)| {
                let map = ColumnMap::positional(*schema);
                layout_fit(row, &map).map(|kind| (kind, Reverse(rank), map))
            })
            .max_by_key(|(kind, rank, _)| (*kind, *rank))
            .map(|(_, _, map)| (map, skip))
    })
}

/// How well a row fits a positional layout, `None` when it does not fit.
///
/// The grouping cell must not itself read as a date-time, otherwise the
/// layout has the timestamp and identifier columns swapped.
fn layout_fit(row: &StringRecord, map: &ColumnMap) -> Option<TimestampKind> {
    let group = cell(row, Some(map.group))?;
    if parse_textual_timestamp(group).is_some() {
        return None;
    }
    cell(row, Some(map.timestamp)).and_then(timestamp_kind)
}

fn build_log(
    rows: &[StringRecord],
    map: &ColumnMap,
    labels: &EventLabels,
    used_header: bool,
) -> Result<LoadedLog> {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped_rows = 0;

    for row in rows {
        match build_record(row, map, labels)? {
            Some(record) => records.push(record),
            None => skipped_rows += 1,
        }
    }

    if skipped_rows > 0 {
        warn!("Skipped {} rows with a blank grouping key", skipped_rows);
    }

    Ok(LoadedLog {
        schema: map.schema,
        records,
        used_header,
        skipped_rows,
    })
}

fn build_record(
    row: &StringRecord,
    map: &ColumnMap,
    labels: &EventLabels,
) -> Result<Option<EventRecord>> {
    let line = row.position().map(|p| p.line());
    let raw_timestamp = cell(row, Some(map.timestamp)).unwrap_or("");
    let timestamp =
        parse_timestamp(raw_timestamp).ok_or_else(|| common::invalid_timestamp(line, raw_timestamp))?;

    let Some(group) = cell(row, Some(map.group)) else {
        return Ok(None);
    };

    let mut record = EventRecord::new(group, timestamp);
    if let Some(raw) = cell(row, map.event) {
        record = record.with_event(labels.canonicalize(raw));
    }
    if let Some(item_id) = cell(row, map.item_id) {
        record = record.with_item(item_id);
    }
    if let Some(transaction_id) = cell(row, map.transaction_id) {
        record = record.with_transaction(transaction_id);
    }
    if let Some(category) = cell(row, map.item_category) {
        record = record.with_item_category(category);
    }
    Ok(Some(record))
}

/// Trimmed cell value, `None` when absent or blank
fn cell(row: &StringRecord, index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(data: &str) -> Result<LoadedLog> {
        parse_events(data.as_bytes(), &LoadOptions::default())
    }

    fn headerless() -> LoadOptions {
        LoadOptions {
            has_header: false,
            ..LoadOptions::default()
        }
    }

    #[test]
    fn test_visitor_log_with_header() {
        let data = "timestamp,visitorid,event,itemid,transactionid\n\
                    2015-06-02 05:02:12,257597,view,355908,\n\
                    2015-06-02 05:50:14,992329,addtocart,248676,\n\
                    2015-06-02 06:01:00,257597,transaction,355908,4000\n";

        let log = parse(data).unwrap();
        assert_eq!(log.schema, LogSchema::VisitorLog);
        assert!(log.used_header);
        assert_eq!(log.records.len(), 3);

        let first = &log.records[0];
        assert_eq!(first.group, "257597");
        assert_eq!(first.event.as_deref(), Some("READ"));
        assert_eq!(first.item_id.as_deref(), Some("355908"));
        assert_eq!(first.transaction_id, None);

        assert_eq!(log.records[1].event.as_deref(), Some("UPDATE"));
        assert_eq!(log.records[2].event.as_deref(), Some("COMMIT"));
        assert_eq!(log.records[2].transaction_id.as_deref(), Some("4000"));
    }

    #[test]
    fn test_header_columns_in_any_order() {
        let data = "event,timestamp,visitorid\nview,2024-01-01 00:00:00,7\n";
        let log = parse(data).unwrap();
        assert_eq!(log.records[0].group, "7");
        assert_eq!(
            log.records[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_session_log_with_header() {
        let data = "session_id,timestamp,item_id,category\n\
                    1,2014-04-07T10:51:09.277Z,214536502,0\n\
                    1,2014-04-07T10:54:09.868Z,214536500,0\n";
        let log = parse(data).unwrap();
        assert_eq!(log.schema, LogSchema::SessionLog);
        assert_eq!(log.records[0].event, None);
        assert_eq!(log.records[0].item_category.as_deref(), Some("0"));
    }

    #[test]
    fn test_session_ops_with_header() {
        let data = "session_id,operation,timestamp\na,view,2024-01-01 00:00:00\n";
        let log = parse(data).unwrap();
        assert_eq!(log.schema, LogSchema::SessionOps);
        assert_eq!(log.records[0].event.as_deref(), Some("READ"));
    }

    #[test]
    fn test_no_header_uses_positional_visitor_layout() {
        let data = "2024-01-01 00:00:00,1,view,10,\n2024-01-01 00:00:10,1,view,11,\n";
        let log = parse_events(data.as_bytes(), &headerless()).unwrap();
        assert_eq!(log.schema, LogSchema::VisitorLog);
        assert!(!log.used_header);
        assert_eq!(log.records.len(), 2);
    }

    #[test]
    fn test_headerless_file_declared_with_header_falls_back() {
        // The first data row is mistaken for a header and must be re-read
        let data = "2024-01-01 00:00:00,1,view,10,\n2024-01-01 00:00:10,1,view,11,\n";
        let log = parse(data).unwrap();
        assert!(!log.used_header);
        assert_eq!(log.records.len(), 2);
    }

    #[test]
    fn test_malformed_header_falls_back_to_positional() {
        let data = "when,who,what,item,txn\n\
                    2024-01-01 00:00:00,1,view,10,\n\
                    2024-01-01 00:00:10,1,view,11,\n";
        let log = parse(data).unwrap();
        assert_eq!(log.schema, LogSchema::VisitorLog);
        assert!(!log.used_header);
        assert_eq!(log.records.len(), 2);
    }

    #[test]
    fn test_positional_session_layout_detected() {
        let data = "s1,2024-01-01 00:00:00,99,books\ns1,2024-01-01 00:01:00,98,books\n";
        let log = parse_events(data.as_bytes(), &headerless()).unwrap();
        assert_eq!(log.schema, LogSchema::SessionLog);
        assert_eq!(log.records[1].item_category.as_deref(), Some("books"));
    }

    #[test]
    fn test_positional_session_ops_layout_detected() {
        let data = "s1,addtocart,2024-01-01 00:00:00\n";
        let log = parse_events(data.as_bytes(), &headerless()).unwrap();
        assert_eq!(log.schema, LogSchema::SessionOps);
        assert_eq!(log.records[0].event.as_deref(), Some("UPDATE"));
    }

    #[test]
    fn test_positional_session_layout_with_numeric_ids() {
        let data = "1,2014-04-07T10:51:09.277Z,214536502,0\n\
                    1,2014-04-07T10:54:09.868Z,214536500,0\n";
        let log = parse_events(data.as_bytes(), &headerless()).unwrap();
        assert_eq!(log.schema, LogSchema::SessionLog);
        assert_eq!(log.records[0].group, "1");
        assert_eq!(
            log.records[0].timestamp,
            parse_timestamp("2014-04-07T10:51:09.277Z").unwrap()
        );
        assert_eq!(log.records[1].item_id.as_deref(), Some("214536500"));
    }

    #[test]
    fn test_positional_session_ops_layout_with_numeric_ids() {
        let data = "42,view,2024-01-01 00:00:00\n42,transaction,2024-01-01 00:00:09\n";
        let log = parse_events(data.as_bytes(), &headerless()).unwrap();
        assert_eq!(log.schema, LogSchema::SessionOps);
        assert_eq!(log.records[0].group, "42");
        assert_eq!(log.records[1].event.as_deref(), Some("COMMIT"));
    }

    #[test]
    fn test_declared_header_absent_with_numeric_ids() {
        // Session export without a header row, read with the default options
        let data = "1,2014-04-07T10:51:09.277Z,214536502,0\n\
                    1,2014-04-07T10:54:09.868Z,214536500,0\n\
                    2,2014-04-07T13:56:37.614Z,214662742,0\n";
        let log = parse(data).unwrap();
        assert_eq!(log.schema, LogSchema::SessionLog);
        assert!(!log.used_header);
        assert_eq!(log.records.len(), 3);
        assert_eq!(log.records[2].group, "2");
    }

    #[test]
    fn test_positional_visitor_layout_with_epoch_millis() {
        let data = "1433221332117,257597,view,355908,\n1433224214164,257597,addtocart,355908,\n";
        let log = parse_events(data.as_bytes(), &headerless()).unwrap();
        assert_eq!(log.schema, LogSchema::VisitorLog);
        assert_eq!(log.records[0].group, "257597");
        assert_eq!(log.records[1].event.as_deref(), Some("UPDATE"));
    }

    #[test]
    fn test_positional_session_ops_layout_with_epoch_seconds() {
        let data = "42,view,1704067200\n42,view,1704067205\n";
        let log = parse_events(data.as_bytes(), &headerless()).unwrap();
        assert_eq!(log.schema, LogSchema::SessionOps);
        assert_eq!(log.records[0].group, "42");
    }

    #[test]
    fn test_unrecognizable_rows_with_header_carry_context() {
        let err = parse("a,b,c\nd,e,f\n").unwrap_err();
        assert!(err.to_string().contains("by column position"));

        let err = parse_events(b"d,e,f\n", &headerless()).unwrap_err();
        assert!(!err.to_string().contains("by column position"));
    }

    #[test]
    fn test_short_rows_leave_optional_fields_empty() {
        let data = "2024-01-01 00:00:00,1\n";
        let log = parse_events(data.as_bytes(), &headerless()).unwrap();
        assert_eq!(log.records[0].event, None);
        assert_eq!(log.records[0].item_id, None);
    }

    #[test]
    fn test_custom_delimiter() {
        let options = LoadOptions {
            delimiter: b';',
            ..LoadOptions::default()
        };
        let data = "timestamp;visitorid;event\n2024-01-01 00:00:00;5;view\n";
        let log = parse_events(data.as_bytes(), &options).unwrap();
        assert_eq!(log.records[0].group, "5");
    }

    #[test]
    fn test_empty_input_is_schema_error() {
        let err = parse("").unwrap_err();
        assert!(err.is_schema_error());
        assert_eq!(err.code(), ErrorCode::SCHEMA_EMPTY_INPUT);

        let err = parse_events(b"", &headerless()).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_unrecognizable_rows_are_schema_error() {
        let err = parse("a,b,c\nd,e,f\ng,h,i\n").unwrap_err();
        assert!(err.is_schema_error());
        assert_eq!(err.code(), ErrorCode::SCHEMA_MISSING_COLUMNS);
    }

    #[test]
    fn test_bad_timestamp_is_parse_error() {
        let data = "timestamp,visitorid,event\n\
                    2024-01-01 00:00:00,1,view\n\
                    not-a-date,1,view\n";
        let err = parse(data).unwrap_err();
        assert!(err.is_parse_error());
        assert_eq!(err.code(), ErrorCode::PARSE_TIMESTAMP);
        if let AnalysisError::Parse { line, value, .. } = err {
            assert_eq!(line, Some(3));
            assert_eq!(value.as_deref(), Some("not-a-date"));
        }
    }

    #[test]
    fn test_forced_schema_reports_bad_timestamp() {
        let options = LoadOptions {
            has_header: false,
            schema: SchemaSelection::Visitor,
            ..LoadOptions::default()
        };
        let err = parse_events(b"yesterday,1,view\n", &options).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_blank_group_rows_are_skipped() {
        let data = "timestamp,visitorid,event\n\
                    2024-01-01 00:00:00,,view\n\
                    2024-01-01 00:00:05,2,view\n";
        let log = parse(data).unwrap();
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.skipped_rows, 1);
    }

    #[test]
    fn test_blank_event_is_missing() {
        let data = "timestamp,visitorid,event\n2024-01-01 00:00:00,1,\n";
        let log = parse(data).unwrap();
        assert_eq!(log.records[0].event, None);
    }

    #[test]
    fn test_custom_labels_applied() {
        let extra = [("click".to_string(), "READ".to_string())];
        let options = LoadOptions {
            labels: EventLabels::with_overrides(extra.iter().map(|(k, v)| (k, v))),
            ..LoadOptions::default()
        };
        let data = "timestamp,visitorid,event\n2024-01-01 00:00:00,1,click\n";
        let log = parse_events(data.as_bytes(), &options).unwrap();
        assert_eq!(log.records[0].event.as_deref(), Some("READ"));
    }

    #[test]
    fn test_load_events_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,visitorid,event").unwrap();
        writeln!(file, "2024-01-01 00:00:00,1,view").unwrap();

        let log = load_events(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(log.records.len(), 1);
    }

    #[test]
    fn test_load_events_missing_file() {
        let err = load_events(Path::new("/nonexistent/events.csv"), &LoadOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::IO_FILE_NOT_FOUND);
        assert!(err.user_message().contains("/nonexistent/events.csv"));
    }

    #[test]
    fn test_schema_error_carries_path() {
        let file = NamedTempFile::new().unwrap();
        let err = load_events(file.path(), &LoadOptions::default()).unwrap_err();
        assert!(err.is_schema_error());
        assert!(err
            .user_message()
            .contains(&file.path().display().to_string()));
    }
}
