use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub mod loader;

pub use loader::{global_config_path, ConfigLoader, PROJECT_CONFIG_FILE};

use crate::error::{common, AnalysisError, ErrorCode, Result};
use crate::ingest::{EventLabels, LoadOptions, SchemaSelection};
use crate::report::{OutputFormat, RenderOptions, DEFAULT_BINS};

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "INTERVAL_STATS_";

/// Effective settings for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub delimiter: String,
    pub has_header: bool,
    pub schema: SchemaSelection,
    pub bins: usize,
    pub output_format: OutputFormat,
    pub show_histogram: bool,
    pub plot_dir: Option<PathBuf>,
    /// Summarize all intervals together instead of per transition
    pub overall: bool,
    /// Raw event code → label mappings added to the built-in table
    pub event_labels: BTreeMap<String, String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            has_header: true,
            schema: SchemaSelection::Auto,
            bins: DEFAULT_BINS,
            output_format: OutputFormat::Human,
            show_histogram: true,
            plot_dir: None,
            overall: false,
            event_labels: BTreeMap::new(),
        }
    }
}

/// One configuration file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub delimiter: Option<String>,
    pub has_header: Option<bool>,
    pub schema: Option<SchemaSelection>,
    pub bins: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub show_histogram: Option<bool>,
    pub plot_dir: Option<PathBuf>,
    pub overall: Option<bool>,
    pub event_labels: Option<BTreeMap<String, String>>,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay the values present in a configuration file
    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(delimiter) = file.delimiter {
            self.delimiter = delimiter;
        }
        if let Some(has_header) = file.has_header {
            self.has_header = has_header;
        }
        if let Some(schema) = file.schema {
            self.schema = schema;
        }
        if let Some(bins) = file.bins {
            self.bins = bins;
        }
        if let Some(format) = file.output_format {
            self.output_format = format;
        }
        if let Some(show) = file.show_histogram {
            self.show_histogram = show;
        }
        if file.plot_dir.is_some() {
            self.plot_dir = file.plot_dir;
        }
        if let Some(overall) = file.overall {
            self.overall = overall;
        }
        if let Some(labels) = file.event_labels {
            self.event_labels.extend(labels);
        }
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_with(|name| std::env::var(name).ok())
    }

    /// Apply `INTERVAL_STATS_*` overrides using the given variable lookup
    pub fn merge_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |suffix: &str| lookup(&format!("{}{}", ENV_PREFIX, suffix));

        if let Some(delimiter) = var("DELIMITER") {
            self.delimiter = delimiter;
        }
        if let Some(format) = var("FORMAT") {
            self.output_format = format.parse()?;
        }
        if let Some(schema) = var("SCHEMA") {
            self.schema = schema.parse()?;
        }
        if let Some(bins) = var("BINS") {
            self.bins = bins.trim().parse().map_err(|_| {
                AnalysisError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("{}BINS must be a positive integer, got '{}'", ENV_PREFIX, bins),
                    None,
                )
            })?;
        }
        Ok(())
    }

    /// Check values that cannot be expressed in the types
    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        if self.bins == 0 {
            return Err(AnalysisError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "Histogram bin count must be at least 1",
                None,
            ));
        }
        Ok(())
    }

    /// The delimiter as a single byte; `\t` is accepted for tab
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_str() {
            "\\t" | "\t" => Ok(b'\t'),
            d if d.len() == 1 && d.is_ascii() => Ok(d.as_bytes()[0]),
            d => Err(common::invalid_delimiter(d)),
        }
    }

    pub fn load_options(&self) -> Result<LoadOptions> {
        Ok(LoadOptions {
            delimiter: self.delimiter_byte()?,
            has_header: self.has_header,
            schema: self.schema,
            labels: EventLabels::with_overrides(&self.event_labels),
        })
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.output_format,
            bins: self.bins,
            show_histogram: self.show_histogram,
        }
    }
}
