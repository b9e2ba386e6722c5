//! # interval-stats
//!
//! Measures the time between consecutive events of the same visitor or
//! session in a delimited event log, and summarizes those intervals.
//!
//! ## Usage
//!
//! ```bash
//! interval-stats events.csv [--schema auto|visitor|session|session-ops] [--format human|json|yaml]
//! ```
//!
//! ## Modules
//!
//! - `error` - Unified error type with stable codes and exit statuses
//! - `config` - Layered configuration from files, environment and flags
//! - `model` - Event, transition and interval records
//! - `ingest` - Log loading with header detection and positional fallback
//! - `analysis` - Interval computation, transition grouping and statistics
//! - `report` - Text, JSON/YAML and SVG histogram output
//! - `cli` - Command-line arguments and the run pipeline
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod report;

pub use analysis::{analyze, AnalysisOutcome, Summary};
pub use error::{AnalysisError, Result};
pub use ingest::{load_events, LoadOptions};
