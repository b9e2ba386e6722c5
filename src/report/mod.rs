//! Presentation of interval summaries: text, JSON/YAML and SVG histograms

pub mod format;
pub mod histogram;
pub mod plot;

pub use format::{render, OutputFormat, RenderOptions, ReportContext};
pub use histogram::{Bin, Histogram, DEFAULT_BINS};
pub use plot::{plot_file_name, write_group_plots, write_histogram_svg};
