//! CLI command handling
//!
//! Resolves configuration from files, environment and flags, then drives the
//! load → analyse → render pipeline.

pub mod args;

pub use args::Cli;

use anyhow::Context;
use std::io::Write;
use tracing::{debug, info, warn};

use crate::analysis::analyze;
use crate::config::{AnalysisConfig, ConfigLoader};
use crate::ingest::load_events;
use crate::report::{render, write_group_plots, ReportContext};

/// Environment variable holding an explicit log filter
pub const LOG_ENV: &str = "INTERVAL_STATS_LOG";

/// Map the `-v` count to a tracing filter.
///
/// Stdout carries the report, so a plain run only logs warnings.
pub fn get_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Overlay command-line flags on a loaded configuration
pub fn apply_cli_overrides(config: &mut AnalysisConfig, cli: &Cli) {
    if let Some(delimiter) = &cli.delimiter {
        config.delimiter = delimiter.clone();
    }
    if cli.no_header {
        config.has_header = false;
    }
    if let Some(schema) = cli.schema {
        config.schema = schema;
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if let Some(bins) = cli.bins {
        config.bins = bins;
    }
    if cli.no_histogram {
        config.show_histogram = false;
    }
    if let Some(dir) = &cli.plot_dir {
        config.plot_dir = Some(dir.clone());
    }
    if cli.overall {
        config.overall = true;
    }
}

/// Resolve the effective configuration for this invocation
pub fn resolve_config(cli: &Cli) -> anyhow::Result<AnalysisConfig> {
    let mut config = ConfigLoader::new()?.load(cli.config.as_deref())?;
    apply_cli_overrides(&mut config, cli);
    config.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Run one analysis, writing the report to stdout
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_config(&cli, &config, &mut out)
}

/// Run one analysis with an already resolved configuration
pub fn run_with_config(
    cli: &Cli,
    config: &AnalysisConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let log = load_events(&cli.file, &config.load_options()?)?;
    let outcome = analyze(
        &log.records,
        log.schema.labels_transitions(),
        !config.overall,
    )?;
    if outcome.is_empty() {
        warn!("No intervals found in {}", cli.file.display());
    } else {
        info!(
            "Computed {} intervals in {} group(s)",
            outcome.interval_count,
            outcome.groups.len()
        );
    }

    let context = ReportContext {
        source: cli.file.display().to_string(),
        schema: log.schema,
    };
    let report = render(&outcome, &context, &config.render_options())?;
    out.write_all(report.as_bytes())
        .context("Failed to write report")?;
    if !report.ends_with('\n') {
        writeln!(out).context("Failed to write report")?;
    }

    if let Some(dir) = &config.plot_dir {
        let written = write_group_plots(&outcome.groups, dir, config.bins)?;
        info!("Wrote {} plot(s) to {}", written.len(), dir.display());
    }

    Ok(())
}
