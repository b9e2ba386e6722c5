use clap::Parser;
use interval_stats::cli::{self, get_log_level, Cli, LOG_ENV};
use interval_stats::error::AnalysisError;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // An explicit filter in the environment wins over -v
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(get_log_level(cli.verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("interval-stats started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = cli::run(cli) {
        error!("Fatal error: {:#}", e);
        let exit_code = match e.downcast_ref::<AnalysisError>() {
            Some(err) => {
                eprintln!("Error: {err}");
                eprintln!("  {}", err.user_message());
                err.exit_code()
            }
            None => {
                eprintln!("Error: {e:#}");
                1
            }
        };
        std::process::exit(exit_code);
    }
}
