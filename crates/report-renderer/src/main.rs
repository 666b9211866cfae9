mod chart;
mod config;
mod error;
mod ledger;
mod model;
mod render;
mod stats;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;

use outreach_common::logging::{self, LogWriter};

use config::Config;

/// Render the per-run and historical connection charts for an outreach run.
#[derive(Debug, Parser)]
#[command(name = "report-renderer", version)]
struct Cli {
    /// Directory of the finished run; must contain `report.csv`.
    #[arg(allow_hyphen_values = true)]
    current_run_dir: PathBuf,
    /// Results directory; must contain `master_report.csv`.
    #[arg(allow_hyphen_values = true)]
    results_dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    // Log lines are this tool's only output, so they go to stdout.
    logging::init(LogWriter::Stdout);

    let config = Config::new(cli.current_run_dir, cli.results_dir);
    info!(
        current_run_dir = %config.current_run_dir.display(),
        results_dir = %config.results_dir.display(),
        "generating charts"
    );

    render::generate_graphs(&config);
    ExitCode::SUCCESS
}
