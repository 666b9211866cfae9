/// Chart generation for one finished run.
///
/// Each chart is attempted independently and nothing propagates out of `generate_graphs`:
/// a missing input, an empty ledger or a drawing failure only costs that one chart.
use std::fmt;
use std::path::PathBuf;

use tracing::{error, info};

use crate::chart;
use crate::config::Config;
use crate::error::ReportError;
use crate::ledger;
use crate::stats;

/// What happened to one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    Saved(PathBuf),
    Skipped(String),
    Failed(String),
}

impl fmt::Display for ChartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartOutcome::Saved(path) => write!(f, "saved {}", path.display()),
            ChartOutcome::Skipped(reason) => write!(f, "skipped ({reason})"),
            ChartOutcome::Failed(message) => write!(f, "failed ({message})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub per_run: ChartOutcome,
    pub historical: ChartOutcome,
}

pub fn generate_graphs(config: &Config) -> RenderSummary {
    let per_run = render_per_run(config);
    let historical = render_historical(config);
    info!(per_run = %per_run, historical = %historical, "chart generation finished");
    RenderSummary {
        per_run,
        historical,
    }
}

fn render_per_run(config: &Config) -> ChartOutcome {
    let csv_path = config.report_csv_path();
    match try_per_run(config) {
        Ok(outcome) => outcome,
        Err(ReportError::InputNotFound(path)) => {
            info!(path = %path.display(), "current run CSV not found, skipping per-run chart");
            ChartOutcome::Skipped(format!("{} not found", path.display()))
        }
        Err(e) => {
            error!(path = %csv_path.display(), error = %e, "error generating per-run chart");
            ChartOutcome::Failed(e.to_string())
        }
    }
}

fn try_per_run(config: &Config) -> Result<ChartOutcome, ReportError> {
    let report = ledger::load_run_report(&config.report_csv_path())?;
    let bars = stats::run_breakdown(&report);

    if bars.is_empty() {
        info!(
            run_dir = %config.current_run_dir.display(),
            run_id = %report.run_id,
            "no data to plot for per-run chart (all values are zero)"
        );
        return Ok(ChartOutcome::Skipped("all values are zero".to_string()));
    }

    let out = config.per_run_chart_path();
    chart::draw_run_breakdown(&out, &report.run_id, &bars)?;
    info!(path = %out.display(), bars = bars.len(), "per-run chart saved");
    Ok(ChartOutcome::Saved(out))
}

fn render_historical(config: &Config) -> ChartOutcome {
    let csv_path = config.master_csv_path();
    match try_historical(config) {
        Ok(outcome) => outcome,
        Err(ReportError::InputNotFound(path)) => {
            info!(
                path = %path.display(),
                "master CSV not found, skipping all-runs chart (first run?)"
            );
            ChartOutcome::Skipped(format!("{} not found", path.display()))
        }
        Err(ReportError::EmptyLedger(path)) => {
            info!(path = %path.display(), "master CSV is empty, skipping all-runs chart");
            ChartOutcome::Skipped(format!("{} is empty", path.display()))
        }
        Err(e) => {
            error!(path = %csv_path.display(), error = %e, "error generating all-runs chart");
            ChartOutcome::Failed(e.to_string())
        }
    }
}

fn try_historical(config: &Config) -> Result<ChartOutcome, ReportError> {
    let rows = ledger::load_ledger(&config.master_csv_path())?;
    let points = stats::historical_series(&rows)?;

    if points.is_empty() {
        info!(rows = 0, "not enough data in master CSV for all-runs chart, skipping");
        return Ok(ChartOutcome::Skipped("no runs in ledger".to_string()));
    }

    let out = config.historical_chart_path();
    chart::draw_history(&out, &points)?;
    info!(path = %out.display(), runs = points.len(), "historical chart saved");
    Ok(ChartOutcome::Saved(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    const HEADER: &str =
        "RunID,Timestamp,ConnectionsMade,TotalConnectButtonsFound,TotalProfilesScanned\n";

    struct Dirs {
        _root: tempfile::TempDir,
        config: Config,
    }

    fn dirs() -> Dirs {
        let root = tempfile::tempdir().expect("tempdir");
        let run_dir = root.path().join("run_20240103_080000");
        let results_dir = root.path().join("results");
        std::fs::create_dir_all(&run_dir).expect("run dir");
        std::fs::create_dir_all(&results_dir).expect("results dir");
        Dirs {
            config: Config::new(run_dir, results_dir),
            _root: root,
        }
    }

    fn write(path: &Path, content: &str) {
        std::fs::write(path, content).expect("write csv");
    }

    #[test]
    fn test_both_inputs_missing_skips_both() {
        let d = dirs();
        let summary = generate_graphs(&d.config);
        assert!(matches!(summary.per_run, ChartOutcome::Skipped(_)));
        assert!(matches!(summary.historical, ChartOutcome::Skipped(_)));
        assert!(!d.config.per_run_chart_path().exists());
        assert!(!d.config.historical_chart_path().exists());
    }

    #[test]
    fn test_missing_run_report_still_renders_history() {
        let d = dirs();
        write(
            &d.config.master_csv_path(),
            &format!("{HEADER}r1,20240101_090000,2,4,10\nr2,20240102_090000,3,3,7\n"),
        );

        let summary = generate_graphs(&d.config);
        assert!(matches!(summary.per_run, ChartOutcome::Skipped(_)));
        assert_eq!(
            summary.historical,
            ChartOutcome::Saved(d.config.historical_chart_path())
        );
        assert!(d.config.historical_chart_path().exists());
    }

    #[test]
    fn test_all_zero_run_skips_per_run_chart() {
        let d = dirs();
        write(&d.config.report_csv_path(), &format!("{HEADER}r1,20240101_090000,0,0,0\n"));

        let summary = generate_graphs(&d.config);
        assert_eq!(
            summary.per_run,
            ChartOutcome::Skipped("all values are zero".to_string())
        );
        assert!(!d.config.per_run_chart_path().exists());
    }

    #[test]
    fn test_renders_both_charts() {
        let d = dirs();
        write(&d.config.report_csv_path(), &format!("{HEADER}r3,20240103_080000,3,5,12\n"));
        write(
            &d.config.master_csv_path(),
            &format!(
                "{HEADER}r3,20240103_080000,3,5,12\nr1,20240101_090000,2,4,10\nr2,20240102_090000,3,3,7\n"
            ),
        );

        let summary = generate_graphs(&d.config);
        assert_eq!(summary.per_run, ChartOutcome::Saved(d.config.per_run_chart_path()));
        assert_eq!(
            summary.historical,
            ChartOutcome::Saved(d.config.historical_chart_path())
        );
    }

    #[test]
    fn test_empty_and_header_only_ledgers_are_skipped() {
        let d = dirs();
        write(&d.config.master_csv_path(), "");
        assert!(matches!(
            generate_graphs(&d.config).historical,
            ChartOutcome::Skipped(_)
        ));

        write(&d.config.master_csv_path(), HEADER);
        assert!(matches!(
            generate_graphs(&d.config).historical,
            ChartOutcome::Skipped(_)
        ));
        assert!(!d.config.historical_chart_path().exists());
    }

    #[test]
    fn test_malformed_inputs_fail_without_propagating() {
        let d = dirs();
        write(&d.config.report_csv_path(), &format!("{HEADER}r1,20240101_090000,x,y,z\n"));
        write(
            &d.config.master_csv_path(),
            &format!("{HEADER}r1,not-a-timestamp,1,1,1\n"),
        );

        let summary = generate_graphs(&d.config);
        assert!(matches!(summary.per_run, ChartOutcome::Failed(_)));
        match summary.historical {
            ChartOutcome::Failed(message) => assert!(message.contains("not-a-timestamp")),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
