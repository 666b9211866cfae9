use std::path::PathBuf;

const RUN_REPORT_FILE: &str = "report.csv";
const MASTER_REPORT_FILE: &str = "master_report.csv";
const PER_RUN_CHART_FILE: &str = "connections_per_run.png";
const HISTORICAL_CHART_FILE: &str = "historical_connections.png";

/// Where the renderer reads its CSV inputs and writes its charts.
///
/// Both directories come from the command line; nothing is read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of the run that just finished. Holds `report.csv` and receives the per-run chart.
    pub current_run_dir: PathBuf,
    /// Directory holding `master_report.csv` across all runs. Receives the historical chart.
    pub results_dir: PathBuf,
}

impl Config {
    pub fn new(current_run_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_run_dir: current_run_dir.into(),
            results_dir: results_dir.into(),
        }
    }

    pub fn report_csv_path(&self) -> PathBuf {
        self.current_run_dir.join(RUN_REPORT_FILE)
    }

    pub fn master_csv_path(&self) -> PathBuf {
        self.results_dir.join(MASTER_REPORT_FILE)
    }

    pub fn per_run_chart_path(&self) -> PathBuf {
        self.current_run_dir.join(PER_RUN_CHART_FILE)
    }

    pub fn historical_chart_path(&self) -> PathBuf {
        self.results_dir.join(HISTORICAL_CHART_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_directory_layout() {
        let config = Config::new("/runs/run_42", "/results");
        assert_eq!(config.report_csv_path(), PathBuf::from("/runs/run_42/report.csv"));
        assert_eq!(
            config.per_run_chart_path(),
            PathBuf::from("/runs/run_42/connections_per_run.png")
        );
        assert_eq!(config.master_csv_path(), PathBuf::from("/results/master_report.csv"));
        assert_eq!(
            config.historical_chart_path(),
            PathBuf::from("/results/historical_connections.png")
        );
    }
}
