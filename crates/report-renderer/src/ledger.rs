/// CSV loading for run reports.
///
/// Both files share one schema: `RunID, Timestamp, ConnectionsMade,
/// TotalConnectButtonsFound, TotalProfilesScanned`. Extra columns are ignored and cells are
/// trimmed. A file with no content at all (not even a header) is treated as empty rather
/// than malformed.
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::ReportError;
use crate::model::RunReport;

/// Load the single row of a run's `report.csv`. Rows after the first are ignored.
pub fn load_run_report(path: &Path) -> Result<RunReport, ReportError> {
    read_rows(path)?
        .and_then(|rows| rows.into_iter().next())
        .ok_or_else(|| ReportError::NoRows(path.to_path_buf()))
}

/// Load every row of `master_report.csv` in file order.
///
/// A header-only ledger yields an empty `Vec`; a zero-byte ledger is `EmptyLedger`.
pub fn load_ledger(path: &Path) -> Result<Vec<RunReport>, ReportError> {
    let rows = read_rows(path)?.ok_or_else(|| ReportError::EmptyLedger(path.to_path_buf()))?;
    debug!(path = %path.display(), rows = rows.len(), "ledger loaded");
    Ok(rows)
}

/// Returns `None` when the file has no content.
fn read_rows(path: &Path) -> Result<Option<Vec<RunReport>>, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ReportError::InputNotFound(path.to_path_buf()),
        _ => ReportError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if content.trim().is_empty() {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let rows = reader
        .deserialize::<RunReport>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "RunID,Timestamp,ConnectionsMade,TotalConnectButtonsFound,TotalProfilesScanned\n";

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).expect("write csv");
        path
    }

    #[test]
    fn test_load_run_report_first_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            dir.path(),
            "report.csv",
            &format!("{HEADER}run_20240101_090000,20240101_090000,3,5,12\n"),
        );

        let report = load_run_report(&path).expect("load");
        assert_eq!(report.run_id, "run_20240101_090000");
        assert_eq!(report.timestamp, "20240101_090000");
        assert_eq!(report.connections_made, 3);
        assert_eq!(report.total_connect_buttons_found, 5);
        assert_eq!(report.total_profiles_scanned, 12);
    }

    #[test]
    fn test_columns_matched_by_name_and_trimmed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            dir.path(),
            "report.csv",
            "TotalProfilesScanned, RunID, Notes, Timestamp, ConnectionsMade, TotalConnectButtonsFound\n\
             20, r1, ignored, 20240101_090000, 4, 9\n",
        );

        let report = load_run_report(&path).expect("load");
        assert_eq!(report.run_id, "r1");
        assert_eq!(report.connections_made, 4);
        assert_eq!(report.total_connect_buttons_found, 9);
        assert_eq!(report.total_profiles_scanned, 20);
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.csv");
        match load_run_report(&path) {
            Err(ReportError::InputNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected InputNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_report_has_no_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "report.csv", HEADER);
        assert!(matches!(load_run_report(&path), Err(ReportError::NoRows(_))));
    }

    #[test]
    fn test_zero_byte_ledger_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "master_report.csv", "");
        assert!(matches!(load_ledger(&path), Err(ReportError::EmptyLedger(_))));
    }

    #[test]
    fn test_header_only_ledger_loads_zero_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "master_report.csv", HEADER);
        assert!(load_ledger(&path).expect("load").is_empty());
    }

    #[test]
    fn test_ledger_keeps_file_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            dir.path(),
            "master_report.csv",
            &format!(
                "{HEADER}b,20240102_090000,1,2,3\na,20240101_090000,4,5,6\n"
            ),
        );
        let rows = load_ledger(&path).expect("load");
        let ids: Vec<&str> = rows.iter().map(|r| r.run_id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_non_numeric_count_is_csv_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            dir.path(),
            "master_report.csv",
            &format!("{HEADER}a,20240101_090000,lots,5,6\n"),
        );
        assert!(matches!(load_ledger(&path), Err(ReportError::Csv { .. })));
    }
}
