/// Derived counts for both charts. No I/O here.
///
/// The CSV is expected to satisfy `connections <= buttons found <= profiles scanned`, but
/// nothing checks it: differences saturate at zero instead.
use crate::error::ReportError;
use crate::model::{Bar, Category, RunReport, TrendPoint};

/// Bars for the per-run chart, zero-valued categories dropped.
///
/// An empty result means there is nothing to plot.
pub fn run_breakdown(report: &RunReport) -> Vec<Bar> {
    let unsuccessful = report
        .total_connect_buttons_found
        .saturating_sub(report.connections_made);
    let without_button = report
        .total_profiles_scanned
        .saturating_sub(report.total_connect_buttons_found);

    [
        (Category::Successful, report.connections_made),
        (Category::Unsuccessful, unsuccessful),
        (Category::WithoutButton, without_button),
    ]
    .into_iter()
    .filter(|&(_, value)| value > 0)
    .map(|(category, value)| Bar { category, value })
    .collect()
}

/// Both historical series, sorted ascending by timestamp.
///
/// Rows sharing a timestamp keep their ledger order. Fails on the first unparseable
/// timestamp; `row` in the error is 1-based over data rows.
pub fn historical_series(rows: &[RunReport]) -> Result<Vec<TrendPoint>, ReportError> {
    let mut points = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let timestamp = row
                .parsed_timestamp()
                .map_err(|source| ReportError::Timestamp {
                    row: i + 1,
                    value: row.timestamp.clone(),
                    source,
                })?;
            Ok(TrendPoint {
                timestamp,
                connections_made: row.connections_made,
                other_interactions: row
                    .total_profiles_scanned
                    .saturating_sub(row.connections_made),
            })
        })
        .collect::<Result<Vec<_>, ReportError>>()?;

    points.sort_by_key(|p| p.timestamp);
    Ok(points)
}
