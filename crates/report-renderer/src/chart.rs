/// PNG chart drawing with plotters.
///
/// Drawing code returns `Box<dyn Error>` internally because plotters errors are generic over
/// the backend; the public functions flatten them into `ReportError::Render`.
use std::error::Error;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use plotters::element::Cross;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontTransform;

use crate::error::ReportError;
use crate::model::{Bar, Category, TrendPoint};

pub const PER_RUN_SIZE: (u32, u32) = (1000, 600);
pub const HISTORICAL_SIZE: (u32, u32) = (1200, 700);

const FONT: &str = "sans-serif";
const GREEN_BAR: RGBColor = RGBColor(0, 128, 0);
const ORANGE_BAR: RGBColor = RGBColor(255, 165, 0);
const RED_BAR: RGBColor = RGBColor(255, 0, 0);
const BLUE_LINE: RGBColor = RGBColor(0, 0, 255);
const PURPLE_LINE: RGBColor = RGBColor(128, 0, 128);

// Pixels left empty on each side of a bar within its category slot.
const BAR_GAP: u32 = 40;

// Single-run ledgers get this much room either side of the lone point.
const SINGLE_POINT_PAD_SECS: i64 = 3600;

type DrawResult = Result<(), Box<dyn Error>>;

/// Bar chart of one run's outcome. `bars` must be non-empty.
pub fn draw_run_breakdown(path: &Path, run_id: &str, bars: &[Bar]) -> Result<(), ReportError> {
    draw_bars(path, run_id, bars).map_err(|e| render_error(path, e))
}

/// Line chart of every run in the ledger. `points` must be non-empty and sorted.
pub fn draw_history(path: &Path, points: &[TrendPoint]) -> Result<(), ReportError> {
    draw_lines(path, points).map_err(|e| render_error(path, e))
}

fn render_error(path: &Path, e: Box<dyn Error>) -> ReportError {
    ReportError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn bar_color(category: Category) -> RGBColor {
    match category {
        Category::Successful => GREEN_BAR,
        Category::Unsuccessful => ORANGE_BAR,
        Category::WithoutButton => RED_BAR,
    }
}

/// Headroom above the tallest value so bars and markers never touch the frame.
fn y_upper_bound(max: u64) -> f64 {
    let max = max as f64;
    (max * 1.1).max(max + 1.0)
}

fn category_label(bars: &[Bar], x: &SegmentValue<usize>) -> String {
    match x {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => bars
            .get(*i)
            .map(|b| b.category.label().to_string())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

fn draw_bars(path: &Path, run_id: &str, bars: &[Bar]) -> DrawResult {
    let root = BitMapBackend::new(path, PER_RUN_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let max = bars.iter().map(|b| b.value).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Connection Statistics for Run: {run_id}"), (FONT, 26))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0.0..y_upper_bound(max))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(&WHITE)
        .bold_line_style(&BLACK.mix(0.15))
        .x_label_formatter(&|x| category_label(bars, x))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .y_desc("Count")
        .axis_desc_style((FONT, 16))
        .label_style((FONT, 14))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), bar.value as f64),
            ],
            bar_color(bar.category).filled(),
        );
        rect.set_margin(0, 0, BAR_GAP, BAR_GAP);
        rect
    }))?;

    root.present()?;
    Ok(())
}

fn epoch_secs(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp()
}

fn format_epoch(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// X range in epoch seconds, padded so the first and last runs are not drawn on the frame.
fn time_range(points: &[TrendPoint]) -> std::ops::Range<i64> {
    let first = points.first().map(|p| epoch_secs(p.timestamp)).unwrap_or(0);
    let last = points.last().map(|p| epoch_secs(p.timestamp)).unwrap_or(first);
    if last <= first {
        return (first - SINGLE_POINT_PAD_SECS)..(first + SINGLE_POINT_PAD_SECS);
    }
    let pad = ((last - first) / 50).max(60);
    (first - pad)..(last + pad)
}

fn draw_lines(path: &Path, points: &[TrendPoint]) -> DrawResult {
    let root = BitMapBackend::new(path, HISTORICAL_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let successful: Vec<(i64, f64)> = points
        .iter()
        .map(|p| (epoch_secs(p.timestamp), p.connections_made as f64))
        .collect();
    let other: Vec<(i64, f64)> = points
        .iter()
        .map(|p| (epoch_secs(p.timestamp), p.other_interactions as f64))
        .collect();

    let max = points
        .iter()
        .map(|p| p.connections_made.max(p.other_interactions))
        .max()
        .unwrap_or(0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Connection Statistics Over All Runs", (FONT, 26))
        .margin(20)
        .x_label_area_size(140)
        .y_label_area_size(60)
        .build_cartesian_2d(time_range(points), 0.0..y_upper_bound(max))?;

    chart
        .configure_mesh()
        .light_line_style(&WHITE)
        .bold_line_style(&BLACK.mix(0.15))
        .x_labels(points.len().clamp(2, 12))
        .x_label_formatter(&|x| format_epoch(*x))
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .x_desc("Run Timestamp")
        .y_desc("Count")
        .axis_desc_style((FONT, 16))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            successful.iter().copied(),
            BLUE_LINE.stroke_width(2),
        ))?
        .label("Successful Connections")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE_LINE.stroke_width(2)));
    chart.draw_series(
        successful
            .iter()
            .map(|&p| Circle::new(p, 4, BLUE_LINE.filled())),
    )?;

    chart
        .draw_series(DashedLineSeries::new(
            other.iter().copied(),
            8,
            5,
            PURPLE_LINE.stroke_width(2),
        ))?
        .label("Other Profile Interactions (Scanned - Connected)")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], PURPLE_LINE.stroke_width(2))
        });
    chart.draw_series(
        other
            .iter()
            .map(|&p| Cross::new(p, 5, PURPLE_LINE.stroke_width(2))),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((FONT, 14))
        .draw()?;

    root.present()?;
    Ok(())
}
