use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("ledger at {} is empty", .0.display())]
    EmptyLedger(PathBuf),

    #[error("report at {} has no data rows", .0.display())]
    NoRows(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid timestamp {value:?} in row {row}: {source}")]
    Timestamp {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failed to render {}: {message}", .path.display())]
    Render { path: PathBuf, message: String },
}
