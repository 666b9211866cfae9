use tracing_subscriber::EnvFilter;

/// Which standard stream receives log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogWriter {
    Stdout,
    /// Use when stdout is reserved for program output.
    Stderr,
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init(writer: LogWriter) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false);

    match writer {
        LogWriter::Stdout => builder.with_writer(std::io::stdout).init(),
        LogWriter::Stderr => builder.with_writer(std::io::stderr).init(),
    }
}
