mod config;
mod error;
mod pipeline;
mod prompts;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;

use outreach_common::logging::{self, LogWriter};
use outreach_common::ollama::OllamaClient;

use config::Config;
use error::AppError;
use pipeline::{ConnectionMessage, MessagePipeline};

/// Draft a LinkedIn connection note from a saved profile page using a local Ollama model.
///
/// The note is printed to stdout; everything else goes to stderr.
#[derive(Debug, Parser)]
#[command(name = "message-generator", version)]
struct Cli {
    /// Path to the saved profile HTML.
    #[arg(allow_hyphen_values = true)]
    profile_html_path: PathBuf,
    /// The person's display name, used to personalise the note.
    #[arg(allow_hyphen_values = true)]
    person_name: String,
    /// Anything after the name is accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _rest: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
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

    // stdout carries only the generated message.
    logging::init(LogWriter::Stderr);

    let message = match run(cli).await {
        Ok(message) => message,
        Err(e) => {
            let stage = e.downcast_ref::<AppError>().and_then(AppError::stage);
            tracing::error!(stage = ?stage, error = %e, "message generation failed");
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{message}").and_then(|()| stdout.flush()) {
        eprintln!("Error: failed to write message to stdout: {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> anyhow::Result<ConnectionMessage> {
    let config = Config::from_env();
    let client = OllamaClient::new(config.ollama)?;
    info!(
        endpoint = %client.config().endpoint,
        model = %client.config().model,
        timeout_secs = client.config().timeout.as_secs(),
        "ollama client configured"
    );

    let pipeline = MessagePipeline::new(client);
    let message = pipeline.run(&cli.profile_html_path, &cli.person_name).await?;
    Ok(message)
}
