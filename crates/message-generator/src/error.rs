use std::fmt;
use std::path::PathBuf;

use outreach_common::ollama::GenerateError;

/// One of the two generation calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Compose,
}

impl Stage {
    fn failure_message(self) -> &'static str {
        match self {
            Stage::Extract => "Failed to extract profile information from LLM",
            Stage::Compose => "Failed to generate connection message from LLM",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => f.write_str("extract"),
            Stage::Compose => f.write_str("compose"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("HTML file not found at {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .stage.failure_message())]
    Stage {
        stage: Stage,
        #[source]
        source: GenerateError,
    },

    #[error("{}: model returned an empty response", .stage.failure_message())]
    EmptyOutput { stage: Stage },
}

impl AppError {
    /// The generation stage that failed, if the failure came from a model call.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AppError::Stage { stage, .. } | AppError::EmptyOutput { stage } => Some(*stage),
            AppError::DocumentNotFound(_) | AppError::Io { .. } => None,
        }
    }
}
