/// Two-stage message pipeline: load → extract → compose.
///
/// Stages run strictly in order and the first failure ends the run. Nothing is retried
/// and nothing partial is returned; `main` emits the final message.
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use outreach_common::ollama::{GenerateRequest, OllamaClient};

use crate::error::{AppError, Stage};
use crate::prompts;

/// Free-text facts pulled out of a profile page by the extraction stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary(String);

impl ProfileSummary {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The drafted connection note, exactly as the model returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionMessage(String);

impl fmt::Display for ConnectionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct MessagePipeline {
    client: OllamaClient,
}

impl MessagePipeline {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }

    pub async fn run(&self, document: &Path, person_name: &str) -> Result<ConnectionMessage, AppError> {
        let html = Self::load_document(document)?;
        let summary = self.extract(&html).await?;
        self.compose(&summary, person_name).await
    }

    /// Read the saved profile page as UTF-8 text.
    pub fn load_document(path: &Path) -> Result<String, AppError> {
        let html = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => AppError::DocumentNotFound(path.to_path_buf()),
            _ => AppError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        info!(path = %path.display(), bytes = html.len(), "profile document loaded");
        Ok(html)
    }

    pub async fn extract(&self, html: &str) -> Result<ProfileSummary, AppError> {
        let request = self
            .client
            .request(prompts::extraction_prompt(html))
            .with_system(prompts::extraction_system());
        let text = self.call(Stage::Extract, &request).await?;
        info!(chars = text.chars().count(), "profile information extracted");
        Ok(ProfileSummary(text))
    }

    pub async fn compose(
        &self,
        summary: &ProfileSummary,
        person_name: &str,
    ) -> Result<ConnectionMessage, AppError> {
        let request = self
            .client
            .request(prompts::composition_prompt(person_name, summary.as_str()))
            .with_system(prompts::composition_system(person_name));
        let text = self.call(Stage::Compose, &request).await?;

        let chars = text.chars().count();
        if chars > prompts::MESSAGE_CHAR_LIMIT {
            warn!(
                chars,
                limit = prompts::MESSAGE_CHAR_LIMIT,
                "connection message exceeds the note limit, emitting unmodified"
            );
        }
        info!(chars, "connection message generated");
        Ok(ConnectionMessage(text))
    }

    async fn call(&self, stage: Stage, request: &GenerateRequest) -> Result<String, AppError> {
        info!(%stage, model = %request.model, "calling ollama");
        let reply = self
            .client
            .generate(request)
            .await
            .map_err(|source| AppError::Stage { stage, source })?;
        if reply.response.trim().is_empty() {
            return Err(AppError::EmptyOutput { stage });
        }
        Ok(reply.response)
    }
}
