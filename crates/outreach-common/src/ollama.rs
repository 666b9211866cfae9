/// Client for a local Ollama `/api/generate` endpoint.
///
/// Every call is non-streaming: the request carries `stream: false` and the client waits
/// for the full JSON body before returning. There is no retry; each failure mode surfaces
/// as its own `GenerateError` variant and the caller decides what to do with it.
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "llama3.1:8b-instruct-q4_K_S";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);
const DEFAULT_MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

/// Sampling parameters sent in the `options` object of every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.9,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OllamaClientConfig {
    /// Full URL of the generate endpoint, e.g. `http://localhost:11434/api/generate`.
    pub endpoint: String,
    pub model: String,
    /// Upper bound on a single call, connect through body read.
    pub timeout: Duration,
    pub options: SamplingOptions,
    pub max_error_body_bytes: usize,
}

impl Default for OllamaClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            options: SamplingOptions::default(),
            max_error_body_bytes: DEFAULT_MAX_ERROR_BODY_BYTES,
        }
    }
}

impl OllamaClientConfig {
    /// Load the endpoint settings from the environment, falling back to the defaults.
    ///
    /// - `OLLAMA_API_URL`: generate endpoint URL
    /// - `OLLAMA_MODEL`: model tag
    /// - `OLLAMA_TIMEOUT_SECS`: per-call timeout in seconds
    /// - `OLLAMA_MAX_ERROR_BODY_BYTES`: how much of an error body to keep for diagnostics
    ///
    /// Sampling options are fixed and not read from the environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let endpoint = std::env::var("OLLAMA_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.endpoint);

        let model = std::env::var("OLLAMA_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.model);

        let timeout = std::env::var("OLLAMA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&n| n > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let max_error_body_bytes = std::env::var("OLLAMA_MAX_ERROR_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_error_body_bytes);

        Self {
            endpoint: endpoint.trim().to_string(),
            model: model.trim().to_string(),
            timeout,
            options: defaults.options,
            max_error_body_bytes,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("ollama call timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("ollama request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("ollama returned error: status={status} body={body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode JSON response from ollama: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("'response' field not found in ollama response")]
    MissingResponse,
}

impl GenerateError {
    /// Short stable label for the failure mode, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::Client(_) => "client",
            GenerateError::Timeout(_) => "timeout",
            GenerateError::Transport(_) => "transport",
            GenerateError::Status { .. } => "status",
            GenerateError::InvalidJson(_) => "invalid_json",
            GenerateError::MissingResponse => "missing_response",
        }
    }
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: SamplingOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<serde_json::Value>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, options: SamplingOptions) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            options,
            system: None,
            format: None,
        }
    }

    /// Attach a system instruction. Empty instructions are dropped from the body.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        let system = system.into();
        self.system = (!system.is_empty()).then_some(system);
        self
    }

    /// Constrain the output format, e.g. `"json"` or a JSON schema object.
    pub fn with_format(mut self, format: serde_json::Value) -> Self {
        self.format = Some(format);
        self
    }
}

/// Successful reply, reduced to the fields the tools care about.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub response: String,
    pub model: Option<String>,
    pub eval_count: Option<u64>,
    pub total_duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GenerateEnvelope {
    response: Option<String>,
    model: Option<String>,
    #[allow(dead_code)]
    done: Option<bool>,
    total_duration: Option<u64>,
    eval_count: Option<u64>,
}

#[derive(Clone)]
pub struct OllamaClient {
    config: OllamaClientConfig,
    http: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: OllamaClientConfig) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .user_agent("outreach-tools/message-generator")
            .build()
            .map_err(GenerateError::Client)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OllamaClientConfig {
        &self.config
    }

    /// Start a request for the configured model and sampling options.
    pub fn request(&self, prompt: impl Into<String>) -> GenerateRequest {
        GenerateRequest::new(self.config.model.clone(), prompt, self.config.options)
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerateError> {
        let started = Instant::now();
        let result = self.send(request).await;
        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(reply) => debug!(
                model = %request.model,
                served_by = ?reply.model,
                elapsed_ms,
                eval_count = ?reply.eval_count,
                total_duration_ns = ?reply.total_duration,
                chars = reply.response.chars().count(),
                "ollama generate completed"
            ),
            Err(e) => warn!(
                model = %request.model,
                elapsed_ms,
                kind = e.kind(),
                error = %e,
                "ollama generate failed"
            ),
        }
        result
    }

    async fn send(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerateError> {
        let resp = self
            .http
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = read_limited_text(resp, self.config.max_error_body_bytes).await;
            return Err(GenerateError::Status { status, body });
        }

        let bytes = resp.bytes().await.map_err(|e| self.classify(e))?;
        let envelope: GenerateEnvelope = serde_json::from_slice(&bytes)?;
        let response = envelope.response.ok_or(GenerateError::MissingResponse)?;
        Ok(GenerateResponse {
            response,
            model: envelope.model,
            eval_count: envelope.eval_count,
            total_duration: envelope.total_duration,
        })
    }

    fn classify(&self, err: reqwest::Error) -> GenerateError {
        if err.is_timeout() {
            GenerateError::Timeout(self.config.timeout)
        } else {
            GenerateError::Transport(err)
        }
    }
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read ollama error body");
            "<failed to read error body>".to_string()
        }
    }
}
