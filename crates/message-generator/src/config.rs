use outreach_common::ollama::OllamaClientConfig;

/// Runtime configuration, loaded from the environment once at startup.
///
/// All variables are optional:
/// - `OLLAMA_API_URL`: generate endpoint (default `http://localhost:11434/api/generate`)
/// - `OLLAMA_MODEL`: model tag (default `llama3.1:8b-instruct-q4_K_S`)
/// - `OLLAMA_TIMEOUT_SECS`: per-call timeout (default 600)
/// - `OLLAMA_MAX_ERROR_BODY_BYTES`: error body excerpt size (default 8192)
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama: OllamaClientConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            ollama: OllamaClientConfig::from_env(),
        }
    }
}
