pub mod logging;
pub mod ollama;
