//! Error types for the engine binary.

/// Errors that can occur while bringing the engine up.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),
}
