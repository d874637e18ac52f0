//! Error types for QUILL.

/// Errors produced by the QUILL command framework.
#[derive(Debug, thiserror::Error)]
pub enum QuillError {
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("command '{command}' cannot be run by {sender}")]
    SenderNotSupported { command: String, sender: String },

    #[error("execution error: {0}")]
    Execution(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, QuillError>;
