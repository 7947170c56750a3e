// Error types for the gemini-webchat handler

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Required package not importable: {0}")]
    DependencyMissing(String),

    #[error("Dependency installation failed: {0}")]
    Install(String),

    #[error("Remote service error: {0}")]
    RemoteService(String),

    #[error("No cached session for UUID {0}")]
    SessionNotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl HandlerError {
    /// Stable kind string for host-side dispatch on failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::DependencyMissing(_) => "dependency_missing",
            HandlerError::Install(_) => "install_error",
            HandlerError::RemoteService(_) => "remote_service_error",
            HandlerError::SessionNotFound(_) => "session_not_found",
            HandlerError::Config(_) => "configuration_error",
            HandlerError::Io(_) => "io_error",
            HandlerError::Json(_) => "json_error",
            HandlerError::InvalidRequest(_) => "invalid_request_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, HandlerError>;
