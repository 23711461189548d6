// src/infra/errors.rs — Error types for FinGPT

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinGptError {
    // Provider errors
    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    // User errors
    #[error("Please enter a prompt")]
    EmptyPrompt,

    #[error("Session {index} not found")]
    SessionNotFound { index: usize },

    #[error("No active session in history")]
    NoActiveSession,

    // Capabilities
    #[error("{capability} is not supported on this system")]
    Unsupported { capability: String },

    #[error("Voice error: {0}")]
    Voice(String),

    // Infra
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FinGptError {
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            FinGptError::Provider {
                retriable: true,
                ..
            } | FinGptError::RateLimited { .. }
        )
    }
}
