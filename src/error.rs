//! Error types for container-tabs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Classification failed for '{id}': {reason}")]
    Classifier { id: String, reason: String },

    #[error("Host error: {0}")]
    Host(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Event channel closed")]
    ChannelClosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SidebarError>;
