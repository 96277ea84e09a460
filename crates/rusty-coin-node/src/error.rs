// Rust guideline compliant 2026-10-19

use thiserror::Error;

/// Node errors.
#[derive(Debug, Error)]
pub enum NodeError {
    /// IO errors while binding or serving.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid log level provided.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Chain, storage or configuration failure.
    #[error(transparent)]
    Core(#[from] rusty_coin_core::Error),

    /// A blocking storage task panicked or was cancelled.
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Request to another node failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Another node answered with an error body.
    #[error("Node {addr} rejected the request: {message}")]
    Rejected {
        /// Address of the remote node.
        addr: String,
        /// Error message it returned.
        message: String,
    },
}
