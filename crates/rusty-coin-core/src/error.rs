// Rust guideline compliant 2026-10-19

//! Error types for the Rusty Coin core library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Rusty Coin operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Rusty Coin operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed hex string.
    #[error("Invalid hex: {0}")]
    Hex(String),

    /// Key or signature failure reported by secp256k1.
    #[error("Crypto error: {0}")]
    Crypto(#[from] secp256k1::Error),

    /// A block failed validation.
    #[error("Invalid block: {0}")]
    InvalidBlock(String),

    /// A transaction failed validation.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// The referenced output does not exist in the previous transaction.
    #[error("The output index is invalid, Invalid Output")]
    InvalidOutputIndex,

    /// Outputs spend more than the inputs provide.
    #[error("Outputs exceed the inputs they spend, Invalid Inputs")]
    InvalidInputFee,

    /// The referenced block does not exist.
    #[error("Invalid block index: {0}")]
    InvalidBlockIndex(usize),

    /// The referenced transaction does not exist in its block.
    #[error("Invalid transaction index: {0}")]
    InvalidTransactionIndex(String),

    /// The wallet cannot cover the requested amount.
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds {
        /// Amount plus fee requested.
        needed: rust_decimal::Decimal,
        /// Spendable balance.
        available: rust_decimal::Decimal,
    },

    /// Lookup failed.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The data directory does not exist.
    #[error("Rusty Coin data directory not initialized at {0}. Run 'rscn init' first.")]
    NotInitialized(PathBuf),

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid config: {0}")]
    Config(String),

    /// The storage lock is held by another process.
    #[error("Failed to acquire lock: {0}")]
    Lock(String),
}
