// Rust guideline compliant 2026-10-19

//! Rusty Coin Core Library
//!
//! This crate provides the foundational components for the Rusty Coin ledger:
//! - Fixed-size byte types and hex encoding
//! - Compact difficulty targets and retargeting
//! - Transactions with P2PKH locking and secp256k1 unlocking scripts
//! - Blocks, merkle roots and proof of work
//! - The blockchain with its transaction pool and validation rules
//! - Wallets (key management, UTXO selection, signing)
//! - JSONL storage, configuration and data directory layout

pub mod block;
pub mod blockchain;
pub mod config;
pub mod datadir;
pub mod difficulty;
pub mod error;
pub mod storage;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use block::Block;
pub use blockchain::{select_by_fee, Blockchain, ChainParams};
pub use config::{Config, NodeConfig};
pub use datadir::DataDir;
pub use error::{Error, Result};
pub use storage::{ChainStore, StoreRevision};
pub use transaction::{checked_total, Input, Output, Transaction};
pub use types::{Bytes, HashValue, Signature};
pub use wallet::{Wallet, UTXO};

/// Returns the current Unix time in seconds.
///
/// Clocks set before the epoch read as zero.
pub fn unix_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs()
}
