// Rust guideline compliant 2026-10-19

//! Command implementations for the Rusty Coin CLI.

pub mod chain;
pub mod init;
pub mod mine;
pub mod node;
pub mod send;
pub mod show;
pub mod status;
pub mod verify;
pub mod wallet;
