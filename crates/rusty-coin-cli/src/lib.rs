// Rust guideline compliant 2026-10-19

//! Rusty Coin CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod output;
pub mod terminal;

pub use output::{create_formatter, OutputFormatter, StatusReport, WalletReport};
pub use terminal::should_use_color;
