// Rust guideline compliant 2026-10-19

//! HTTP node for Rusty Coin.
//!
//! Serves the local chain over HTTP and talks to other nodes:
//! - `GET /ping`, `/height`, `/blocks/latest`, `/blocks/:index`, `/pool`
//! - `POST /transactions` to queue a signed transaction
//! - a small client for the same routes

pub mod client;
pub mod error;
pub mod logging;
pub mod server;
pub mod types;

pub use client::{fetch_height, ping, NodeClient};
pub use error::NodeError;
pub use logging::{init_tracing, TracingOptions};
pub use server::{router, run, serve, NodeOptions, NodeState};
