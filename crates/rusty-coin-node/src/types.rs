// Rust guideline compliant 2026-10-19

//! Request and response bodies shared by the server and the client.

use rusty_coin_core::HashValue;
use serde::{Deserialize, Serialize};

/// Body of `GET /height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightResponse {
    /// Index of the latest block.
    pub height: usize,
}

/// Body of a successful `POST /transactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub transaction_id: HashValue,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
