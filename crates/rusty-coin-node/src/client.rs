// Rust guideline compliant 2026-10-19

//! HTTP client for talking to other nodes.

use crate::types::{ErrorBody, HeightResponse, SubmitResponse};
use crate::NodeError;
use reqwest::{Client, Response};
use rusty_coin_core::{Block, HashValue, Transaction};

/// Client bound to one remote node.
#[derive(Debug, Clone)]
pub struct NodeClient {
    client: Client,
    addr: String,
}

impl NodeClient {
    /// Creates a client for the node at `addr` (`host:port`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(addr: &str) -> Result<Self, NodeError> {
        let client = Client::builder().use_rustls_tls().build()?;
        Ok(Self {
            client,
            addr: addr.to_string(),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Sends `GET /ping` and returns the reply text.
    pub async fn ping(&self) -> Result<String, NodeError> {
        let response = self.client.get(self.url("/ping")).send().await?;
        Ok(self.check(response).await?.text().await?)
    }

    /// Index of the remote node's latest block.
    pub async fn height(&self) -> Result<usize, NodeError> {
        let response = self.client.get(self.url("/height")).send().await?;
        let body: HeightResponse = self.check(response).await?.json().await?;
        Ok(body.height)
    }

    /// Fetches one block. `None` if the node has no block at `index`.
    pub async fn block(&self, index: usize) -> Result<Option<Block>, NodeError> {
        let response = self
            .client
            .get(self.url(&format!("/blocks/{}", index)))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(self.check(response).await?.json().await?))
    }

    /// The remote node's pending transactions.
    pub async fn pool(&self) -> Result<Vec<Transaction>, NodeError> {
        let response = self.client.get(self.url("/pool")).send().await?;
        Ok(self.check(response).await?.json().await?)
    }

    /// Queues a signed transaction on the remote node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::Rejected`] if the node refuses the transaction.
    pub async fn submit_transaction(&self, tx: &Transaction) -> Result<HashValue, NodeError> {
        let response = self
            .client
            .post(self.url("/transactions"))
            .json(tx)
            .send()
            .await?;
        let body: SubmitResponse = self.check(response).await?.json().await?;
        Ok(body.transaction_id)
    }

    async fn check(&self, response: Response) -> Result<Response, NodeError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(NodeError::Rejected {
            addr: self.addr.clone(),
            message,
        })
    }
}

/// Pings the node at `addr`.
///
/// # Errors
///
/// Returns an error if the node cannot be reached.
pub async fn ping(addr: &str) -> Result<String, NodeError> {
    NodeClient::new(addr)?.ping().await
}

/// Fetches the height of the node at `addr`.
///
/// # Errors
///
/// Returns an error if the node cannot be reached.
pub async fn fetch_height(addr: &str) -> Result<usize, NodeError> {
    NodeClient::new(addr)?.height().await
}
