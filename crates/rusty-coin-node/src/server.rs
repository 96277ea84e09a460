// Rust guideline compliant 2026-10-19

//! HTTP server runtime for a Rusty Coin node.

use crate::client::NodeClient;
use crate::types::{ErrorBody, HeightResponse, SubmitResponse};
use crate::NodeError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rusty_coin_core::{Block, Blockchain, ChainStore, DataDir, Error, StoreRevision, Transaction};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Runtime options for the node.
///
/// Unset addresses fall back to the `[node]` section of `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct NodeOptions {
    /// Directory holding `.rscn`. Defaults to the current directory.
    pub data_dir: Option<PathBuf>,
    /// Address to bind.
    pub listen_addr: Option<String>,
    /// Root node to ping on startup.
    pub root_addr: Option<String>,
}

/// State shared by all request handlers.
///
/// A store-backed state follows the files on disk: reads pick up blocks and
/// payments written by other processes, and submissions are applied to the
/// stored pool under the store lock.
#[derive(Debug, Clone)]
pub struct NodeState {
    chain: Arc<RwLock<Blockchain>>,
    store: Option<ChainStore>,
    /// Revision the cached chain was loaded from. Held while syncing.
    revision: Arc<Mutex<Option<StoreRevision>>>,
}

impl NodeState {
    /// State over an in-memory chain. Accepted transactions are not persisted.
    pub fn new(chain: Blockchain) -> Self {
        Self {
            chain: Arc::new(RwLock::new(chain)),
            store: None,
            revision: Arc::new(Mutex::new(None)),
        }
    }

    /// State over a chain loaded from `store`.
    pub fn with_store(chain: Blockchain, store: ChainStore) -> Self {
        let revision = store.revision().ok();
        Self {
            chain: Arc::new(RwLock::new(chain)),
            store: Some(store),
            revision: Arc::new(Mutex::new(revision)),
        }
    }

    pub fn chain(&self) -> Arc<RwLock<Blockchain>> {
        Arc::clone(&self.chain)
    }

    /// Reloads the cached chain if the store changed since it was loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or no longer validates.
    pub async fn sync(&self) -> Result<(), NodeError> {
        let Some(store) = self.store.clone() else {
            return Ok(());
        };
        let mut revision = self.revision.lock().await;
        let known = revision.clone();
        let params = self.chain.read().await.params().clone();

        let reloaded = tokio::task::spawn_blocking(move || {
            let current = store.revision()?;
            if known.as_ref() == Some(&current) {
                return Ok(None);
            }
            let chain = store.load_chain(params)?;
            Ok::<_, Error>(Some((chain, current)))
        })
        .await??;

        if let Some((chain, current)) = reloaded {
            tracing::debug!(height = chain.height(), pool = chain.pool().len(), "reloaded chain");
            *self.chain.write().await = chain;
            *revision = Some(current);
        }
        Ok(())
    }

    /// Syncs before a read; a failed sync serves the cached chain.
    async fn sync_or_warn(&self) {
        if let Err(e) = self.sync().await {
            tracing::warn!(error = %e, "serving cached chain");
        }
    }
}

/// Builds the node's routes.
pub fn router(state: NodeState) -> Router {
    Router::new()
        .route("/ping", get(pong))
        .route("/height", get(height))
        .route("/blocks/latest", get(latest_block))
        .route("/blocks/:index", get(block_by_index))
        .route("/pool", get(pool))
        .route("/transactions", post(submit_transaction))
        .with_state(state)
}

/// Runs the node from a data directory until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the data directory, configuration or chain cannot be
/// loaded, the runtime cannot start, or the listener cannot bind.
pub fn run(options: NodeOptions) -> Result<(), NodeError> {
    let data_dir = DataDir::discover(options.data_dir.as_deref())?;
    let config = data_dir.load_config()?;
    let store = data_dir.store();
    let chain = store.load_chain(config.chain.clone())?;

    let listen_addr = options
        .listen_addr
        .unwrap_or_else(|| config.node.listen_addr.clone());
    let root_addr = options.root_addr.or_else(|| config.node.root_addr.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
        serve(
            listener,
            NodeState::with_store(chain, store),
            root_addr.as_deref(),
            shutdown_signal(),
        )
        .await
    })
}

/// Serves the node on an already bound listener until `shutdown` resolves.
///
/// When `root_addr` is set the root node is pinged first; an unreachable
/// root is logged and the node keeps running on its own.
///
/// # Errors
///
/// Returns an error if the listener fails.
pub async fn serve<F>(
    listener: tokio::net::TcpListener,
    state: NodeState,
    root_addr: Option<&str>,
    shutdown: F,
) -> Result<(), NodeError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    match root_addr {
        Some(addr) => match NodeClient::new(addr)?.ping().await {
            Ok(reply) => tracing::info!(root = addr, reply = %reply, "reached root node"),
            Err(e) => tracing::warn!(root = addr, error = %e, "root node unreachable"),
        },
        None => tracing::info!("no root node configured, running as the root node"),
    }

    let addr = listener.local_addr()?;
    tracing::info!(%addr, "node listening");
    tracing::info!("check it with: curl http://127.0.0.1:{}/ping", addr.port());

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("node stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Error response carrying a status code and an `ErrorBody`.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: String) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message,
        }
    }

    fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    /// Rejected transactions are the client's fault; a held store lock is
    /// temporary; anything else is the node's.
    fn from_core(error: Error) -> Self {
        let status = match &error {
            Error::InvalidTransaction(_)
            | Error::InvalidInputFee
            | Error::InvalidOutputIndex
            | Error::InvalidBlockIndex(_)
            | Error::InvalidTransactionIndex(_)
            | Error::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
            Error::Lock(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => {
                tracing::error!(error = %error, "failed to apply transaction");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

async fn pong() -> &'static str {
    "pong"
}

async fn height(State(state): State<NodeState>) -> Json<HeightResponse> {
    state.sync_or_warn().await;
    let chain = state.chain.read().await;
    Json(HeightResponse {
        height: chain.height(),
    })
}

async fn latest_block(State(state): State<NodeState>) -> Json<Block> {
    state.sync_or_warn().await;
    let chain = state.chain.read().await;
    Json(chain.last_block().clone())
}

async fn block_by_index(
    State(state): State<NodeState>,
    Path(index): Path<usize>,
) -> Result<Json<Block>, ApiError> {
    state.sync_or_warn().await;
    let chain = state.chain.read().await;
    chain
        .get_block(index)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no block at index {}", index)))
}

async fn pool(State(state): State<NodeState>) -> Json<Vec<Transaction>> {
    state.sync_or_warn().await;
    let chain = state.chain.read().await;
    Json(chain.pool().to_vec())
}

async fn submit_transaction(
    State(state): State<NodeState>,
    Json(tx): Json<Transaction>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let transaction_id = tx.transaction_id();

    match state.store.clone() {
        Some(store) => submit_to_store(&state, store, tx).await?,
        None => state
            .chain
            .write()
            .await
            .submit_transaction(tx)
            .map_err(ApiError::from_core)?,
    }

    tracing::info!(tx = %transaction_id, "accepted transaction");
    Ok((StatusCode::ACCEPTED, Json(SubmitResponse { transaction_id })))
}

/// Applies a submission to the stored pool, then adopts the stored state.
///
/// The chain is reloaded under the store lock, so payments queued by other
/// processes are kept. Memory only changes once the pool file is written.
async fn submit_to_store(
    state: &NodeState,
    store: ChainStore,
    tx: Transaction,
) -> Result<(), ApiError> {
    let mut revision = state.revision.lock().await;
    let params = state.chain.read().await.params().clone();

    let (chain, current) = tokio::task::spawn_blocking(move || {
        store.with_lock(|| {
            let mut chain = store.load_chain(params)?;
            chain.submit_transaction(tx)?;
            store.save_pool(chain.pool())?;
            Ok((chain, store.revision()?))
        })
    })
    .await
    .map_err(|e| ApiError::internal(e.to_string()))?
    .map_err(ApiError::from_core)?;

    *state.chain.write().await = chain;
    *revision = Some(current);
    Ok(())
}
