// Rust guideline compliant 2026-10-19

//! JSONL persistence for blocks and pending transactions.
//!
//! Blocks live in `chain.jsonl` and the transaction pool in `mempool.jsonl`,
//! one JSON document per line. Full rewrites go through a temp file and an
//! atomic rename; writers serialize on an exclusive `fs2` lock.

use crate::{Block, Blockchain, ChainParams, Error, Result, Transaction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// File holding one block per line.
pub const CHAIN_FILE: &str = "chain.jsonl";

/// File holding one pending transaction per line.
pub const MEMPOOL_FILE: &str = "mempool.jsonl";

/// Size and modification time of the chain and pool files.
///
/// Two equal revisions mean neither file was rewritten in between, so a
/// reader can keep what it loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRevision {
    chain: Option<(u64, SystemTime)>,
    pool: Option<(u64, SystemTime)>,
}

/// Storage engine for a chain and its transaction pool.
#[derive(Debug, Clone)]
pub struct ChainStore {
    chain_path: PathBuf,
    pool_path: PathBuf,
}

impl ChainStore {
    /// Creates a store over the files in `dir`.
    ///
    /// Nothing is touched on disk until the first read or write.
    pub fn new(dir: &Path) -> Self {
        Self {
            chain_path: dir.join(CHAIN_FILE),
            pool_path: dir.join(MEMPOOL_FILE),
        }
    }

    pub fn chain_path(&self) -> &Path {
        &self.chain_path
    }

    pub fn pool_path(&self) -> &Path {
        &self.pool_path
    }

    /// Loads every block in file order.
    ///
    /// A missing file yields no blocks. Malformed lines are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened.
    pub fn load_blocks(&self) -> Result<Vec<Block>> {
        load_lines(&self.chain_path)
    }

    /// Loads pending transactions in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened.
    pub fn load_pool(&self) -> Result<Vec<Transaction>> {
        load_lines(&self.pool_path)
    }

    /// Appends one block to the chain file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append_block(&self, block: &Block) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.chain_path)?;
        let json = serde_json::to_string(block)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        Ok(())
    }

    /// Replaces the chain file with `blocks`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be written or renamed.
    pub fn save_blocks(&self, blocks: &[Block]) -> Result<()> {
        save_lines(&self.chain_path, blocks)
    }

    /// Replaces the pool file with `pool`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be written or renamed.
    pub fn save_pool(&self, pool: &[Transaction]) -> Result<()> {
        save_lines(&self.pool_path, pool)
    }

    /// Loads and validates the persisted chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no blocks are stored, otherwise any
    /// error from [`Blockchain::from_blocks`].
    pub fn load_chain(&self, params: ChainParams) -> Result<Blockchain> {
        let blocks = self.load_blocks()?;
        if blocks.is_empty() {
            return Err(Error::NotFound(format!(
                "no blocks in {}",
                self.chain_path.display()
            )));
        }
        let pool = self.load_pool()?;
        Blockchain::from_blocks(blocks, pool, params)
    }

    /// Writes the full chain and pool.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn save_chain(&self, chain: &Blockchain) -> Result<()> {
        self.save_blocks(chain.blocks())?;
        self.save_pool(chain.pool())
    }

    /// Stamps the current state of both files. Missing files stamp as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be inspected.
    pub fn revision(&self) -> Result<StoreRevision> {
        Ok(StoreRevision {
            chain: file_stamp(&self.chain_path)?,
            pool: file_stamp(&self.pool_path)?,
        })
    }

    /// Executes a closure with an exclusive lock on the store.
    ///
    /// The lock is a sibling `chain.lock` file. It is released when the
    /// closure returns, whether or not it failed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lock`] if another process holds the lock, otherwise the
    /// closure's error.
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;

        let lock_path = self.chain_path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file
            .try_lock_exclusive()
            .map_err(|e| Error::Lock(format!("{}: {}", lock_path.display(), e)))?;

        let result = f();

        let _ = lock_file.unlock();

        result
    }
}

fn file_stamp(path: &Path) -> Result<Option<(u64, SystemTime)>> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some((meta.len(), meta.modified()?))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn load_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut items = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(&line) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = number + 1,
                    error = %e,
                    "skipping malformed JSON line"
                );
            }
        }
    }

    Ok(items)
}

fn save_lines<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let temp_path = path.with_extension("jsonl.tmp");

    {
        let mut file = File::create(&temp_path)?;
        for item in items {
            let json = serde_json::to_string(item)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
        }
        file.sync_all()?;
    }

    std::fs::rename(&temp_path, path)?;

    Ok(())
}
