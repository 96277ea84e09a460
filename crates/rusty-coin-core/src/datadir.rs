// Rust guideline compliant 2026-10-19

//! Data directory discovery and path management.

use crate::config::CONFIG_FILE;
use crate::storage::{CHAIN_FILE, MEMPOOL_FILE};
use crate::{ChainStore, Config, Error, Result, Wallet};
use std::path::{Path, PathBuf};

/// Name of the data directory created under the root.
pub const DATA_DIR_NAME: &str = ".rscn";

/// File holding the local wallet's secret key.
pub const WALLET_FILE: &str = "wallet.rscnkey";

/// Resolved paths of a `.rscn` data directory.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
    rscn_dir: PathBuf,
}

impl DataDir {
    /// Locates the `.rscn` directory under `root`, or the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The current directory cannot be resolved
    /// - The `.rscn` directory is missing
    pub fn discover(root: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let rscn_dir = root.join(DATA_DIR_NAME);
        if !rscn_dir.is_dir() {
            return Err(Error::NotInitialized(rscn_dir));
        }

        Ok(Self { root, rscn_dir })
    }

    /// Creates `.rscn` under `root` if it does not exist.
    ///
    /// Existing files are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn init(root: &Path) -> Result<Self> {
        let rscn_dir = root.join(DATA_DIR_NAME);
        std::fs::create_dir_all(&rscn_dir)?;
        Ok(Self {
            root: root.to_path_buf(),
            rscn_dir,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.rscn` directory path.
    #[must_use]
    pub fn rscn_dir(&self) -> &Path {
        &self.rscn_dir
    }

    #[must_use]
    pub fn chain_path(&self) -> PathBuf {
        self.rscn_dir.join(CHAIN_FILE)
    }

    #[must_use]
    pub fn mempool_path(&self) -> PathBuf {
        self.rscn_dir.join(MEMPOOL_FILE)
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.rscn_dir.join(CONFIG_FILE)
    }

    #[must_use]
    pub fn wallet_path(&self) -> PathBuf {
        self.rscn_dir.join(WALLET_FILE)
    }

    /// Opens storage for the chain and pool files.
    pub fn store(&self) -> ChainStore {
        ChainStore::new(&self.rscn_dir)
    }

    /// Loads the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        Config::load(&self.rscn_dir)
    }

    /// Loads the local wallet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no wallet was created, or an error if
    /// the key file is unreadable.
    pub fn load_wallet(&self) -> Result<Wallet> {
        let path = self.wallet_path();
        if !path.exists() {
            return Err(Error::NotFound(format!(
                "wallet {}. Run 'rscn wallet new' first.",
                path.display()
            )));
        }
        Wallet::build_from_private_key_file(&path)
    }
}
