// Rust guideline compliant 2026-10-19

//! Implementation of the `rscn init` command.
//!
//! Creates the `.rscn` data directory with a default configuration, a
//! genesis-only chain and a fresh wallet.

use anyhow::Result;
use rusty_coin_core::{unix_timestamp, Blockchain, Config, DataDir, Wallet};
use std::path::Path;

/// Initializes a data directory under `root`.
///
/// Existing files are kept, so running `init` twice is harmless.
///
/// # Arguments
///
/// * `root` - Directory that will hold `.rscn`
/// * `genesis_message` - Message for the genesis block; defaults to the
///   configured `genesis_message`
///
/// # Errors
///
/// Returns an error if:
/// - The `.rscn` directory cannot be created
/// - An existing configuration is invalid
/// - The chain, config or wallet files cannot be written
pub fn execute(root: &Path, genesis_message: Option<String>) -> Result<DataDir> {
    let data_dir = DataDir::init(root)?;
    let mut created = Vec::new();

    let config = if data_dir.config_path().exists() {
        data_dir.load_config()?
    } else {
        let mut config = Config::default();
        if let Some(message) = &genesis_message {
            config.genesis_message = message.clone();
        }
        config.save(data_dir.rscn_dir())?;
        created.push("config.toml");
        config
    };

    let store = data_dir.store();
    if store.load_blocks()?.is_empty() {
        let message = genesis_message.unwrap_or_else(|| config.genesis_message.clone());
        let chain = Blockchain::with_params(&message, unix_timestamp(), config.chain.clone());
        store.with_lock(|| store.save_chain(&chain))?;
        created.push("chain.jsonl");
    }

    if !data_dir.wallet_path().exists() {
        Wallet::new().save_private_key_to_file(&data_dir.wallet_path())?;
        created.push("wallet.rscnkey");
    }

    println!(
        "✓ Rusty Coin data directory ready at {}",
        data_dir.rscn_dir().display()
    );
    for file in created {
        println!("  - Created {}", file);
    }

    Ok(data_dir)
}
