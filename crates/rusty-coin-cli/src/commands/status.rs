// Rust guideline compliant 2026-10-19

//! Implementation of the `rscn status` command.

use crate::commands::wallet::report_for;
use crate::{OutputFormatter, StatusReport};
use anyhow::Result;
use rusty_coin_core::{Blockchain, DataDir};

/// Summarizes the chain tip, the pool and the local wallet.
///
/// # Errors
///
/// Returns an error if the configuration or chain cannot be loaded.
pub fn execute(data_dir: &DataDir, formatter: &dyn OutputFormatter) -> Result<StatusReport> {
    let config = data_dir.load_config()?;
    let chain = data_dir.store().load_chain(config.chain)?;

    let wallet = match data_dir.load_wallet() {
        Ok(wallet) => Some(report_for(&chain, wallet.address())),
        Err(rusty_coin_core::Error::NotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };

    let tip = chain.last_block();
    let report = StatusReport {
        data_dir: data_dir.rscn_dir().display().to_string(),
        height: chain.height(),
        tip_hash: tip.hash(),
        tip_timestamp: tip.timestamp(),
        next_difficulty: chain.next_difficulty(),
        next_reward: Blockchain::reward_algorithm(chain.height() + 1),
        pending_transactions: chain.pool().len(),
        wallet,
    };

    println!("{}", formatter.format_status(&report));
    Ok(report)
}
