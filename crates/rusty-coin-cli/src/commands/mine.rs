// Rust guideline compliant 2026-10-19

//! Implementation of the `rscn mine` command.
//!
//! Mines one block on top of the local chain from the pending pool.

use crate::OutputFormatter;
use anyhow::Result;
use rusty_coin_core::{
    checked_total, select_by_fee, unix_timestamp, Block, Blockchain, DataDir, Error, HashValue,
    Transaction,
};

/// Mines the next block and appends it to the chain.
///
/// The coinbase pays the block reward plus the fees of the included
/// transactions to `to`, the configured `mining_address`, or the local wallet,
/// in that order of preference.
///
/// # Arguments
///
/// * `data_dir` - Data directory holding the chain
/// * `to` - Address credited with the reward
/// * `max_transactions` - Most pool transactions to include, highest fee first
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if no reward address can be resolved or the chain cannot
/// be loaded, extended or written.
pub fn execute(
    data_dir: &DataDir,
    to: Option<HashValue>,
    max_transactions: usize,
    formatter: &dyn OutputFormatter,
) -> Result<Block> {
    let config = data_dir.load_config()?;
    let address = match to.or(config.mining_address) {
        Some(address) => address,
        None => data_dir.load_wallet()?.address(),
    };
    let store = data_dir.store();

    let block = store.with_lock(|| {
        let mut chain = store.load_chain(config.chain.clone())?;
        let transactions = chain.find_transactions_by_algo(select_by_fee(max_transactions));
        let payout = checked_total(transactions.iter().map(Transaction::transaction_fee))
            .and_then(|fees| Blockchain::reward_algorithm(chain.height() + 1).checked_add(fees))
            .ok_or_else(|| Error::InvalidBlock("block fees overflow".to_string()))?;

        let tip = chain.last_block();
        tracing::info!(
            height = tip.index() + 1,
            transactions = transactions.len(),
            "mining block"
        );
        let block = chain.generate_new_block(
            vec![(address, payout)],
            config.chain.protocol_version.clone(),
            unix_timestamp().max(tip.timestamp()),
            tip,
            chain.next_difficulty(),
            transactions,
        )?;

        chain.add_block(block.clone())?;
        store.append_block(&block)?;
        store.save_pool(chain.pool())?;
        Ok(block)
    })?;

    println!("{}", formatter.format_block(&block));
    Ok(block)
}
