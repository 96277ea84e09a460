// Rust guideline compliant 2026-10-19

//! Implementation of the `rscn send` command.

use crate::OutputFormatter;
use anyhow::Result;
use rust_decimal::Decimal;
use rusty_coin_core::{DataDir, HashValue, Transaction};

/// Pays `amount` to `to` from the local wallet and queues the transaction.
///
/// The transaction waits in `mempool.jsonl` until a block is mined.
///
/// # Arguments
///
/// * `data_dir` - Data directory holding the chain and wallet
/// * `to` - Receiving address
/// * `amount` - Amount to pay
/// * `fee` - Fee left for the miner
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if:
/// - The wallet or chain cannot be loaded
/// - The spendable balance does not cover `amount + fee`
/// - The transaction is rejected by the pool
pub fn execute(
    data_dir: &DataDir,
    to: HashValue,
    amount: Decimal,
    fee: Decimal,
    formatter: &dyn OutputFormatter,
) -> Result<Transaction> {
    let config = data_dir.load_config()?;
    let wallet = data_dir.load_wallet()?;
    let store = data_dir.store();

    let tx = store.with_lock(|| {
        let mut chain = store.load_chain(config.chain.clone())?;
        let tx = wallet.pay(&chain, to, amount, fee)?;
        chain.submit_transaction(tx.clone())?;
        store.save_pool(chain.pool())?;
        Ok(tx)
    })?;

    tracing::info!(tx = %tx.transaction_id(), to = %to, amount = %amount, "queued payment");
    println!("{}", formatter.format_transaction(&tx));
    Ok(tx)
}
