// Rust guideline compliant 2026-10-19

//! Implementation of the `rscn chain` command.

use crate::OutputFormatter;
use anyhow::Result;
use rusty_coin_core::{Block, DataDir};

/// Lists stored blocks, oldest first.
///
/// With `limit`, only the newest `limit` blocks are listed. Blocks are read
/// as stored; `rscn verify` checks them.
///
/// # Errors
///
/// Returns an error if the chain file cannot be read.
pub fn execute(
    data_dir: &DataDir,
    limit: Option<usize>,
    formatter: &dyn OutputFormatter,
) -> Result<Vec<Block>> {
    let mut blocks = data_dir.store().load_blocks()?;
    if let Some(limit) = limit {
        let skip = blocks.len().saturating_sub(limit);
        blocks.drain(..skip);
    }

    println!("{}", formatter.format_chain(&blocks));
    Ok(blocks)
}
