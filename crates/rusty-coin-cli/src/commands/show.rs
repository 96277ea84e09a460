// Rust guideline compliant 2026-10-19

//! Implementation of the `rscn show` command.

use crate::OutputFormatter;
use anyhow::Result;
use rusty_coin_core::{Block, DataDir};

/// Shows the block at `index`.
///
/// # Errors
///
/// Returns an error if the chain cannot be loaded or has no such block.
pub fn execute(data_dir: &DataDir, index: usize, formatter: &dyn OutputFormatter) -> Result<Block> {
    let blocks = data_dir.store().load_blocks()?;
    let Some(block) = blocks.into_iter().find(|block| block.index() == index) else {
        anyhow::bail!("Block {} not found. Run 'rscn chain' to list blocks.", index);
    };

    println!("{}", formatter.format_block(&block));
    Ok(block)
}
