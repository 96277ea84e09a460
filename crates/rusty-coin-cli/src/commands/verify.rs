// Rust guideline compliant 2026-10-19

//! Implementation of the `rscn verify` command.
//!
//! Replays every stored block through the consensus rules.

use crate::terminal::{print_success, print_warning};
use anyhow::Result;
use rusty_coin_core::DataDir;

/// Validates the stored chain and pool.
///
/// # Returns
///
/// The height of the verified chain.
///
/// # Errors
///
/// Returns an error naming the first rule a stored block breaks.
pub fn execute(data_dir: &DataDir, use_color: bool) -> Result<usize> {
    let config = data_dir.load_config()?;
    let store = data_dir.store();

    let chain = store
        .load_chain(config.chain)
        .map_err(|e| anyhow::anyhow!("Chain verification failed: {}", e))?;

    let stored_pool = store.load_pool()?.len();
    let dropped = stored_pool.saturating_sub(chain.pool().len());
    if dropped > 0 {
        print_warning(
            &format!("{} pending transaction(s) no longer validate", dropped),
            use_color,
        );
    }

    print_success(
        &format!(
            "Chain valid: {} blocks, tip {}, {} pending transaction(s)",
            chain.blocks().len(),
            chain.last_block().hash(),
            chain.pool().len()
        ),
        use_color,
    );
    Ok(chain.height())
}
