// Rust guideline compliant 2026-10-19

//! Implementation of the `rscn node` command.

use anyhow::Result;
use rusty_coin_node::NodeOptions;
use std::path::PathBuf;

/// Serves the local chain over HTTP until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the chain cannot be loaded or the address cannot be
/// bound.
pub fn execute(
    data_dir: Option<PathBuf>,
    listen: Option<String>,
    root: Option<String>,
) -> Result<()> {
    rusty_coin_node::run(NodeOptions {
        data_dir,
        listen_addr: listen,
        root_addr: root,
    })?;
    Ok(())
}
