// Rust guideline compliant 2026-10-19

//! Implementation of the `rscn wallet` subcommands.

use crate::{OutputFormatter, WalletReport};
use anyhow::Result;
use rust_decimal::Decimal;
use rusty_coin_core::{Blockchain, DataDir, HashValue, Output, Wallet, UTXO};

/// Creates the local wallet.
///
/// # Errors
///
/// Returns an error if a wallet exists and `force` is not set, or the key
/// file cannot be written.
pub fn create(data_dir: &DataDir, force: bool) -> Result<Wallet> {
    let path = data_dir.wallet_path();
    if path.exists() && !force {
        anyhow::bail!(
            "Wallet already exists at {}. Use --force to replace it.",
            path.display()
        );
    }

    let wallet = Wallet::new();
    wallet.save_private_key_to_file(&path)?;
    println!("✓ Created wallet {}", wallet.address());
    Ok(wallet)
}

/// Prints the local wallet's address.
///
/// # Errors
///
/// Returns an error if no wallet exists.
pub fn address(data_dir: &DataDir) -> Result<HashValue> {
    let wallet = data_dir.load_wallet()?;
    println!("{}", wallet.address());
    Ok(wallet.address())
}

/// Prints the balance of the local wallet, or of `of` when given.
///
/// # Errors
///
/// Returns an error if the chain cannot be loaded or, without `of`, no wallet
/// exists.
pub fn balance(
    data_dir: &DataDir,
    of: Option<HashValue>,
    formatter: &dyn OutputFormatter,
) -> Result<WalletReport> {
    let address = match of {
        Some(address) => address,
        None => data_dir.load_wallet()?.address(),
    };
    let config = data_dir.load_config()?;
    let chain = data_dir.store().load_chain(config.chain)?;

    let report = report_for(&chain, address);
    println!("{}", formatter.format_wallet(&report));
    Ok(report)
}

/// Confirmed and spendable balance of `address`.
pub(crate) fn report_for(chain: &Blockchain, address: HashValue) -> WalletReport {
    let spendable: Decimal = chain
        .spendable_utxos_for(&address)
        .iter()
        .filter_map(UTXO::output)
        .map(Output::amount)
        .sum();

    WalletReport {
        address,
        balance: chain.balance_of(&address),
        spendable,
    }
}
