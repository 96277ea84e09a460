// Rust guideline compliant 2026-10-19

//! Output formatting for the Rusty Coin CLI.
//!
//! Blocks, chain summaries, wallet and node status render as JSON, tables or
//! plain text.

use rust_decimal::Decimal;
use rusty_coin_core::{Block, HashValue, Transaction};
use serde::Serialize;
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

/// Wallet figures reported by `rscn wallet balance` and `rscn status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletReport {
    pub address: HashValue,
    /// Every confirmed unspent output.
    pub balance: Decimal,
    /// The part of `balance` the next block may spend.
    pub spendable: Decimal,
}

/// Summary reported by `rscn status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub data_dir: String,
    pub height: usize,
    pub tip_hash: HashValue,
    pub tip_timestamp: u64,
    pub next_difficulty: u32,
    pub next_reward: Decimal,
    pub pending_transactions: usize,
    pub wallet: Option<WalletReport>,
}

/// Output formatter trait.
pub trait OutputFormatter {
    /// Formats one block with its transactions.
    fn format_block(&self, block: &Block) -> String;

    /// Formats a list of blocks, one summary line each.
    fn format_chain(&self, blocks: &[Block]) -> String;

    /// Formats a transaction.
    fn format_transaction(&self, tx: &Transaction) -> String;

    fn format_wallet(&self, wallet: &WalletReport) -> String;

    fn format_status(&self, status: &StatusReport) -> String;

    /// Formats an error message for display.
    fn format_error(&self, error: &str) -> String;
}

/// JSON output formatter.
///
/// Formats values as JSON for machine consumption.
pub struct JsonFormatter;

impl JsonFormatter {
    fn pretty<T: Serialize>(value: &T, what: &str) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| {
            json!({ "error": format!("Failed to serialize {}", what) }).to_string()
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_block(&self, block: &Block) -> String {
        Self::pretty(block, "block")
    }

    fn format_chain(&self, blocks: &[Block]) -> String {
        let summaries = blocks
            .iter()
            .map(|block| {
                json!({
                    "index": block.index(),
                    "hash": block.hash(),
                    "timestamp": block.timestamp(),
                    "difficulty": block.difficulty(),
                    "transactions": block.transactions().len(),
                })
            })
            .collect::<Vec<_>>();
        Self::pretty(
            &json!({ "blocks": summaries, "total": blocks.len() }),
            "chain",
        )
    }

    fn format_transaction(&self, tx: &Transaction) -> String {
        Self::pretty(tx, "transaction")
    }

    fn format_wallet(&self, wallet: &WalletReport) -> String {
        Self::pretty(wallet, "wallet")
    }

    fn format_status(&self, status: &StatusReport) -> String {
        Self::pretty(status, "status")
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }
}

/// Table output formatter.
///
/// Formats values as human-readable tables.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_block(&self, block: &Block) -> String {
        let mut output = String::new();

        output.push_str(&format!("Index:       {}\n", block.index()));
        output.push_str(&format!("Hash:        {}\n", block.hash()));
        output.push_str(&format!("Prev hash:   {}\n", block.prev_hash()));
        output.push_str(&format!("Merkle root: {}\n", block.merkle_root()));
        output.push_str(&format!("Time:        {}\n", format_time(block.timestamp())));
        output.push_str(&format!("Difficulty:  {:#010x}\n", block.difficulty()));
        output.push_str(&format!("Nonce:       {}\n", block.nonce()));
        output.push_str(&format!("Version:     {}\n", block.version()));

        let mut builder = Builder::default();
        builder.push_record(vec!["Transaction", "Inputs", "Outputs", "Total", "Fee"]);
        for tx in block.transactions() {
            builder.push_record(vec![
                tx.transaction_id().to_string(),
                tx.inputs().len().to_string(),
                tx.outputs().len().to_string(),
                tx.output_total()
                    .map_or_else(|| "overflow".to_string(), |total| total.to_string()),
                tx.transaction_fee().to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());

        output.push_str(&table.to_string());
        output
    }

    fn format_chain(&self, blocks: &[Block]) -> String {
        if blocks.is_empty() {
            return "No blocks found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["Index", "Hash", "Time", "Difficulty", "Txs"]);
        for block in blocks {
            builder.push_record(vec![
                block.index().to_string(),
                block.hash().to_string(),
                format_time(block.timestamp()),
                format!("{:#010x}", block.difficulty()),
                block.transactions().len().to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_transaction(&self, tx: &Transaction) -> String {
        let mut output = String::new();
        output.push_str(&format!("Transaction: {}\n", tx.transaction_id()));
        output.push_str(&format!("Fee:         {}\n", tx.transaction_fee()));

        let mut builder = Builder::default();
        builder.push_record(vec!["Output", "Address", "Amount"]);
        for (position, out) in tx.outputs().iter().enumerate() {
            builder.push_record(vec![
                position.to_string(),
                format!("0x{}", hex::encode(out.locking_script())),
                out.amount().to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());

        output.push_str(&table.to_string());
        output
    }

    fn format_wallet(&self, wallet: &WalletReport) -> String {
        let mut output = String::new();
        output.push_str(&format!("Address:   {}\n", wallet.address));
        output.push_str(&format!("Balance:   {}\n", wallet.balance));
        output.push_str(&format!("Spendable: {}\n", wallet.spendable));
        output
    }

    fn format_status(&self, status: &StatusReport) -> String {
        let mut output = String::new();
        output.push_str("Rusty Coin Status\n");
        output.push_str("-----------------\n");
        output.push_str(&format!("Data dir:        {}\n", status.data_dir));
        output.push_str(&format!("Height:          {}\n", status.height));
        output.push_str(&format!("Tip:             {}\n", status.tip_hash));
        output.push_str(&format!(
            "Tip time:        {}\n",
            format_time(status.tip_timestamp)
        ));
        output.push_str(&format!(
            "Next difficulty: {:#010x}\n",
            status.next_difficulty
        ));
        output.push_str(&format!("Next reward:     {}\n", status.next_reward));
        output.push_str(&format!(
            "Pending txs:     {}\n",
            status.pending_transactions
        ));
        match &status.wallet {
            Some(wallet) => {
                output.push('\n');
                output.push_str(&self.format_wallet(wallet));
            }
            None => output.push_str("Wallet:          none\n"),
        }
        output
    }

    fn format_error(&self, error: &str) -> String {
        if self.use_color {
            format!("\x1b[1;31mError:\x1b[0m {}", error)
        } else {
            format!("Error: {}", error)
        }
    }
}

/// Plain text output formatter.
///
/// One value per line, no colors or tables.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_block(&self, block: &Block) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", block.index()));
        output.push_str(&format!("{}\n", block.hash()));
        output.push_str(&format!("{}\n", block.prev_hash()));
        output.push_str(&format!("{}\n", block.timestamp()));
        for tx in block.transactions() {
            output.push_str(&format!("{}\n", tx.transaction_id()));
        }
        output
    }

    fn format_chain(&self, blocks: &[Block]) -> String {
        if blocks.is_empty() {
            return "No blocks found.".to_string();
        }

        let mut output = String::new();
        for block in blocks {
            output.push_str(&format!(
                "{} {} {}\n",
                block.index(),
                block.hash(),
                block.transactions().len()
            ));
        }
        output
    }

    fn format_transaction(&self, tx: &Transaction) -> String {
        format!("{}\n", tx.transaction_id())
    }

    fn format_wallet(&self, wallet: &WalletReport) -> String {
        format!(
            "{}\n{}\n{}\n",
            wallet.address, wallet.balance, wallet.spendable
        )
    }

    fn format_status(&self, status: &StatusReport) -> String {
        format!(
            "{} {} {}\n",
            status.height, status.tip_hash, status.pending_transactions
        )
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format ("json", "table", or "plain")
/// * `use_color` - Whether to use colored output (ignored for JSON)
pub fn create_formatter(format: &str, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        "json" => Box::new(JsonFormatter),
        "plain" => Box::new(PlainFormatter),
        _ => Box::new(TableFormatter::new(use_color)),
    }
}

fn format_time(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
