// Rust guideline compliant 2026-10-19

//! Integration tests for CLI commands.

use rust_decimal_macros::dec;
use rusty_coin_cli::commands;
use rusty_coin_cli::{create_formatter, OutputFormatter};
use rusty_coin_core::difficulty::MAX_TARGET_BITS;
use rusty_coin_core::{Blockchain, Config, DataDir, Wallet};
use std::fs;
use tempfile::TempDir;

/// Initializes a data directory whose chain mines instantly and matures after
/// one block.
fn setup() -> (TempDir, DataDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let data_dir = DataDir::init(temp_dir.path()).expect("Failed to create .rscn");

    let mut config = Config::default();
    config.chain.initial_difficulty = MAX_TARGET_BITS;
    config.chain.coinbase_maturity = 1;
    config.chain.confirmations = 1;
    config
        .save(data_dir.rscn_dir())
        .expect("Failed to save config");

    let data_dir =
        commands::init::execute(temp_dir.path(), Some("tests".to_string())).expect("Failed to init");
    (temp_dir, data_dir)
}

fn formatter() -> Box<dyn OutputFormatter> {
    create_formatter("plain", false)
}

#[test]
fn test_init_creates_data_dir() {
    let (_temp_dir, data_dir) = setup();

    assert!(data_dir.chain_path().exists(), "chain.jsonl should exist");
    assert!(data_dir.config_path().exists(), "config.toml should exist");
    assert!(data_dir.wallet_path().exists(), "wallet.rscnkey should exist");

    let blocks = data_dir.store().load_blocks().expect("Failed to load blocks");
    assert_eq!(blocks.len(), 1, "Only the genesis block is stored");

    let config = data_dir.load_config().expect("Failed to load config");
    assert_eq!(
        config.chain.initial_difficulty, MAX_TARGET_BITS,
        "Existing config is kept"
    );
}

#[test]
fn test_init_twice_keeps_chain_and_wallet() {
    let (temp_dir, data_dir) = setup();
    let wallet = data_dir.load_wallet().expect("Failed to load wallet");
    commands::mine::execute(&data_dir, None, 10, formatter().as_ref()).expect("Failed to mine");

    let again = commands::init::execute(temp_dir.path(), None).expect("Failed to re-init");

    assert_eq!(
        again.load_wallet().expect("Failed to load wallet").address(),
        wallet.address()
    );
    assert_eq!(
        again.store().load_blocks().expect("Failed to load blocks").len(),
        2
    );
}

#[test]
fn test_mine_send_mine_flow() {
    let (_temp_dir, data_dir) = setup();
    let wallet = data_dir.load_wallet().expect("Failed to load wallet");
    let receiver = Wallet::new();
    let fmt = formatter();

    let block = commands::mine::execute(&data_dir, None, 10, fmt.as_ref()).expect("Failed to mine");
    assert_eq!(block.index(), 1);
    let reward_1 = Blockchain::reward_algorithm(1);

    let report = commands::wallet::balance(&data_dir, None, fmt.as_ref())
        .expect("Failed to read balance");
    assert_eq!(report.address, wallet.address());
    assert_eq!(report.balance, reward_1);
    assert_eq!(report.spendable, reward_1);

    let tx = commands::send::execute(
        &data_dir,
        receiver.address(),
        dec!(10),
        dec!(1),
        fmt.as_ref(),
    )
    .expect("Failed to send");
    assert_eq!(tx.transaction_fee(), dec!(1));
    let pool = data_dir.store().load_pool().expect("Failed to load pool");
    assert_eq!(pool, vec![tx.clone()]);

    let block = commands::mine::execute(&data_dir, None, 10, fmt.as_ref()).expect("Failed to mine");
    assert_eq!(block.index(), 2);
    assert!(block.tx_by_id(tx.transaction_id()).is_some(), "Payment is mined");
    assert_eq!(
        block.coinbase().expect("Block has a coinbase").output_total(),
        Some(Blockchain::reward_algorithm(2) + dec!(1)),
        "Miner collects the fee"
    );
    assert!(data_dir.store().load_pool().expect("Failed to load pool").is_empty());

    let paid = commands::wallet::balance(&data_dir, Some(receiver.address()), fmt.as_ref())
        .expect("Failed to read balance");
    assert_eq!(paid.balance, dec!(10));

    let report = commands::wallet::balance(&data_dir, None, fmt.as_ref())
        .expect("Failed to read balance");
    assert_eq!(
        report.balance,
        reward_1 - dec!(11) + Blockchain::reward_algorithm(2) + dec!(1)
    );

    assert_eq!(
        commands::verify::execute(&data_dir, false).expect("Chain should verify"),
        2
    );
}

#[test]
fn test_send_without_funds_fails() {
    let (_temp_dir, data_dir) = setup();
    let receiver = Wallet::new();

    let result = commands::send::execute(
        &data_dir,
        receiver.address(),
        dec!(5),
        dec!(0),
        formatter().as_ref(),
    );

    let message = format!("{:#}", result.expect_err("Send should fail"));
    assert!(message.contains("Insufficient"), "Got: {}", message);
    assert!(data_dir.store().load_pool().expect("Failed to load pool").is_empty());
}

#[test]
fn test_mine_to_explicit_address() {
    let (_temp_dir, data_dir) = setup();
    let miner = Wallet::new();

    commands::mine::execute(&data_dir, Some(miner.address()), 10, formatter().as_ref())
        .expect("Failed to mine");

    let report = commands::wallet::balance(&data_dir, Some(miner.address()), formatter().as_ref())
        .expect("Failed to read balance");
    assert_eq!(report.balance, Blockchain::reward_algorithm(1));

    let local = commands::wallet::balance(&data_dir, None, formatter().as_ref())
        .expect("Failed to read balance");
    assert_eq!(local.balance, dec!(0));
}

#[test]
fn test_show_and_chain() {
    let (_temp_dir, data_dir) = setup();
    let fmt = formatter();
    let mined = commands::mine::execute(&data_dir, None, 10, fmt.as_ref()).expect("Failed to mine");

    let shown = commands::show::execute(&data_dir, 1, fmt.as_ref()).expect("Failed to show");
    assert_eq!(shown, mined);
    assert!(commands::show::execute(&data_dir, 9, fmt.as_ref()).is_err());

    let all = commands::chain::execute(&data_dir, None, fmt.as_ref()).expect("Failed to list");
    assert_eq!(all.len(), 2);
    let newest = commands::chain::execute(&data_dir, Some(1), fmt.as_ref()).expect("Failed to list");
    assert_eq!(newest, vec![mined]);
}

#[test]
fn test_status_reports_tip_and_wallet() {
    let (_temp_dir, data_dir) = setup();
    let fmt = formatter();
    let mined = commands::mine::execute(&data_dir, None, 10, fmt.as_ref()).expect("Failed to mine");

    let status = commands::status::execute(&data_dir, fmt.as_ref()).expect("Failed to get status");
    assert_eq!(status.height, 1);
    assert_eq!(status.tip_hash, mined.hash());
    assert_eq!(status.next_difficulty, MAX_TARGET_BITS);
    assert_eq!(status.pending_transactions, 0);
    assert_eq!(
        status.wallet.expect("Wallet should be reported").balance,
        Blockchain::reward_algorithm(1)
    );

    fs::remove_file(data_dir.wallet_path()).expect("Failed to remove wallet");
    let status = commands::status::execute(&data_dir, fmt.as_ref()).expect("Failed to get status");
    assert!(status.wallet.is_none());
}

#[test]
fn test_verify_rejects_tampered_chain() {
    let (_temp_dir, data_dir) = setup();
    commands::mine::execute(&data_dir, None, 10, formatter().as_ref()).expect("Failed to mine");

    let content = fs::read_to_string(data_dir.chain_path()).expect("Failed to read chain");
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    let mut block: serde_json::Value =
        serde_json::from_str(&lines[1]).expect("Failed to parse block");
    block["nonce"] = serde_json::json!(block["nonce"].as_i64().unwrap_or(0) + 1);
    lines[1] = block.to_string();
    fs::write(data_dir.chain_path(), lines.join("\n") + "\n").expect("Failed to write chain");

    let err = commands::verify::execute(&data_dir, false).expect_err("Tampered chain must fail");
    assert!(err.to_string().contains("Chain verification failed"));
}

#[test]
fn test_wallet_new_requires_force() {
    let (_temp_dir, data_dir) = setup();
    let original = commands::wallet::address(&data_dir).expect("Failed to read address");

    let err = commands::wallet::create(&data_dir, false).expect_err("Existing wallet is kept");
    assert!(err.to_string().contains("--force"));

    let replaced = commands::wallet::create(&data_dir, true).expect("Failed to replace wallet");
    assert_ne!(replaced.address(), original);
    assert_eq!(
        commands::wallet::address(&data_dir).expect("Failed to read address"),
        replaced.address()
    );
}

#[test]
fn test_commands_require_init() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    assert!(DataDir::discover(Some(temp_dir.path())).is_err());
}
