// Rust guideline compliant 2026-10-19

//! Integration tests for mining, spending and validation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rusty_coin_core::difficulty::{target_from_compact, MAX_TARGET_BITS};
use rusty_coin_core::{
    select_by_fee, Block, Blockchain, ChainParams, Error, HashValue, Input, Output, Transaction,
    Wallet,
};
use secp256k1::{rand, PublicKey, Secp256k1, SecretKey};

const GENESIS_TIME: u64 = 1_700_000_000;

fn test_params() -> ChainParams {
    ChainParams {
        initial_difficulty: MAX_TARGET_BITS,
        retarget_interval: 0,
        coinbase_maturity: 1,
        confirmations: 1,
        ..ChainParams::default()
    }
}

fn new_chain(params: ChainParams) -> Blockchain {
    Blockchain::with_params("test genesis", GENESIS_TIME, params)
}

/// Mines the next block paying the full reward to `address` and appends it.
fn mine_to(chain: &mut Blockchain, address: HashValue) -> Block {
    let reward = Blockchain::reward_algorithm(chain.height() + 1);
    let timestamp = chain.last_block().timestamp() + 10;
    let block = chain
        .mine_block(vec![(address, reward)], timestamp, select_by_fee(100))
        .expect("Failed to mine block");
    chain.add_block(block.clone()).expect("Failed to add block");
    block
}

/// Mines a block on the tip with arbitrary contents, bypassing the checks in
/// `generate_new_block`.
fn forge_block(chain: &Blockchain, timestamp: u64, data: Vec<Transaction>) -> Block {
    let tip = chain.last_block();
    let mut block = Block::new(
        chain.params().protocol_version.clone(),
        tip.index() + 1,
        timestamp,
        tip.hash(),
        chain.next_difficulty(),
        data,
    );
    block.mine();
    block
}

fn coinbase(index: usize, address: HashValue, amount: Decimal, fee: Decimal) -> Transaction {
    let mut tx = Transaction::new(
        vec![],
        vec![Output::new(amount, address.to_vec())],
        HashValue::zero(),
        fee,
        Some((index as u64).to_be_bytes().to_vec()),
    );
    tx.update_digest();
    tx
}

fn assert_invalid_block(result: Result<(), Error>, reason: &str) {
    match result {
        Err(Error::InvalidBlock(message)) => assert!(
            message.contains(reason),
            "Expected '{}', got '{}'",
            reason,
            message
        ),
        other => panic!("Expected invalid block ({}), got {:?}", reason, other),
    }
}

#[test]
fn test_mined_block_is_accepted() {
    let mut chain = new_chain(test_params());
    let miner = Wallet::new();

    let block = mine_to(&mut chain, miner.address());

    assert_eq!(chain.height(), 1);
    assert_eq!(block.prev_hash(), chain.blocks()[0].hash());
    assert_eq!(block.hash(), block.pow_hash());
    assert!(block.hash() <= block.target_threshold());
    assert_eq!(chain.balance_of(&miner.address()), dec!(59));
}

#[test]
fn test_spend_after_maturity() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let bob = Wallet::new();
    let miner = Wallet::new();

    mine_to(&mut chain, alice.address());
    let tx = alice
        .pay(&chain, bob.address(), dec!(20), dec!(1))
        .expect("Failed to build payment");
    assert_eq!(tx.transaction_fee(), dec!(1));

    chain
        .submit_transaction(tx.clone())
        .expect("Failed to submit payment");
    assert_eq!(chain.pool().len(), 1);

    let block = mine_to(&mut chain, miner.address());
    assert_eq!(block.transactions().len(), 2);
    assert!(chain.pool().is_empty(), "Mined transaction leaves the pool");

    assert_eq!(chain.balance_of(&bob.address()), dec!(20));
    assert_eq!(chain.balance_of(&alice.address()), dec!(38));
    assert_eq!(chain.balance_of(&miner.address()), dec!(37));
    assert!(chain.find_transaction(tx.transaction_id()).is_some());
}

#[test]
fn test_wallet_sync_tracks_balance() {
    let mut chain = new_chain(test_params());
    let mut wallet = Wallet::new();

    mine_to(&mut chain, wallet.address());
    mine_to(&mut chain, wallet.address());
    wallet.sync_utxos(&chain);

    assert_eq!(wallet.utxos().len(), 2);
    assert_eq!(wallet.balance(), dec!(59) + dec!(37));
}

#[test]
fn test_immature_coinbase_is_not_spendable() {
    let params = ChainParams {
        coinbase_maturity: 3,
        ..test_params()
    };
    let mut chain = new_chain(params);
    let alice = Wallet::new();
    let bob = Wallet::new();

    mine_to(&mut chain, alice.address());

    let result = alice.pay(&chain, bob.address(), dec!(1), dec!(0));
    assert!(matches!(result, Err(Error::InsufficientFunds { .. })));

    let forced = alice
        .transfer_credits(
            chain.utxos_for(&alice.address()),
            vec![(dec!(1), bob.address())],
            None,
        )
        .expect("Failed to build transaction");
    assert!(chain.submit_transaction(forced).is_err());
}

#[test]
fn test_pool_rejects_conflicting_spend() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let bob = Wallet::new();
    let carol = Wallet::new();

    mine_to(&mut chain, alice.address());
    let utxos = chain.utxos_for(&alice.address());

    let first = alice
        .transfer_credits(utxos.clone(), vec![(dec!(10), bob.address())], None)
        .expect("Failed to build first spend");
    let second = alice
        .transfer_credits(utxos, vec![(dec!(10), carol.address())], None)
        .expect("Failed to build second spend");

    chain
        .submit_transaction(first.clone())
        .expect("Failed to submit first spend");
    assert!(chain.submit_transaction(second).is_err());
    assert!(
        chain.submit_transaction(first).is_err(),
        "Duplicate submission is rejected"
    );
}

#[test]
fn test_confirmed_output_cannot_be_spent_again() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let bob = Wallet::new();
    let miner = Wallet::new();

    mine_to(&mut chain, alice.address());
    let utxos = chain.utxos_for(&alice.address());

    let first = alice
        .transfer_credits(utxos.clone(), vec![(dec!(10), bob.address())], None)
        .expect("Failed to build first spend");
    chain
        .submit_transaction(first)
        .expect("Failed to submit first spend");
    mine_to(&mut chain, miner.address());

    let replay = alice
        .transfer_credits(utxos, vec![(dec!(5), bob.address())], None)
        .expect("Failed to build replay");
    assert!(!chain.verify_transaction(&replay));
    assert!(chain.is_spent(replay.inputs()[0].prev_tx_hash(), 0));
}

#[test]
fn test_redirected_output_breaks_signature() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let bob = Wallet::new();
    let mallory = Wallet::new();

    mine_to(&mut chain, alice.address());
    let tx = alice
        .pay(&chain, bob.address(), dec!(10), dec!(0))
        .expect("Failed to build payment");
    assert!(chain.verify_transaction(&tx));

    let mut value = serde_json::to_value(&tx).expect("Failed to serialize transaction");
    value["outputs"][0]["locking_script"] = serde_json::json!(mallory.address().to_string());
    let mut forged: Transaction =
        serde_json::from_value(value).expect("Failed to deserialize transaction");
    forged.update_digest();

    let result = chain.validate_transaction(&forged);
    assert!(matches!(result, Err(Error::InvalidTransaction(_))));
}

#[test]
fn test_tampered_transaction_id_is_rejected() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let bob = Wallet::new();

    mine_to(&mut chain, alice.address());
    let tx = alice
        .pay(&chain, bob.address(), dec!(10), dec!(0))
        .expect("Failed to build payment");

    let mut value = serde_json::to_value(&tx).expect("Failed to serialize transaction");
    value["transaction_fee"] = serde_json::json!("2");
    let tampered: Transaction =
        serde_json::from_value(value).expect("Failed to deserialize transaction");

    assert!(!chain.verify_transaction(&tampered));
}

#[test]
fn test_coinbase_overpay_is_rejected() {
    let chain = new_chain(test_params());
    let miner = Wallet::new();
    let too_much = Blockchain::reward_algorithm(1) + Decimal::ONE;

    let result = chain.mine_block(
        vec![(miner.address(), too_much)],
        GENESIS_TIME + 10,
        select_by_fee(10),
    );
    assert!(matches!(result, Err(Error::InvalidBlock(_))));
}

#[test]
fn test_miner_may_claim_fees() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let bob = Wallet::new();
    let miner = Wallet::new();

    mine_to(&mut chain, alice.address());
    let tx = alice
        .pay(&chain, bob.address(), dec!(10), dec!(3))
        .expect("Failed to build payment");
    chain
        .submit_transaction(tx.clone())
        .expect("Failed to submit payment");

    let payout = Blockchain::reward_algorithm(2) + dec!(3);
    let block = chain
        .generate_new_block(
            vec![(miner.address(), payout)],
            "0.1v".to_string(),
            GENESIS_TIME + 20,
            chain.last_block(),
            chain.next_difficulty(),
            vec![tx],
        )
        .expect("Failed to mine block");
    chain.add_block(block).expect("Failed to add block");

    assert_eq!(chain.balance_of(&miner.address()), dec!(40));
}

#[test]
fn test_tampered_nonce_is_rejected() {
    let chain = new_chain(test_params());
    let miner = Wallet::new();
    let block = chain
        .mine_block(
            vec![(miner.address(), dec!(1))],
            GENESIS_TIME + 10,
            select_by_fee(10),
        )
        .expect("Failed to mine block");
    assert!(chain.verify_block(&block));

    let mut value = serde_json::to_value(&block).expect("Failed to serialize block");
    value["nonce"] = serde_json::json!(block.nonce() + 1);
    let tampered: Block = serde_json::from_value(value).expect("Failed to deserialize block");

    assert!(!chain.verify_block(&tampered));
}

#[test]
fn test_block_must_extend_tip() {
    let mut chain = new_chain(test_params());
    let miner = Wallet::new();

    let genesis = chain.blocks()[0].clone();
    mine_to(&mut chain, miner.address());

    let stale = chain
        .generate_new_block(
            vec![(miner.address(), dec!(1))],
            "0.1v".to_string(),
            GENESIS_TIME + 30,
            &genesis,
            MAX_TARGET_BITS,
            vec![],
        )
        .expect("Failed to mine block");

    assert!(matches!(
        chain.add_block(stale),
        Err(Error::InvalidBlock(_))
    ));
    assert_eq!(chain.height(), 1);
}

#[test]
fn test_pool_selection_prefers_fees() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let bob = Wallet::new();
    let carol = Wallet::new();

    mine_to(&mut chain, alice.address());
    mine_to(&mut chain, bob.address());

    let cheap = alice
        .pay(&chain, carol.address(), dec!(5), dec!(1))
        .expect("Failed to build cheap payment");
    let generous = bob
        .pay(&chain, carol.address(), dec!(5), dec!(5))
        .expect("Failed to build generous payment");
    chain
        .submit_transaction(cheap)
        .expect("Failed to submit cheap payment");
    chain
        .submit_transaction(generous.clone())
        .expect("Failed to submit generous payment");

    let selected = chain.find_transactions_by_algo(select_by_fee(1));
    assert_eq!(selected, vec![generous]);
}

#[test]
fn test_from_blocks_rebuilds_chain() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let bob = Wallet::new();

    mine_to(&mut chain, alice.address());
    mine_to(&mut chain, alice.address());
    let tx = alice
        .pay(&chain, bob.address(), dec!(3), dec!(0))
        .expect("Failed to build payment");
    chain
        .submit_transaction(tx)
        .expect("Failed to submit payment");

    let rebuilt = Blockchain::from_blocks(
        chain.blocks().to_vec(),
        chain.pool().to_vec(),
        test_params(),
    )
    .expect("Failed to rebuild chain");

    assert_eq!(rebuilt.height(), chain.height());
    assert_eq!(rebuilt.last_block(), chain.last_block());
    assert_eq!(rebuilt.pool(), chain.pool());
}

#[test]
fn test_from_blocks_rejects_broken_link() {
    let mut chain = new_chain(test_params());
    let miner = Wallet::new();
    mine_to(&mut chain, miner.address());
    mine_to(&mut chain, miner.address());

    let mut blocks = chain.blocks().to_vec();
    blocks.remove(1);

    assert!(Blockchain::from_blocks(blocks, vec![], test_params()).is_err());
    assert!(Blockchain::from_blocks(vec![], vec![], test_params()).is_err());
}

#[test]
fn test_retarget_hardens_fast_chain() {
    let params = ChainParams {
        retarget_interval: 3,
        target_block_secs: 10,
        ..test_params()
    };
    let mut chain = new_chain(params);
    let miner = Wallet::new();

    for offset in 1..=2 {
        let block = chain
            .mine_block(
                vec![(miner.address(), dec!(1))],
                GENESIS_TIME + offset,
                select_by_fee(10),
            )
            .expect("Failed to mine block");
        chain.add_block(block).expect("Failed to add block");
    }

    let bits = chain.next_difficulty();
    assert!(target_from_compact(bits) < target_from_compact(MAX_TARGET_BITS));

    let block = chain
        .mine_block(
            vec![(miner.address(), dec!(1))],
            GENESIS_TIME + 3,
            select_by_fee(10),
        )
        .expect("Failed to mine block");
    assert_eq!(block.difficulty(), bits);
    chain.add_block(block).expect("Failed to add retargeted block");
}

#[test]
fn test_replayed_coinbase_is_rejected() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let first = mine_to(&mut chain, alice.address());

    let replayed = first.coinbase().expect("Block has a coinbase").clone();
    let block = forge_block(&chain, GENESIS_TIME + 20, vec![replayed]);

    assert_invalid_block(chain.add_block(block), "tagged with the block index");
    assert_eq!(chain.height(), 1);
    assert_eq!(chain.utxos_for(&alice.address()).len(), 1);
}

#[test]
fn test_double_spend_within_block_is_rejected() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    let miner = Wallet::new();
    mine_to(&mut chain, alice.address());

    let to_bob = alice
        .pay(&chain, Wallet::new().address(), dec!(10), dec!(0))
        .expect("Failed to build payment");
    let to_carol = alice
        .pay(&chain, Wallet::new().address(), dec!(12), dec!(0))
        .expect("Failed to build payment");
    assert_ne!(to_bob.transaction_id(), to_carol.transaction_id());

    let block = chain
        .generate_new_block(
            vec![(miner.address(), Blockchain::reward_algorithm(2))],
            "0.1v".to_string(),
            GENESIS_TIME + 20,
            chain.last_block(),
            chain.next_difficulty(),
            vec![to_bob, to_carol],
        )
        .expect("Failed to mine block");

    assert_invalid_block(chain.add_block(block), "spent twice");
}

#[test]
fn test_block_must_start_with_coinbase() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    mine_to(&mut chain, alice.address());
    let payment = alice
        .pay(&chain, Wallet::new().address(), dec!(10), dec!(0))
        .expect("Failed to build payment");

    let block = forge_block(&chain, GENESIS_TIME + 20, vec![payment]);

    assert_invalid_block(chain.add_block(block), "first transaction is not a coinbase");
}

#[test]
fn test_second_coinbase_is_rejected() {
    let chain = new_chain(test_params());
    let miner = Wallet::new();

    let block = forge_block(
        &chain,
        GENESIS_TIME + 10,
        vec![
            coinbase(1, miner.address(), dec!(1), Decimal::ZERO),
            coinbase(1, Wallet::new().address(), dec!(2), Decimal::ZERO),
        ],
    );

    assert_invalid_block(
        chain.validate_block(&block),
        "coinbase transaction after the first position",
    );
}

#[test]
fn test_coinbase_fee_is_rejected() {
    let chain = new_chain(test_params());
    let miner = Wallet::new();

    let block = forge_block(
        &chain,
        GENESIS_TIME + 10,
        vec![coinbase(1, miner.address(), dec!(1), dec!(1))],
    );

    assert_invalid_block(chain.validate_block(&block), "coinbase carries a fee");
}

#[test]
fn test_wrong_difficulty_is_rejected() {
    let chain = new_chain(test_params());
    let miner = Wallet::new();

    let block = chain
        .generate_new_block(
            vec![(miner.address(), dec!(1))],
            "0.1v".to_string(),
            GENESIS_TIME + 10,
            chain.last_block(),
            MAX_TARGET_BITS - 1,
            vec![],
        )
        .expect("Failed to mine block");

    assert_invalid_block(chain.validate_block(&block), "difficulty");
}

#[test]
fn test_timestamp_before_tip_is_rejected() {
    let mut chain = new_chain(test_params());
    let miner = Wallet::new();
    mine_to(&mut chain, miner.address());

    let block = chain
        .generate_new_block(
            vec![(miner.address(), dec!(1))],
            "0.1v".to_string(),
            chain.last_block().timestamp() - 1,
            chain.last_block(),
            chain.next_difficulty(),
            vec![],
        )
        .expect("Failed to mine block");

    assert_invalid_block(chain.validate_block(&block), "earlier than tip timestamp");
}

#[test]
fn test_overflowing_outputs_are_rejected() {
    let secp = Secp256k1::new();
    let secret_key = SecretKey::new(&mut rand::thread_rng());
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);
    let alice = Wallet::from_secret_key(secret_key);

    let mut chain = new_chain(test_params());
    mine_to(&mut chain, alice.address());
    let utxo = chain
        .spendable_utxos_for(&alice.address())
        .pop()
        .expect("Alice has a spendable output");

    let mut tx = Transaction::new(
        vec![Input::new(
            utxo.prev_tx_hash,
            utxo.prev_block_index,
            utxo.prev_output_index,
            Vec::new(),
        )],
        vec![
            Output::new(Decimal::MAX, alice.address().to_vec()),
            Output::new(Decimal::MAX, alice.address().to_vec()),
        ],
        HashValue::zero(),
        Decimal::ZERO,
        None,
    );
    tx.sign_inputs(&secret_key, &public_key);
    assert_eq!(tx.output_total(), None);

    assert!(matches!(
        chain.submit_transaction(tx),
        Err(Error::InvalidTransaction(message)) if message.contains("overflows")
    ));
    assert!(chain.pool().is_empty());
}

#[test]
fn test_overflowing_payment_is_an_error() {
    let mut chain = new_chain(test_params());
    let alice = Wallet::new();
    mine_to(&mut chain, alice.address());

    let result = alice.pay(&chain, Wallet::new().address(), Decimal::MAX, dec!(1));

    assert!(matches!(result, Err(Error::InvalidTransaction(_))));
}
