// Rust guideline compliant 2026-10-19

//! The chain, its pending transaction pool, and the consensus rules.
//!
//! Mining rules:
//! - 10 seconds per block, difficulty retargeted every hour (360 blocks)
//! - the first transaction of every block is the coinbase, and only the first
//! - coinbase outputs need 144 confirmations (one day) before they are spent
//! - other outputs need 6 confirmations (one minute) before they are spent
//!
//! The block reward is `floor(18 / log10(height + 1))`, a slowly decaying
//! schedule that starts at 59, reaches 1 around height 10^17 and 0 past 10^18.

use crate::difficulty;
use crate::{checked_total, Block, Error, HashValue, Output, Result, Transaction, UTXO};
use rayon::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Version string stamped into the genesis block.
pub const GENESIS_VERSION: &str = "0.1v test";

/// An output reference: transaction hash and output position.
type OutPoint = (HashValue, usize);

/// Consensus parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Version string stamped into mined blocks.
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,

    /// Compact difficulty of block 1 and every block until the first retarget.
    #[serde(default = "default_initial_difficulty")]
    pub initial_difficulty: u32,

    /// Intended seconds between blocks.
    #[serde(default = "default_target_block_secs")]
    pub target_block_secs: u64,

    /// Blocks between difficulty adjustments. Zero disables retargeting.
    #[serde(default = "default_retarget_interval")]
    pub retarget_interval: usize,

    /// Confirmations a coinbase output needs before it can be spent.
    #[serde(default = "default_coinbase_maturity")]
    pub coinbase_maturity: usize,

    /// Confirmations any other output needs before it can be spent.
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,
}

fn default_protocol_version() -> String {
    "0.1v".to_string()
}

fn default_initial_difficulty() -> u32 {
    0x1f00ffff
}

fn default_target_block_secs() -> u64 {
    10
}

fn default_retarget_interval() -> usize {
    360
}

fn default_coinbase_maturity() -> usize {
    6 * 24
}

fn default_confirmations() -> usize {
    6
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            protocol_version: default_protocol_version(),
            initial_difficulty: default_initial_difficulty(),
            target_block_secs: default_target_block_secs(),
            retarget_interval: default_retarget_interval(),
            coinbase_maturity: default_coinbase_maturity(),
            confirmations: default_confirmations(),
        }
    }
}

/// Highest-fee-first selection of at most `limit` pool transactions.
///
/// Ties keep submission order.
pub fn select_by_fee(limit: usize) -> impl FnOnce(&[Transaction]) -> Vec<Transaction> {
    move |pool| {
        let mut selected = pool.to_vec();
        selected.sort_by(|a, b| b.transaction_fee().cmp(&a.transaction_fee()));
        selected.truncate(limit);
        selected
    }
}

/// The block chain plus unconfirmed transactions.
///
/// Always holds at least the genesis block.
#[derive(Debug, Clone, Serialize)]
pub struct Blockchain {
    blocks: Vec<Block>,
    tx_pool: Vec<Transaction>,
    params: ChainParams,
}

impl Blockchain {
    /// Creates a chain whose genesis block carries `genesis_msg`, stamped now.
    pub fn new(genesis_msg: &str) -> Self {
        Self::with_params(genesis_msg, crate::unix_timestamp(), ChainParams::default())
    }

    /// Creates a chain with an explicit genesis time and parameters.
    pub fn with_params(genesis_msg: &str, timestamp: u64, params: ChainParams) -> Self {
        Self {
            blocks: vec![Self::create_genesis_block(genesis_msg, timestamp)],
            tx_pool: Vec::new(),
            params,
        }
    }

    /// Rebuilds a chain from persisted blocks and pending transactions.
    ///
    /// Every block after genesis is validated as if it had just arrived.
    /// Pending transactions that no longer validate are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no well-formed genesis block or any later
    /// block fails validation.
    pub fn from_blocks(
        blocks: Vec<Block>,
        pool: Vec<Transaction>,
        params: ChainParams,
    ) -> Result<Self> {
        let mut blocks = blocks.into_iter();
        let genesis = blocks
            .next()
            .ok_or_else(|| Error::InvalidBlock("chain has no genesis block".to_string()))?;

        if genesis.index != 0
            || genesis.merkle_root != genesis.calc_merkle_root()
            || genesis.hash != genesis.sha256()
        {
            return Err(Error::InvalidBlock(
                "genesis block is malformed".to_string(),
            ));
        }

        let mut chain = Self {
            blocks: vec![genesis],
            tx_pool: Vec::new(),
            params,
        };

        for block in blocks {
            chain.add_block(block)?;
        }

        for tx in pool {
            let id = tx.transaction_id();
            if let Err(e) = chain.submit_transaction(tx) {
                tracing::warn!(tx = %id, error = %e, "dropping stale pending transaction");
            }
        }

        Ok(chain)
    }

    fn create_genesis_block(init_msg: &str, timestamp: u64) -> Block {
        let mut genesis_transaction = Transaction::new(
            vec![],
            vec![],
            HashValue::zero(),
            Decimal::ZERO,
            Some(init_msg.as_bytes().to_vec()),
        );
        genesis_transaction.update_digest();

        let mut genesis_block = Block::new(
            GENESIS_VERSION.to_string(),
            0,
            timestamp,
            HashValue::zero(),
            0,
            vec![genesis_transaction],
        );
        // Genesis is not mined.
        genesis_block.hash = genesis_block.sha256();
        genesis_block
    }

    /// Block reward at `index`: `floor(18 / log10(index + 1))`.
    ///
    /// Zero for genesis, which has no coinbase.
    pub fn reward_algorithm(index: usize) -> Decimal {
        if index == 0 {
            return Decimal::ZERO;
        }
        let inverse_log = 18.0 / (index as f64 + 1.0).log10();
        Decimal::from_f64(inverse_log.floor()).unwrap_or(Decimal::ZERO)
    }

    /// Difficulty required of the block that extends the tip.
    pub fn next_difficulty(&self) -> u32 {
        let tip = self.tip();
        if tip.index == 0 {
            return self.params.initial_difficulty;
        }

        let next_index = tip.index + 1;
        let interval = self.params.retarget_interval;
        if interval == 0 || next_index % interval != 0 {
            return tip.difficulty;
        }

        let first = &self.blocks[next_index - interval];
        let actual = tip.timestamp.saturating_sub(first.timestamp);
        let expected = (interval as u64 - 1) * self.params.target_block_secs;
        let bits = difficulty::retarget(tip.difficulty, actual, expected);

        tracing::info!(
            height = next_index,
            actual_secs = actual,
            expected_secs = expected,
            bits = format_args!("{:#010x}", bits),
            "retargeted difficulty"
        );
        bits
    }
}

impl Blockchain {
    /// Applies a selection algorithm to the pending pool.
    ///
    /// The algorithm may, for example, order transactions by fee; see
    /// [`select_by_fee`].
    pub fn find_transactions_by_algo<F>(&self, algorithm: F) -> Vec<Transaction>
    where
        F: FnOnce(&[Transaction]) -> Vec<Transaction>,
    {
        algorithm(&self.tx_pool)
    }

    /// Builds and mines a block on top of `prev_block`.
    ///
    /// This runs proof of work and may take a while.
    ///
    /// # Arguments
    ///
    /// * `receivers` - Coinbase payouts as `(address, amount)`
    /// * `protocol_version` - Version string for the block
    /// * `timestamp` - Block time in seconds
    /// * `prev_block` - Block being extended
    /// * `difficulty` - Compact difficulty to mine at
    /// * `transactions` - Transactions to include after the coinbase
    ///
    /// # Errors
    ///
    /// Returns an error if a payout is negative or the payouts exceed the
    /// block reward plus the included fees.
    pub fn generate_new_block(
        &self,
        receivers: Vec<(HashValue, Decimal)>,
        protocol_version: String,
        timestamp: u64,
        prev_block: &Block,
        difficulty: u32,
        transactions: Vec<Transaction>,
    ) -> Result<Block> {
        let index = prev_block.index + 1;

        let mut payout = Decimal::ZERO;
        for (address, amount) in &receivers {
            if *amount < Decimal::ZERO {
                return Err(Error::InvalidBlock(format!(
                    "negative coinbase output {} to {}",
                    amount, address
                )));
            }
            payout = payout.checked_add(*amount).ok_or_else(|| {
                Error::InvalidBlock("coinbase payouts overflow".to_string())
            })?;
        }

        let available = checked_total(transactions.iter().map(Transaction::transaction_fee))
            .and_then(|fees| Self::reward_algorithm(index).checked_add(fees))
            .ok_or_else(|| Error::InvalidBlock("block fees overflow".to_string()))?;
        if payout > available {
            return Err(Error::InvalidBlock(format!(
                "coinbase pays {} but only {} is available",
                payout, available
            )));
        }

        let mut data = Vec::with_capacity(transactions.len() + 1);
        data.push(Self::create_coinbase_transaction(index, receivers));
        data.extend(transactions);

        let mut block = Block::new(
            protocol_version,
            index,
            timestamp,
            prev_block.hash,
            difficulty,
            data,
        );
        block.mine();
        Ok(block)
    }

    /// Mines the next block from pool transactions chosen by `selector`.
    ///
    /// The timestamp is raised to the tip's if it is earlier.
    ///
    /// # Errors
    ///
    /// See [`Blockchain::generate_new_block`].
    pub fn mine_block<F>(
        &self,
        receivers: Vec<(HashValue, Decimal)>,
        timestamp: u64,
        selector: F,
    ) -> Result<Block>
    where
        F: FnOnce(&[Transaction]) -> Vec<Transaction>,
    {
        let transactions = self.find_transactions_by_algo(selector);
        let tip = self.tip();
        self.generate_new_block(
            receivers,
            self.params.protocol_version.clone(),
            timestamp.max(tip.timestamp),
            tip,
            self.next_difficulty(),
            transactions,
        )
    }

    // The height goes into `extra_info` so coinbases with equal payouts get
    // distinct ids.
    fn create_coinbase_transaction(
        index: usize,
        receivers: Vec<(HashValue, Decimal)>,
    ) -> Transaction {
        let reward_outputs = receivers
            .into_iter()
            .map(|(address, amount)| Output::new(amount, address.to_vec()))
            .collect::<Vec<Output>>();
        let mut coinbase = Transaction::new(
            vec![],
            reward_outputs,
            HashValue::zero(),
            Decimal::ZERO,
            Some(coinbase_tag(index)),
        );
        coinbase.update_digest();
        coinbase
    }

    /// Validates and appends a block, then evicts what it confirmed from the
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns the first consensus rule the block breaks.
    pub fn add_block(&mut self, block: Block) -> Result<()> {
        self.validate_block(&block)?;

        let confirmed: HashSet<HashValue> =
            block.data.iter().map(Transaction::transaction_id).collect();
        let spent: HashSet<OutPoint> = block.data.iter().flat_map(outpoints).collect();
        self.tx_pool.retain(|tx| {
            !confirmed.contains(&tx.transaction_id()) && !outpoints(tx).any(|o| spent.contains(&o))
        });

        tracing::info!(
            index = block.index,
            hash = %block.hash,
            transactions = block.data.len(),
            "accepted block"
        );
        self.blocks.push(block);
        Ok(())
    }

    /// Validates a transaction and queues it for mining.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is invalid at the next height,
    /// already queued, or spends an output a queued transaction spends.
    pub fn submit_transaction(&mut self, tx: Transaction) -> Result<()> {
        self.validate_transaction(&tx)?;

        if self
            .tx_pool
            .iter()
            .any(|pending| pending.transaction_id() == tx.transaction_id())
        {
            return Err(Error::InvalidTransaction(format!(
                "{} is already pending",
                tx.transaction_id()
            )));
        }

        let pending: HashSet<OutPoint> = self.tx_pool.iter().flat_map(outpoints).collect();
        if let Some((hash, index)) = outpoints(&tx).find(|o| pending.contains(o)) {
            return Err(Error::InvalidTransaction(format!(
                "output {}:{} is already spent by a pending transaction",
                hash, index
            )));
        }

        tracing::debug!(tx = %tx.transaction_id(), fee = %tx.transaction_fee(), "queued transaction");
        self.tx_pool.push(tx);
        Ok(())
    }
}

impl Blockchain {
    /// Returns true if `block` may extend the chain.
    pub fn verify_block(&self, block: &Block) -> bool {
        self.validate_block(block).is_ok()
    }

    /// Checks a candidate block against the tip and the consensus rules.
    ///
    /// In order: index and linkage, timestamp, difficulty, merkle root, proof
    /// of work, coinbase placement and digest, every other transaction,
    /// in-block double spends, and the coinbase payout.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first failed check.
    pub fn validate_block(&self, block: &Block) -> Result<()> {
        let tip = self.tip();
        let invalid = |msg: String| Err(Error::InvalidBlock(msg));

        if block.index != tip.index + 1 {
            return invalid(format!(
                "expected index {}, got {}",
                tip.index + 1,
                block.index
            ));
        }
        if block.prev_hash != tip.hash {
            return invalid(format!(
                "prev_hash {} does not match tip {}",
                block.prev_hash, tip.hash
            ));
        }
        if block.timestamp < tip.timestamp {
            return invalid(format!(
                "timestamp {} is earlier than tip timestamp {}",
                block.timestamp, tip.timestamp
            ));
        }

        let expected_bits = self.next_difficulty();
        if block.difficulty != expected_bits {
            return invalid(format!(
                "difficulty {:#010x} does not match required {:#010x}",
                block.difficulty, expected_bits
            ));
        }
        if block.merkle_root != block.calc_merkle_root() {
            return invalid("merkle root does not match transactions".to_string());
        }
        if block.hash != block.pow_hash() {
            return invalid("hash does not match header".to_string());
        }
        if block.hash > block.target_threshold() {
            return invalid("hash is above the target threshold".to_string());
        }

        let Some((coinbase, rest)) = block.data.split_first() else {
            return invalid("block has no coinbase transaction".to_string());
        };
        if !coinbase.is_coinbase() {
            return invalid("first transaction is not a coinbase".to_string());
        }
        if rest.iter().any(Transaction::is_coinbase) {
            return invalid("coinbase transaction after the first position".to_string());
        }
        if coinbase.transaction_id() != coinbase.sha256() {
            return invalid("coinbase id does not match its digest".to_string());
        }
        if coinbase.transaction_fee() != Decimal::ZERO {
            return invalid("coinbase carries a fee".to_string());
        }
        if coinbase.extra_info() != Some(coinbase_tag(block.index).as_slice()) {
            return invalid("coinbase is not tagged with the block index".to_string());
        }

        let height = block.index;
        let fees = rest
            .par_iter()
            .map(|tx| {
                self.validate_transaction_at(tx, height)
                    .map(|()| tx.transaction_fee())
            })
            .collect::<Result<Vec<Decimal>>>()?;

        let mut spent = HashSet::new();
        for outpoint in rest.iter().flat_map(outpoints) {
            if !spent.insert(outpoint) {
                return invalid(format!(
                    "output {}:{} is spent twice",
                    outpoint.0, outpoint.1
                ));
            }
        }

        if coinbase.outputs().iter().any(|o| o.amount() < Decimal::ZERO) {
            return invalid("negative coinbase output".to_string());
        }
        let Some(available) =
            checked_total(fees).and_then(|fees| Self::reward_algorithm(height).checked_add(fees))
        else {
            return invalid("block fees overflow".to_string());
        };
        let Some(paid) = coinbase.output_total() else {
            return invalid("coinbase outputs overflow".to_string());
        };
        if paid > available {
            return invalid(format!(
                "coinbase pays {} but only {} is available",
                paid, available
            ));
        }

        Ok(())
    }

    /// Returns true if `tx` could be mined in the next block.
    pub fn verify_transaction(&self, transaction: &Transaction) -> bool {
        self.validate_transaction(transaction).is_ok()
    }

    /// Validates a regular transaction for inclusion in the next block.
    ///
    /// # Errors
    ///
    /// See [`Blockchain::validate_transaction_at`].
    pub fn validate_transaction(&self, transaction: &Transaction) -> Result<()> {
        self.validate_transaction_at(transaction, self.blocks.len())
    }

    /// Validates a regular transaction for inclusion at `height`.
    ///
    /// Coinbase transactions are checked by [`Blockchain::validate_block`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction has no inputs or spends one output twice
    /// - An input references a missing block, transaction or output
    /// - A referenced output is already spent on chain
    /// - A referenced output lacks the required confirmations
    /// - An unlock script does not satisfy its locking script
    /// - The id does not match the digest
    /// - An output is negative, outputs exceed inputs, or the fee is wrong
    pub fn validate_transaction_at(&self, transaction: &Transaction, height: usize) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidTransaction(msg));

        if transaction.is_coinbase() {
            return invalid("transaction has no inputs".to_string());
        }
        if transaction.transaction_id() != transaction.sha256() {
            return invalid("transaction id does not match its digest".to_string());
        }

        let sighash = transaction.signature_hash();
        let mut seen = HashSet::new();
        let mut input_sum = Decimal::ZERO;

        for input in transaction.inputs() {
            let outpoint = (input.prev_tx_hash(), input.prev_output_index());
            if !seen.insert(outpoint) {
                return invalid(format!(
                    "output {}:{} is spent twice",
                    outpoint.0, outpoint.1
                ));
            }

            let block_index = input.prev_block_index();
            let block = self
                .blocks
                .get(block_index)
                .filter(|block| block.index < height)
                .ok_or(Error::InvalidBlockIndex(block_index))?;
            let prev_tx = block
                .tx_by_id(input.prev_tx_hash())
                .ok_or_else(|| Error::InvalidTransactionIndex(input.prev_tx_hash().to_string()))?;
            let prev_output = prev_tx
                .output(input.prev_output_index())
                .ok_or(Error::InvalidOutputIndex)?;

            if self.is_spent_before(input.prev_tx_hash(), input.prev_output_index(), height) {
                return invalid(format!(
                    "output {}:{} is already spent",
                    outpoint.0, outpoint.1
                ));
            }

            let required = if prev_tx.is_coinbase() {
                self.params.coinbase_maturity
            } else {
                self.params.confirmations
            };
            let confirmations = height - block_index;
            if confirmations < required {
                return invalid(format!(
                    "output {}:{} has {} confirmations, needs {}",
                    outpoint.0, outpoint.1, confirmations, required
                ));
            }

            if !Transaction::verify_scripts(
                &sighash,
                prev_output.locking_script(),
                input.unlock_script(),
            ) {
                return invalid(format!(
                    "unlock script for {}:{} is not valid",
                    outpoint.0, outpoint.1
                ));
            }

            let Some(sum) = input_sum.checked_add(prev_output.amount()) else {
                return invalid("input total overflows".to_string());
            };
            input_sum = sum;
        }

        if transaction
            .outputs()
            .iter()
            .any(|output| output.amount() < Decimal::ZERO)
        {
            return invalid("negative output amount".to_string());
        }

        let Some(output_sum) = transaction.output_total() else {
            return invalid("output total overflows".to_string());
        };
        if output_sum > input_sum {
            return Err(Error::InvalidInputFee);
        }
        if transaction.transaction_fee() != input_sum - output_sum {
            return invalid(format!(
                "fee {} does not equal inputs minus outputs ({})",
                transaction.transaction_fee(),
                input_sum - output_sum
            ));
        }

        Ok(())
    }
}

impl Blockchain {
    fn tip(&self) -> &Block {
        match self.blocks.last() {
            Some(block) => block,
            None => unreachable!("a chain always holds its genesis block"),
        }
    }

    /// Returns the block at `index`.
    pub fn get_block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Returns the latest block.
    pub fn last_block(&self) -> &Block {
        self.tip()
    }

    /// Index of the latest block.
    pub fn height(&self) -> usize {
        self.tip().index
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Pending transactions in submission order.
    pub fn pool(&self) -> &[Transaction] {
        &self.tx_pool
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Finds a confirmed transaction and the index of its block.
    pub fn find_transaction(&self, tx_id: HashValue) -> Option<(usize, &Transaction)> {
        self.blocks
            .iter()
            .find_map(|block| block.tx_by_id(tx_id).map(|tx| (block.index, tx)))
    }

    /// Returns true if a confirmed input spends the output.
    pub fn is_spent(&self, tx_hash: HashValue, output_index: usize) -> bool {
        self.is_spent_before(tx_hash, output_index, self.blocks.len())
    }

    fn is_spent_before(&self, tx_hash: HashValue, output_index: usize, height: usize) -> bool {
        self.blocks
            .iter()
            .take(height)
            .flat_map(|block| block.data.iter())
            .flat_map(outpoints)
            .any(|outpoint| outpoint == (tx_hash, output_index))
    }

    /// Returns true if a pending transaction spends the output.
    pub fn is_pending_spend(&self, tx_hash: HashValue, output_index: usize) -> bool {
        self.tx_pool
            .iter()
            .flat_map(outpoints)
            .any(|outpoint| outpoint == (tx_hash, output_index))
    }

    /// Confirmed, unspent outputs paying `address`.
    pub fn utxos_for(&self, address: &HashValue) -> Vec<UTXO> {
        let mut utxos = Vec::new();
        for block in &self.blocks {
            for tx in &block.data {
                for (position, output) in tx.outputs().iter().enumerate() {
                    if output.is_locked_to(address)
                        && !self.is_spent(tx.transaction_id(), position)
                    {
                        utxos.push(UTXO::new(tx.clone(), block.index, position));
                    }
                }
            }
        }
        utxos
    }

    /// Outputs paying `address` that the next block may spend.
    ///
    /// Excludes immature outputs and outputs already claimed by the pool.
    pub fn spendable_utxos_for(&self, address: &HashValue) -> Vec<UTXO> {
        let next_height = self.blocks.len();
        self.utxos_for(address)
            .into_iter()
            .filter(|utxo| {
                let required = if utxo.prev_tx.is_coinbase() {
                    self.params.coinbase_maturity
                } else {
                    self.params.confirmations
                };
                next_height - utxo.prev_block_index >= required
                    && !self.is_pending_spend(utxo.prev_tx_hash, utxo.prev_output_index)
            })
            .collect()
    }

    /// Confirmed balance of `address`, mature or not.
    pub fn balance_of(&self, address: &HashValue) -> Decimal {
        self.utxos_for(address)
            .iter()
            .filter_map(UTXO::output)
            .map(Output::amount)
            .sum()
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new("Default Blockchain")
    }
}

/// Coinbase payload: the block index, so coinbases at different heights
/// never share an id.
fn coinbase_tag(index: usize) -> Vec<u8> {
    (index as u64).to_be_bytes().to_vec()
}

fn outpoints(tx: &Transaction) -> impl Iterator<Item = OutPoint> + '_ {
    tx.inputs()
        .iter()
        .map(|input| (input.prev_tx_hash(), input.prev_output_index()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_schedule() {
        assert_eq!(Blockchain::reward_algorithm(0), Decimal::ZERO);
        assert_eq!(Blockchain::reward_algorithm(1), Decimal::from(59));
        assert_eq!(Blockchain::reward_algorithm(3), Decimal::from(29));
        assert_eq!(Blockchain::reward_algorithm(15), Decimal::from(14));
        assert_eq!(
            Blockchain::reward_algorithm(100_000_000_000_000_000),
            Decimal::ONE
        );
        assert_eq!(
            Blockchain::reward_algorithm(1_844_674_407_370_955_161),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_genesis_block() {
        let chain = Blockchain::with_params("hello world", 1_700_000_000, ChainParams::default());
        let genesis = chain.last_block();
        assert_eq!(genesis.index(), 0);
        assert_eq!(genesis.version(), GENESIS_VERSION);
        assert_eq!(genesis.difficulty(), 0);
        assert_eq!(genesis.hash(), genesis.sha256());
        assert_eq!(genesis.transactions().len(), 1);
        assert_eq!(
            genesis.transactions()[0].extra_info(),
            Some(b"hello world".as_slice())
        );
    }

    #[test]
    fn test_next_difficulty_before_retarget() {
        let params = ChainParams {
            initial_difficulty: 0x2100ffff,
            ..ChainParams::default()
        };
        let chain = Blockchain::with_params("g", 0, params);
        assert_eq!(chain.next_difficulty(), 0x2100ffff);
    }
}
