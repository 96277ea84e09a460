// Rust guideline compliant 2026-10-19

//! Blocks, merkle roots and proof of work.

use crate::difficulty::target_from_compact;
use crate::{HashValue, Transaction};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Display;

/// A block in the chain.
///
/// # Fields
///
/// * `version` - Protocol version string.
/// * `index` - Block height.
/// * `timestamp` - Seconds since the Unix epoch.
/// * `prev_hash` - Hash of the previous block.
/// * `hash` - Proof-of-work hash of this block.
/// * `merkle_root` - Merkle root of `data`.
/// * `difficulty` - Compact ("nBits") difficulty target.
/// * `nonce` - Counter searched during mining.
/// * `data` - Transactions; the first is the coinbase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub(crate) version: String,
    pub(crate) index: usize,
    pub(crate) timestamp: u64,
    pub(crate) prev_hash: HashValue,
    pub(crate) hash: HashValue,
    pub(crate) merkle_root: HashValue,
    pub(crate) difficulty: u32,
    pub(crate) nonce: i64,
    pub(crate) data: Vec<Transaction>,
}

impl Block {
    /// Creates an unmined block.
    ///
    /// The merkle root is computed from `data`; `hash` and `nonce` start at zero.
    pub fn new(
        version: String,
        index: usize,
        timestamp: u64,
        prev_hash: HashValue,
        difficulty: u32,
        data: Vec<Transaction>,
    ) -> Self {
        let mut block = Self {
            version,
            index,
            timestamp,
            prev_hash,
            hash: HashValue::zero(),
            merkle_root: HashValue::zero(),
            difficulty,
            nonce: 0,
            data,
        };
        block.merkle_root = block.calc_merkle_root();
        block
    }

    /// Target threshold expanded from `difficulty`.
    ///
    /// $ target\ threshold = b_2b_3b_4 \times 2^{8(b_1 - 3)} $
    pub fn target_threshold(&self) -> HashValue {
        target_from_compact(self.difficulty)
    }

    /// Merkle root of all transactions.
    ///
    /// The zero hash for an empty block. An odd hash at the end of a level is
    /// carried up unchanged.
    pub fn calc_merkle_root(&self) -> HashValue {
        if self.data.is_empty() {
            return HashValue::zero();
        }

        let mut hashes = self
            .data
            .iter()
            .map(Transaction::sha256)
            .collect::<Vec<HashValue>>();

        while hashes.len() > 1 {
            hashes = hashes
                .chunks(2)
                .map(|chunk| match *chunk {
                    [left, right] => {
                        let mut hasher = Sha256::new();
                        hasher.update(left);
                        hasher.update(right);
                        HashValue::new(hasher.finalize().into())
                    }
                    [single] => single,
                    _ => unreachable!("chunks(2) yields one or two hashes"),
                })
                .collect();
        }

        hashes[0]
    }

    /// Hash of the block header.
    ///
    /// Transactions are committed through `merkle_root`.
    pub fn sha256(&self) -> HashValue {
        let mut hasher = Sha256::new();
        hasher.update(self.version.as_bytes());
        hasher.update((self.index as u64).to_be_bytes());
        hasher.update(self.timestamp.to_be_bytes());
        hasher.update(self.prev_hash);
        hasher.update(self.merkle_root);
        hasher.update(self.difficulty.to_be_bytes());
        hasher.update(self.nonce.to_be_bytes());
        HashValue::new(hasher.finalize().into())
    }

    /// Double SHA-256 of the header, compared against the target.
    pub fn pow_hash(&self) -> HashValue {
        self.sha256().sha256()
    }

    /// Proof of work: advances `nonce` until the header hash meets the target.
    ///
    /// Starts from the current nonce, so a partially searched block can resume.
    ///
    /// # Returns
    ///
    /// The first hash not above the target. The caller stores it in `hash`.
    pub fn find_valid_hash(&mut self) -> HashValue {
        let target_threshold = self.target_threshold();
        let mut valid_hash = self.pow_hash();

        while valid_hash > target_threshold {
            self.nonce = self.nonce.wrapping_add(1);
            valid_hash = self.pow_hash();
        }

        tracing::debug!(index = self.index, nonce = self.nonce, hash = %valid_hash, "found proof of work");
        valid_hash
    }

    /// Mines the block and stores the resulting hash.
    pub fn mine(&mut self) {
        self.hash = self.find_valid_hash();
    }

    /// Looks up a transaction by id.
    pub fn tx_by_id(&self, tx_id: HashValue) -> Option<&Transaction> {
        self.data.iter().find(|tx| tx.transaction_id() == tx_id)
    }

    /// Position of a transaction in the block.
    pub fn tx_position(&self, tx_id: HashValue) -> Option<usize> {
        self.data.iter().position(|tx| tx.transaction_id() == tx_id)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn prev_hash(&self) -> HashValue {
        self.prev_hash
    }

    pub fn hash(&self) -> HashValue {
        self.hash
    }

    pub fn merkle_root(&self) -> HashValue {
        self.merkle_root
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn nonce(&self) -> i64 {
        self.nonce
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.data
    }

    /// The coinbase transaction, if the block has any transactions.
    pub fn coinbase(&self) -> Option<&Transaction> {
        self.data.first()
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Block[{}]:", self.index)?;
        writeln!(f, "\tversion: {}", self.version)?;
        writeln!(f, "\ttimestamp: {}", self.timestamp)?;
        writeln!(f, "\tprev_hash: {}", self.prev_hash)?;
        writeln!(f, "\thash: {}", self.hash)?;
        writeln!(f, "\tmerkle_root: {}", self.merkle_root)?;
        writeln!(f, "\tdifficulty: {:#010x}", self.difficulty)?;
        writeln!(f, "\tnonce: {}", self.nonce)?;
        writeln!(f, "\tdata: [")?;
        for tx in &self.data {
            for line in tx.to_string().lines() {
                writeln!(f, "\t\t{}", line)?;
            }
        }
        writeln!(f, "\t]")
    }
}
