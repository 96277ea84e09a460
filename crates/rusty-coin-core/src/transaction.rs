// Rust guideline compliant 2026-10-19

//! Transactions, inputs, outputs and their P2PKH scripts.
//!
//! An output is locked to the SHA-256 of a compressed secp256k1 public key.
//! An input unlocks it with a 64-byte compact ECDSA signature over the
//! spending transaction's signature hash, followed by the 33-byte public key.

use crate::types::{hex_opt, hex_vec};
use crate::HashValue;
use rust_decimal::Decimal;
use secp256k1::{ecdsa, Message, PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Length of a compact ECDSA signature.
pub const SIGNATURE_LEN: usize = 64;

/// Length of a compressed secp256k1 public key.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Length of a complete unlock script.
pub const UNLOCK_SCRIPT_LEN: usize = SIGNATURE_LEN + PUBLIC_KEY_LEN;

/// Reference to a previous output plus the script that unlocks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Hash of the transaction holding the spent output.
    prev_tx_hash: HashValue,
    /// Height of the block holding that transaction.
    prev_block_index: usize,
    /// Position of the output in that transaction.
    prev_output_index: usize,
    /// Signature followed by public key.
    #[serde(with = "hex_vec")]
    unlock_script: Vec<u8>,
}

impl Input {
    /// Creates an input spending `prev_tx_hash:prev_output_index`.
    pub fn new(
        prev_tx_hash: HashValue,
        prev_block_index: usize,
        prev_output_index: usize,
        unlock_script: Vec<u8>,
    ) -> Self {
        Self {
            prev_tx_hash,
            prev_block_index,
            prev_output_index,
            unlock_script,
        }
    }

    /// Signs `sighash` and packs the signature with the public key.
    ///
    /// # Arguments
    ///
    /// * `sighash` - Signature hash of the spending transaction
    /// * `secret_key` - Key owning the spent output
    /// * `public_key` - Matching public key
    ///
    /// # Returns
    ///
    /// A 97-byte unlock script.
    pub fn generate_unlock_script(
        sighash: &HashValue,
        secret_key: &SecretKey,
        public_key: &PublicKey,
    ) -> Vec<u8> {
        let secp = Secp256k1::signing_only();
        let message = Message::from_digest(sighash.into_inner());
        let signature = secp.sign_ecdsa(&message, secret_key);

        let mut script = Vec::with_capacity(UNLOCK_SCRIPT_LEN);
        script.extend_from_slice(&signature.serialize_compact());
        script.extend_from_slice(&public_key.serialize());
        script
    }

    pub fn prev_tx_hash(&self) -> HashValue {
        self.prev_tx_hash
    }

    pub fn prev_block_index(&self) -> usize {
        self.prev_block_index
    }

    pub fn prev_output_index(&self) -> usize {
        self.prev_output_index
    }

    pub fn unlock_script(&self) -> &[u8] {
        &self.unlock_script
    }

    pub(crate) fn set_unlock_script(&mut self, script: Vec<u8>) {
        self.unlock_script = script;
    }
}

/// An amount locked to an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    amount: Decimal,
    #[serde(with = "hex_vec")]
    locking_script: Vec<u8>,
}

impl Output {
    /// Creates an output paying `amount` to `locking_script`.
    pub fn new(amount: Decimal, locking_script: Vec<u8>) -> Self {
        Self {
            amount,
            locking_script,
        }
    }

    /// P2PKH locking script for a public key.
    ///
    /// Equal to the owning wallet's address bytes.
    pub fn generate_locking_script(public_key: &PublicKey) -> Vec<u8> {
        HashValue::digest(public_key.serialize()).to_vec()
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn locking_script(&self) -> &[u8] {
        &self.locking_script
    }

    /// Returns true if this output pays `address`.
    pub fn is_locked_to(&self, address: &HashValue) -> bool {
        self.locking_script.as_slice() == address.as_ref()
    }
}

/// A transfer of value from spent outputs to new outputs.
///
/// The coinbase transaction has no inputs and mints the block reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    /// Digest of every other field; see [`Transaction::sha256`].
    transaction_id: HashValue,
    /// Inputs minus outputs, collected by the miner.
    transaction_fee: Decimal,
    /// Free-form payload (genesis message, coinbase height, memo).
    #[serde(default, with = "hex_opt", skip_serializing_if = "Option::is_none")]
    extra_info: Option<Vec<u8>>,
}

impl Transaction {
    /// Creates a transaction.
    ///
    /// The id is taken as given; call [`Transaction::update_digest`] once the
    /// transaction is final.
    pub fn new(
        inputs: Vec<Input>,
        outputs: Vec<Output>,
        transaction_id: HashValue,
        transaction_fee: Decimal,
        extra_info: Option<Vec<u8>>,
    ) -> Self {
        Self {
            inputs,
            outputs,
            transaction_id,
            transaction_fee,
            extra_info,
        }
    }

    /// Digest of the transaction, excluding `transaction_id`.
    pub fn sha256(&self) -> HashValue {
        self.digest(true)
    }

    /// Digest signed by every input.
    ///
    /// Same as [`Transaction::sha256`] with the unlock scripts left out, so
    /// signatures commit to every outpoint, output, the fee and the payload.
    pub fn signature_hash(&self) -> HashValue {
        self.digest(false)
    }

    fn digest(&self, with_scripts: bool) -> HashValue {
        let mut hasher = Sha256::new();

        hasher.update((self.inputs.len() as u64).to_be_bytes());
        for input in &self.inputs {
            hasher.update(input.prev_tx_hash);
            hasher.update((input.prev_block_index as u64).to_be_bytes());
            hasher.update((input.prev_output_index as u64).to_be_bytes());
            if with_scripts {
                update_with_len(&mut hasher, &input.unlock_script);
            }
        }

        hasher.update((self.outputs.len() as u64).to_be_bytes());
        for output in &self.outputs {
            update_with_len(&mut hasher, decimal_bytes(output.amount).as_bytes());
            update_with_len(&mut hasher, &output.locking_script);
        }

        update_with_len(&mut hasher, decimal_bytes(self.transaction_fee).as_bytes());

        match &self.extra_info {
            Some(info) => {
                hasher.update([1u8]);
                update_with_len(&mut hasher, info);
            }
            None => hasher.update([0u8]),
        }

        HashValue::new(hasher.finalize().into())
    }

    /// Sets the transaction id to the current digest.
    pub fn update_digest(&mut self) {
        self.transaction_id = self.sha256();
    }

    /// Signs every input with the given key pair and refreshes the id.
    pub fn sign_inputs(&mut self, secret_key: &SecretKey, public_key: &PublicKey) {
        let sighash = self.signature_hash();
        let script = Input::generate_unlock_script(&sighash, secret_key, public_key);
        for input in &mut self.inputs {
            input.set_unlock_script(script.clone());
        }
        self.update_digest();
    }

    /// Checks an unlock script against a locking script.
    ///
    /// # Arguments
    ///
    /// * `sighash` - Signature hash of the spending transaction
    /// * `locking_script` - Script of the output being spent
    /// * `unlock_script` - Script supplied by the input
    ///
    /// # Returns
    ///
    /// True if the public key hashes to the locking script and the signature
    /// verifies over `sighash`.
    pub fn verify_scripts(sighash: &HashValue, locking_script: &[u8], unlock_script: &[u8]) -> bool {
        if unlock_script.len() != UNLOCK_SCRIPT_LEN {
            return false;
        }
        let (signature_bytes, key_bytes) = unlock_script.split_at(SIGNATURE_LEN);

        if HashValue::digest(key_bytes).as_ref() != locking_script {
            return false;
        }

        let Ok(public_key) = PublicKey::from_slice(key_bytes) else {
            return false;
        };
        let Ok(signature) = ecdsa::Signature::from_compact(signature_bytes) else {
            return false;
        };

        let message = Message::from_digest(sighash.into_inner());
        Secp256k1::verification_only()
            .verify_ecdsa(&message, &signature, &public_key)
            .is_ok()
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn transaction_id(&self) -> HashValue {
        self.transaction_id
    }

    pub fn transaction_fee(&self) -> Decimal {
        self.transaction_fee
    }

    pub fn extra_info(&self) -> Option<&[u8]> {
        self.extra_info.as_deref()
    }

    /// Returns the output at `index`, if any.
    pub fn output(&self, index: usize) -> Option<&Output> {
        self.outputs.get(index)
    }

    /// Returns true for a reward-minting transaction.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Sum of all output amounts, or `None` if it overflows.
    pub fn output_total(&self) -> Option<Decimal> {
        checked_total(self.outputs.iter().map(Output::amount))
    }
}

/// Sums amounts, or returns `None` if the total overflows.
pub fn checked_total<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

fn update_with_len(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes);
}

// `1.0` and `1.00` must hash the same.
fn decimal_bytes(amount: Decimal) -> String {
    amount.normalize().to_string()
}

impl Hash for Transaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.sha256().as_ref());
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transaction {}:", self.transaction_id)?;
        writeln!(f, "\tfee: {}", self.transaction_fee)?;
        writeln!(f, "\tinputs: [")?;
        for input in &self.inputs {
            writeln!(
                f,
                "\t\t{}:{} (block {})",
                input.prev_tx_hash, input.prev_output_index, input.prev_block_index
            )?;
        }
        writeln!(f, "\t]")?;
        writeln!(f, "\toutputs: [")?;
        for output in &self.outputs {
            writeln!(
                f,
                "\t\t{} -> 0x{}",
                output.amount,
                hex::encode(&output.locking_script)
            )?;
        }
        writeln!(f, "\t]")?;
        if let Some(info) = &self.extra_info {
            writeln!(f, "\textra_info: {}", String::from_utf8_lossy(info))?;
        }
        Ok(())
    }
}
