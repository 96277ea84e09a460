// Rust guideline compliant 2026-10-19

//! Wallets: key pairs, unspent outputs, and signed transfers.

use crate::{checked_total, Blockchain, Error, HashValue, Input, Output, Result, Transaction};
use rust_decimal::Decimal;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::fs;
use std::io::Write;
use std::path::Path;

/// An unspent transaction output together with the transaction holding it.
#[derive(Debug, Clone, PartialEq)]
pub struct UTXO {
    /// Transaction holding the output.
    pub prev_tx: Transaction,
    /// Index of the block holding `prev_tx`.
    pub prev_block_index: usize,
    /// Position of the output in `prev_tx`.
    pub prev_output_index: usize,
    /// Hash of `prev_tx`.
    pub prev_tx_hash: HashValue,
}

impl UTXO {
    pub fn new(prev_tx: Transaction, prev_block_index: usize, prev_output_index: usize) -> Self {
        let prev_tx_hash = prev_tx.sha256();

        UTXO {
            prev_tx,
            prev_block_index,
            prev_output_index,
            prev_tx_hash,
        }
    }

    /// The referenced output, if the index is in range.
    pub fn output(&self) -> Option<&Output> {
        self.prev_tx.output(self.prev_output_index)
    }
}

/// A key pair with its address and known unspent outputs.
///
/// The address is the SHA-256 of the compressed public key, which is also the
/// P2PKH locking script of every output paying this wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    public_key: PublicKey,
    secret_key: SecretKey,
    unspent_tx_outputs: Vec<UTXO>,
    address: HashValue,
}

impl Wallet {
    /// Creates a wallet with a freshly generated key pair.
    pub fn new() -> Self {
        let secp = Secp256k1::new();
        let (secret_key, _) = secp.generate_keypair(&mut secp256k1::rand::thread_rng());
        Self::from_secret_key(secret_key)
    }

    /// Restores a wallet from its secret key.
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = PublicKey::from_secret_key(&Secp256k1::signing_only(), &secret_key);
        Wallet {
            public_key,
            secret_key,
            unspent_tx_outputs: Vec::new(),
            address: public_key_to_hash(&public_key),
        }
    }

    /// Builds a signed transaction spending `utxos`.
    ///
    /// # Arguments
    ///
    /// * `utxos` - Outputs owned by this wallet to spend
    /// * `receivers` - `(amount, address)` pairs to pay
    /// * `extra_info` - Optional payload stored in the transaction
    ///
    /// # Returns
    ///
    /// A transaction whose fee is inputs minus outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A UTXO's output index is out of range
    /// - A receiver amount is negative
    /// - The outputs exceed the inputs
    pub fn transfer_credits(
        &self,
        utxos: Vec<UTXO>,
        receivers: Vec<(Decimal, HashValue)>,
        extra_info: Option<Vec<u8>>,
    ) -> Result<Transaction> {
        let mut input_fee = Decimal::ZERO;
        let mut inputs = Vec::with_capacity(utxos.len());
        for utxo in &utxos {
            let output = utxo.output().ok_or(Error::InvalidOutputIndex)?;
            input_fee = input_fee
                .checked_add(output.amount())
                .ok_or_else(|| Error::InvalidTransaction("input total overflows".to_string()))?;
            inputs.push(Input::new(
                utxo.prev_tx_hash,
                utxo.prev_block_index,
                utxo.prev_output_index,
                Vec::new(),
            ));
        }

        let mut outputs = Vec::with_capacity(receivers.len());
        for (amount, address) in receivers {
            if amount < Decimal::ZERO {
                return Err(Error::InvalidTransaction(format!(
                    "negative amount {} to {}",
                    amount, address
                )));
            }
            outputs.push(Output::new(amount, address.to_vec()));
        }

        let output_fee = checked_total(outputs.iter().map(Output::amount))
            .ok_or_else(|| Error::InvalidTransaction("output total overflows".to_string()))?;
        let tx_fee = input_fee - output_fee;
        if tx_fee < Decimal::ZERO {
            return Err(Error::InvalidInputFee);
        }

        let mut tx = Transaction::new(inputs, outputs, HashValue::zero(), tx_fee, extra_info);
        tx.sign_inputs(&self.secret_key, &self.public_key);
        Ok(tx)
    }

    /// Pays `amount` to `to`, leaving `fee` for the miner.
    ///
    /// Spendable outputs are taken oldest first until `amount + fee` is
    /// covered; any remainder returns to this wallet as change.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive, the fee is negative, or
    /// the spendable balance is too small.
    pub fn pay(
        &self,
        chain: &Blockchain,
        to: HashValue,
        amount: Decimal,
        fee: Decimal,
    ) -> Result<Transaction> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidTransaction(
                "amount must be positive".to_string(),
            ));
        }
        if fee < Decimal::ZERO {
            return Err(Error::InvalidTransaction(
                "fee cannot be negative".to_string(),
            ));
        }

        let needed = amount.checked_add(fee).ok_or_else(|| {
            Error::InvalidTransaction(format!("amount {} plus fee {} overflows", amount, fee))
        })?;
        let mut gathered = Decimal::ZERO;
        let mut selected = Vec::new();
        for utxo in chain.spendable_utxos_for(&self.address) {
            if gathered >= needed {
                break;
            }
            let Some(value) = utxo.output().map(Output::amount) else {
                continue;
            };
            gathered = gathered.checked_add(value).ok_or_else(|| {
                Error::InvalidTransaction("spendable total overflows".to_string())
            })?;
            selected.push(utxo);
        }

        if gathered < needed {
            return Err(Error::InsufficientFunds {
                needed,
                available: gathered,
            });
        }

        let mut receivers = vec![(amount, to)];
        let change = gathered - needed;
        if change > Decimal::ZERO {
            receivers.push((change, self.address));
        }

        self.transfer_credits(selected, receivers, None)
    }

    /// Replaces the known UTXOs with those the chain reports for this address.
    pub fn sync_utxos(&mut self, chain: &Blockchain) {
        self.unspent_tx_outputs = chain.utxos_for(&self.address);
    }

    /// Sum of the known UTXOs.
    pub fn balance(&self) -> Decimal {
        self.unspent_tx_outputs
            .iter()
            .filter_map(UTXO::output)
            .map(Output::amount)
            .sum()
    }

    pub fn utxos(&self) -> &[UTXO] {
        &self.unspent_tx_outputs
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn address(&self) -> HashValue {
        self.address
    }

    /// Reads a wallet from a file holding the 32 raw secret-key bytes.
    ///
    /// The public key and address are derived from the secret key.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid key.
    pub fn build_from_private_key_file(path: &Path) -> Result<Self> {
        let content = fs::read(path)?;
        let secret_key = SecretKey::from_slice(&content)?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// Writes the secret key to `path` as 32 raw bytes.
    ///
    /// On Unix the file is created readable by its owner only, and an existing
    /// file is restricted before the key is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_private_key_to_file(&self, path: &Path) -> Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(&self.secret_key.secret_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

fn public_key_to_hash(public_key: &PublicKey) -> HashValue {
    HashValue::digest(public_key.serialize())
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // In P2PKH the address and the locking script are the same bytes.
    #[test]
    fn test_locking_script_is_address() {
        let wallet = Wallet::new();
        let locking_script = Output::generate_locking_script(&wallet.public_key());
        assert_eq!(locking_script, wallet.address().to_vec());
    }

    #[test]
    fn test_transfer_credit() {
        let wallet1 = Wallet::new();
        let wallet2 = Wallet::new();
        let prev_tx = Transaction::new(
            vec![Input::new(HashValue::zero(), 0, 0, vec![0u8; 32])],
            vec![Output::new(dec!(1.0), wallet1.address().to_vec())],
            HashValue::zero(),
            dec!(0.0),
            None,
        );

        let tx = wallet1
            .transfer_credits(
                vec![UTXO::new(prev_tx.clone(), 0, 0)],
                vec![(dec!(0.5), wallet2.address())],
                None,
            )
            .unwrap();

        assert_eq!(tx.transaction_fee(), dec!(0.5));
        assert_eq!(tx.transaction_id(), tx.sha256());
        assert_eq!(tx.inputs()[0].prev_tx_hash(), prev_tx.sha256());
        assert!(Transaction::verify_scripts(
            &tx.signature_hash(),
            prev_tx.outputs()[0].locking_script(),
            tx.inputs()[0].unlock_script(),
        ));
    }

    #[test]
    fn test_transfer_rejects_overspend() {
        let wallet = Wallet::new();
        let prev_tx = Transaction::new(
            vec![],
            vec![Output::new(dec!(1), wallet.address().to_vec())],
            HashValue::zero(),
            dec!(0),
            None,
        );
        let result = wallet.transfer_credits(
            vec![UTXO::new(prev_tx, 0, 0)],
            vec![(dec!(2), wallet.address())],
            None,
        );
        assert!(matches!(result, Err(Error::InvalidInputFee)));
    }

    #[test]
    fn test_transfer_rejects_bad_output_index() {
        let wallet = Wallet::new();
        let prev_tx = Transaction::new(vec![], vec![], HashValue::zero(), dec!(0), None);
        let result = wallet.transfer_credits(vec![UTXO::new(prev_tx, 0, 3)], vec![], None);
        assert!(matches!(result, Err(Error::InvalidOutputIndex)));
    }
}
