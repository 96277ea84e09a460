// Rust guideline compliant 2026-10-19

//! Fixed-size byte types shared across the ledger.
//!
//! Values are kept on the stack as `[u8; N]` and rendered as `0x`-prefixed
//! lowercase hex in `Display`, `Debug` and serde.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// A SHA-256 digest.
pub type HashValue = Bytes<32>;

/// A compact secp256k1 ECDSA signature.
pub type Signature = Bytes<64>;

/// Fixed-size byte array with hex text representation.
///
/// Ordering is lexicographic, which for equal-length arrays is big-endian
/// numeric ordering. Proof of work relies on this.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bytes<const N: usize>([u8; N]);

impl<const N: usize> Bytes<N> {
    /// Wraps a byte array.
    pub const fn from_array(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Copies `bytes` into a new value.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not exactly `N` long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; N] = bytes.try_into().map_err(|_| {
            Error::Hex(format!("expected {} bytes, got {}", N, bytes.len()))
        })?;
        Ok(Self(arr))
    }

    /// Returns the underlying array.
    pub fn into_inner(self) -> [u8; N] {
        self.0
    }

    fn fmt_as_hex(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl HashValue {
    /// Wraps a 32-byte digest.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The all-zero hash.
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// SHA-256 of arbitrary data.
    pub fn digest(data: impl AsRef<[u8]>) -> Self {
        Self(Sha256::digest(data.as_ref()).into())
    }

    /// SHA-256 of this hash's bytes.
    ///
    /// Applied to a header hash this yields the proof-of-work double hash.
    pub fn sha256(&self) -> Self {
        Self::digest(self.0)
    }
}

impl<const N: usize> FromStr for Bytes<N> {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let val = value.strip_prefix("0x").unwrap_or(value);
        let bytes = hex::decode(val).map_err(|e| Error::Hex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl<const N: usize> TryFrom<String> for Bytes<N> {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl<const N: usize> From<Bytes<N>> for String {
    fn from(value: Bytes<N>) -> Self {
        String::from("0x") + &hex::encode(value.0)
    }
}

impl<const N: usize> From<[u8; N]> for Bytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> fmt::Debug for Bytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_hex(f)
    }
}

impl<const N: usize> fmt::Display for Bytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_hex(f)
    }
}

impl<const N: usize> Deref for Bytes<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> AsRef<[u8]> for Bytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Serde adapter storing `Vec<u8>` as a `0x` hex string.
pub(crate) mod hex_vec {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let value = String::deserialize(deserializer)?;
        let val = value.strip_prefix("0x").unwrap_or(&value);
        hex::decode(val).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter storing `Option<Vec<u8>>` as an optional `0x` hex string.
pub(crate) mod hex_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => super::hex_vec::serialize(bytes, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        value
            .map(|value| {
                let val = value.strip_prefix("0x").unwrap_or(&value).to_string();
                hex::decode(val).map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_display() {
        let hash = HashValue::digest(b"hello world");
        assert_eq!(
            hash.to_string(),
            "0xb94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_parse_without_prefix() {
        let hash: HashValue = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
            .parse()
            .unwrap();
        assert_eq!(hash, HashValue::digest(b"hello world"));
    }

    #[test]
    fn test_parse_wrong_length_is_error() {
        assert!("0xabcd".parse::<HashValue>().is_err());
        assert!("0xzz".parse::<Bytes<1>>().is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let hash = HashValue::zero();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "00".repeat(32)));
        let back: HashValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn test_ordering_is_big_endian() {
        let mut low = [0u8; 32];
        low[31] = 0xff;
        let mut high = [0u8; 32];
        high[0] = 0x01;
        assert!(HashValue::new(low) < HashValue::new(high));
    }
}
