// Rust guideline compliant 2026-10-19

//! Compact difficulty encoding ("nBits") and retargeting.
//!
//! A compact value `b1 b2 b3 b4` encodes the target
//! `b2b3b4 * 256^(b1 - 3)` as a 256-bit big-endian number. Mantissa bytes that
//! land outside the 32-byte window are dropped, so exponents above 34 or below
//! 3 truncate the target rather than wrapping.

use crate::HashValue;
use num_bigint_dig::BigUint;

/// Compact encoding of the easiest target the ledger accepts.
pub const MAX_TARGET_BITS: u32 = 0x2100ffff;

/// Retargeting never moves the target by more than this factor per interval.
const MAX_ADJUSTMENT_FACTOR: u64 = 4;

/// Expands a compact difficulty into its 256-bit target.
///
/// # Arguments
///
/// * `bits` - Compact difficulty
///
/// # Returns
///
/// The target threshold a proof-of-work hash must not exceed.
pub fn target_from_compact(bits: u32) -> HashValue {
    let [exponent, mantissa @ ..] = bits.to_be_bytes();
    let mut target = [0u8; 32];

    for (offset, byte) in mantissa.iter().enumerate() {
        let pos = 32 - exponent as isize + offset as isize;
        if (0..32).contains(&pos) {
            target[pos as usize] = *byte;
        }
    }

    HashValue::new(target)
}

/// Encodes a target in compact form, keeping its three most significant bytes.
///
/// The zero target encodes as `0`.
pub fn compact_from_target(target: &HashValue) -> u32 {
    let bytes: &[u8] = target.as_ref();
    let Some(first) = bytes.iter().position(|b| *b != 0) else {
        return 0;
    };

    let size = (32 - first) as u8;
    let mut mantissa = [0u8; 3];
    for (k, slot) in mantissa.iter_mut().enumerate() {
        if let Some(byte) = bytes.get(first + k) {
            *slot = *byte;
        }
    }

    u32::from_be_bytes([size, mantissa[0], mantissa[1], mantissa[2]])
}

/// The easiest acceptable target.
pub fn max_target() -> HashValue {
    target_from_compact(MAX_TARGET_BITS)
}

/// Computes the next compact difficulty after a retarget interval.
///
/// The new target is `old * actual / expected`. `actual_timespan` is clamped to
/// a factor of four around `expected_timespan`, and the result never exceeds
/// [`max_target`].
///
/// # Arguments
///
/// * `prev_bits` - Compact difficulty used during the finished interval
/// * `actual_timespan` - Seconds the interval actually took
/// * `expected_timespan` - Seconds the interval should have taken
pub fn retarget(prev_bits: u32, actual_timespan: u64, expected_timespan: u64) -> u32 {
    let expected = expected_timespan.max(1);
    let actual = actual_timespan
        .clamp(
            expected / MAX_ADJUSTMENT_FACTOR,
            expected.saturating_mul(MAX_ADJUSTMENT_FACTOR),
        )
        .max(1);

    let old = BigUint::from_bytes_be(target_from_compact(prev_bits).as_ref());
    let new = old * BigUint::from(actual) / BigUint::from(expected);

    let max = BigUint::from_bytes_be(max_target().as_ref());
    let capped = if new > max { max } else { new };

    compact_from_target(&to_hash(&capped))
}

fn to_hash(value: &BigUint) -> HashValue {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; 32];
    let len = bytes.len().min(32);
    out[32 - len..].copy_from_slice(&bytes[bytes.len() - len..]);
    HashValue::new(out)
}
