//! Compact target codec
//!
//! A compact target packs a 256-bit threshold into 32 bits: the top byte is
//! the size in bytes, the low three bytes the mantissa, and `0x00800000` is a
//! sign bit that valid targets never set.

use crate::error::CompactError;
use num_bigint::BigUint;
use num_traits::Zero;

/// Full-precision difficulty target
pub type Target = BigUint;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Decode a compact target into its full-precision value.
pub fn decode_compact(bits: u32) -> Result<Target, CompactError> {
    let size = bits >> 24;
    let word = bits & MANTISSA_MASK;

    if word != 0 && bits & SIGN_BIT != 0 {
        return Err(CompactError::Negative(bits));
    }
    if word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32)) {
        return Err(CompactError::Overflow(bits));
    }

    let value = if size <= 3 {
        BigUint::from(word >> (8 * (3 - size)))
    } else {
        BigUint::from(word) << (8 * (size - 3) as usize)
    };
    Ok(value)
}

/// Encode a target to compact form, keeping its top three significant bytes.
pub fn encode_compact(value: &Target) -> u32 {
    if value.is_zero() {
        return 0;
    }

    let mut size = ((value.bits() + 7) / 8) as u32;
    let mut compact = if size <= 3 {
        low_u32(value) << (8 * (3 - size))
    } else {
        low_u32(&(value >> (8 * (size - 3) as usize)))
    };

    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | (size << 24)
}

/// Mask `value` down to the precision a compact word with `claimed_bits`'
/// exponent can express.
pub fn reduce_precision(value: &Target, claimed_bits: u32) -> Target {
    let accuracy_bytes = (claimed_bits >> 24) as i64 - 3;
    let window = BigUint::from(0x00ff_ffffu32);
    let mask = if accuracy_bytes >= 0 {
        window << (accuracy_bytes as usize * 8)
    } else {
        window >> (accuracy_bytes.unsigned_abs() as usize * 8)
    };
    value & mask
}

fn low_u32(value: &BigUint) -> u32 {
    value.iter_u32_digits().next().unwrap_or(0)
}
