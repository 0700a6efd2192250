//! Order-preserving fixed-width encodings for range-comparable scalars.
//!
//! Every encoding here is big-endian and fixed-width so that byte-wise
//! comparison of the encoded form matches numeric ordering of the source
//! value. These byte strings are the bucket keys for scalar properties.

use crate::error::{IndexError, Result};

const SIGN_BIT_I64: u64 = 1 << 63;

/// Encode `x` so that byte-lexicographic order matches `i64` numeric order.
///
/// Flips the sign bit (equivalently, adds `2^63` as unsigned) before
/// writing big-endian: negative values land below zero, zero lands at
/// `0x8000000000000000`, and the ordering is total across the full `i64`
/// range.
pub fn encode_int64(x: i64) -> [u8; 8] {
    let unsigned = (x as u64) ^ SIGN_BIT_I64;
    unsigned.to_be_bytes()
}

/// Inverse of [`encode_int64`].
pub fn decode_int64(bytes: &[u8; 8]) -> i64 {
    let unsigned = u64::from_be_bytes(*bytes) ^ SIGN_BIT_I64;
    unsigned as i64
}

/// Encode `x` as big-endian bytes. `u32` order is already the encoded
/// byte order, so this is a plain width-preserving conversion.
pub fn encode_uint32(x: u32) -> [u8; 4] {
    x.to_be_bytes()
}

/// Inverse of [`encode_uint32`].
pub fn decode_uint32(bytes: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*bytes)
}

/// Encode `x` so that byte-lexicographic order matches `f64` numeric order
/// for all non-NaN values.
///
/// Takes the IEEE-754 bit pattern and then: if the sign bit is set
/// (negative), inverts all 64 bits; otherwise flips only the sign bit.
/// This pushes negative values — in descending magnitude order once
/// inverted — below positive values, which sort directly on their
/// magnitude bits. NaN has no defined numeric order, so it is rejected
/// with [`IndexError::EncodeError`] rather than given an arbitrary
/// position in the key space.
pub fn encode_float64(x: f64) -> Result<[u8; 8]> {
    if x.is_nan() {
        return Err(IndexError::EncodeError {
            reason: "cannot encode NaN as an order-preserving key".to_string(),
        });
    }

    let bits = x.to_bits();
    let transformed = if bits & SIGN_BIT_I64 != 0 {
        !bits
    } else {
        bits | SIGN_BIT_I64
    };
    Ok(transformed.to_be_bytes())
}

/// Inverse of [`encode_float64`].
pub fn decode_float64(bytes: &[u8; 8]) -> f64 {
    let transformed = u64::from_be_bytes(*bytes);
    let bits = if transformed & SIGN_BIT_I64 != 0 {
        transformed & !SIGN_BIT_I64
    } else {
        !transformed
    };
    f64::from_bits(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn int64_known_vectors() {
        assert_eq!(
            encode_int64(-1),
            [0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            encode_int64(0),
            [0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            encode_int64(1),
            [0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]
        );
        assert!(encode_int64(-1) < encode_int64(0));
        assert!(encode_int64(0) < encode_int64(1));
    }

    #[test]
    fn int64_roundtrips() {
        for x in [i64::MIN, i64::MIN + 1, -1, 0, 1, 42, i64::MAX] {
            assert_eq!(decode_int64(&encode_int64(x)), x);
        }
    }

    #[test]
    fn int64_sort_order_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let a: i64 = rng.gen();
            let b: i64 = rng.gen();
            if a == b {
                continue;
            }
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            assert!(encode_int64(lo) < encode_int64(hi));
        }
    }

    #[test]
    fn uint32_sort_order_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let a: u32 = rng.gen();
            let b: u32 = rng.gen();
            if a == b {
                continue;
            }
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            assert!(encode_uint32(lo) < encode_uint32(hi));
        }
        assert_eq!(decode_uint32(&encode_uint32(12345)), 12345);
    }

    #[test]
    fn float64_sort_order_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let a: f64 = rng.gen_range(-1e18..1e18);
            let b: f64 = rng.gen_range(-1e18..1e18);
            if a == b {
                continue;
            }
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            assert!(encode_float64(lo).unwrap() < encode_float64(hi).unwrap());
        }
    }

    #[test]
    fn float64_roundtrips() {
        for x in [f64::MIN, -1.0, -0.0, 0.0, 1.0, f64::MAX, 3.14159] {
            let encoded = encode_float64(x).unwrap();
            assert_eq!(decode_float64(&encoded), x);
        }
    }

    #[test]
    fn float64_negative_zero_sorts_with_zero() {
        let neg_zero = encode_float64(-0.0).unwrap();
        let pos_zero = encode_float64(0.0).unwrap();
        // -0.0 == 0.0 numerically; their encodings need not be byte-identical
        // but must not violate the total order against a true negative value.
        let neg_one = encode_float64(-1.0).unwrap();
        assert!(neg_one < neg_zero);
        assert!(neg_one < pos_zero);
    }

    #[test]
    fn float64_rejects_nan() {
        assert!(encode_float64(f64::NAN).is_err());
    }
}
