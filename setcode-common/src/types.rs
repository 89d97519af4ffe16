//! Core value types for set-code authorizations.
//!
//! Integers wider than 64 bits are carried as big-endian 32-byte words so
//! that range checks are plain lexicographic comparisons.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ethereum address (20 bytes).
pub type EthAddress = [u8; 20];

/// Keccak256 hash (32 bytes).
pub type Hash256 = [u8; 32];

/// Unsigned 256-bit integer, big-endian.
pub type Word = [u8; 32];

/// SEC1 uncompressed public key (0x04 || x || y).
pub type UncompressedPublicKey = [u8; 65];

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Marker that turns account code into a delegation designator.
pub const DELEGATION_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];

/// Total size of a delegation designator (prefix + address).
pub const DELEGATION_LENGTH: usize = DELEGATION_PREFIX.len() + ADDRESS_LENGTH;

/// EIP-7702 magic byte prepended to the signed authorization payload.
pub const SET_CODE_MAGIC: u8 = 0x05;

/// Order of the secp256k1 group.
pub const SECP256K1_N: Word = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// `SECP256K1_N / 2`, the largest accepted `s` value.
pub const SECP256K1_HALF_N: Word = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Builds a word from a u64.
pub fn word_from_u64(value: u64) -> Word {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Returns true if every byte of the word is zero.
#[inline]
pub fn word_is_zero(word: &Word) -> bool {
    word.iter().all(|&b| b == 0)
}

/// Returns the word without its leading zero bytes (empty for zero).
pub fn word_trimmed(word: &Word) -> &[u8] {
    let start = word.iter().position(|&b| b != 0).unwrap_or(word.len());
    &word[start..]
}

// =============================================================================
// Signature
// =============================================================================

/// ECDSA signature components of an authorization tuple.
///
/// Unlike legacy transactions there is no EIP-155 folding: `y_parity` is
/// the bare recovery id and must be 0 or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature {
    /// Recovery identifier (0 or 1).
    #[cfg_attr(
        feature = "serde",
        serde(rename = "yParity", alias = "v", with = "crate::serde_hex::quantity_u8")
    )]
    pub y_parity: u8,
    /// R component (32 bytes, big-endian).
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hex::quantity_word"))]
    pub r: Word,
    /// S component (32 bytes, big-endian).
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hex::quantity_word"))]
    pub s: Word,
}

impl Signature {
    /// Creates a signature from its components.
    pub fn new(y_parity: u8, r: Word, s: Word) -> Self {
        Self { y_parity, r, s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift_right_one(word: &Word) -> Word {
        let mut out = [0u8; 32];
        let mut carry = 0u8;
        for (i, &byte) in word.iter().enumerate() {
            out[i] = (byte >> 1) | carry;
            carry = byte << 7;
        }
        out
    }

    #[test]
    fn test_half_order_matches_order() {
        assert_eq!(shift_right_one(&SECP256K1_N), SECP256K1_HALF_N);
        assert!(SECP256K1_HALF_N < SECP256K1_N);
    }

    #[test]
    fn test_delegation_length() {
        assert_eq!(DELEGATION_LENGTH, 23);
    }

    #[test]
    fn test_word_from_u64() {
        let word = word_from_u64(0xde9fb);
        assert_eq!(&word[29..], &[0x0d, 0xe9, 0xfb]);
        assert!(word[..29].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_word_trimmed() {
        assert!(word_trimmed(&[0u8; 32]).is_empty());
        assert_eq!(word_trimmed(&word_from_u64(0x0100)), &[0x01, 0x00]);
        assert!(word_is_zero(&[0u8; 32]));
        assert!(!word_is_zero(&word_from_u64(1)));
    }
}
