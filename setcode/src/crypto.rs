//! Cryptographic primitives for authority recovery.
//!
//! This module provides:
//! - Keccak256 hashing (Ethereum's hash function)
//! - The `PublicKeyRecoverer` capability and its secp256k1 backend
//! - Address derivation and EIP-55 formatting
//!
//! Recovery is injected through a trait so validation logic can be
//! exercised against deterministic fakes and the curve backend swapped
//! without touching it.

use k256::{
    ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
    PublicKey,
};
use setcode_common::{EthAddress, Hash256, SetCodeError, UncompressedPublicKey, Word};
use tiny_keccak::{Hasher as KeccakHasher, Keccak};

// =============================================================================
// Keccak256
// =============================================================================

/// Keccak256 hash function as used by Ethereum.
pub fn keccak256(data: &[u8]) -> Hash256 {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

// =============================================================================
// Public Key Recovery
// =============================================================================

/// Recovers the signer's public key from a prehashed message and signature.
///
/// Implementations only perform curve arithmetic. Range checks on `r`, `s`
/// and the recovery id are the caller's job and have already passed when
/// this is invoked.
pub trait PublicKeyRecoverer {
    /// Returns the SEC1 uncompressed public key that produced `(r, s)` over
    /// `digest`, or `SetCodeError::RecoveryFailed` if there is none.
    fn recover(
        &self,
        digest: &Hash256,
        r: &Word,
        s: &Word,
        recovery_id: u8,
    ) -> Result<UncompressedPublicKey, SetCodeError>;
}

impl<R: PublicKeyRecoverer + ?Sized> PublicKeyRecoverer for &R {
    fn recover(
        &self,
        digest: &Hash256,
        r: &Word,
        s: &Word,
        recovery_id: u8,
    ) -> Result<UncompressedPublicKey, SetCodeError> {
        (**self).recover(digest, r, s, recovery_id)
    }
}

/// secp256k1 recovery backed by the k256 crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recoverer;

impl PublicKeyRecoverer for Secp256k1Recoverer {
    fn recover(
        &self,
        digest: &Hash256,
        r: &Word,
        s: &Word,
        recovery_id: u8,
    ) -> Result<UncompressedPublicKey, SetCodeError> {
        let mut rs = [0u8; 64];
        rs[..32].copy_from_slice(r);
        rs[32..].copy_from_slice(s);

        let signature = K256Signature::from_slice(&rs).map_err(|_| SetCodeError::RecoveryFailed)?;
        let recid = RecoveryId::from_byte(recovery_id).ok_or(SetCodeError::RecoveryFailed)?;

        let verifying_key = VerifyingKey::recover_from_prehash(digest, &signature, recid)
            .map_err(|_| SetCodeError::RecoveryFailed)?;

        let pubkey = PublicKey::from(&verifying_key);
        let encoded = pubkey.to_encoded_point(false);

        let mut out = [0u8; 65];
        out.copy_from_slice(encoded.as_bytes());
        Ok(out)
    }
}

// =============================================================================
// Addresses
// =============================================================================

/// Get Ethereum address from an uncompressed public key.
///
/// Address = keccak256(pubkey[1..])[12..32]
/// (Skip the 0x04 prefix of the uncompressed key, take last 20 bytes of hash)
pub fn public_key_to_address(pubkey: &UncompressedPublicKey) -> EthAddress {
    let hash = keccak256(&pubkey[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Format address with EIP-55 checksum.
pub fn format_address_checksummed(address: &EthAddress) -> [u8; 42] {
    let hex_lower = hex::encode(address);
    let hash = keccak256(hex_lower.as_bytes());

    let mut result = [0u8; 42];
    result[0] = b'0';
    result[1] = b'x';

    for (i, c) in hex_lower.bytes().enumerate() {
        let hash_byte = hash[i / 2];
        let nibble = if i % 2 == 0 {
            hash_byte >> 4
        } else {
            hash_byte & 0x0F
        };

        result[2 + i] = if c.is_ascii_alphabetic() && nibble >= 8 {
            c.to_ascii_uppercase()
        } else {
            c
        };
    }

    result
}
