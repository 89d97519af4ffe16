//! EIP-7702 set-code authorization tuples.
//!
//! An authorization lets an account (the *authority*) install a delegation
//! designator pointing at `address`. The authority is never stored; it is
//! recovered from the signature over
//! `keccak256(0x05 || rlp([chain_id, address, nonce]))` each time it is
//! asked for.
//!
//! # Security
//!
//! - Range checks run before any curve arithmetic
//! - High-s signatures are rejected (no malleability)
//! - The zero address is never returned as an authority

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use setcode_common::{
    word_is_zero, EthAddress, Hash256, SetCodeError, Signature, Word, SECP256K1_HALF_N,
    SECP256K1_N, SET_CODE_MAGIC,
};

use crate::crypto::{
    format_address_checksummed, keccak256, public_key_to_address, PublicKeyRecoverer,
    Secp256k1Recoverer,
};
use crate::rlp::{self, RlpItem};

/// Number of RLP fields in a signed authorization tuple.
const SIGNED_TUPLE_FIELDS: usize = 6;

/// A signed set-code authorization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SetCodeAuthorization {
    /// Chain the authorization is valid on (zero for any chain).
    #[cfg_attr(
        feature = "serde",
        serde(with = "setcode_common::serde_hex::quantity_word")
    )]
    pub chain_id: Word,
    /// Delegation target.
    #[cfg_attr(feature = "serde", serde(with = "setcode_common::serde_hex::address"))]
    pub address: EthAddress,
    /// Authority account nonce this authorization is bound to.
    #[cfg_attr(
        feature = "serde",
        serde(with = "setcode_common::serde_hex::quantity_u64")
    )]
    pub nonce: u64,
    /// Signature by the authority.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub signature: Signature,
}

impl SetCodeAuthorization {
    /// Creates an authorization from its fields.
    pub fn new(chain_id: Word, address: EthAddress, nonce: u64, signature: Signature) -> Self {
        Self {
            chain_id,
            address,
            nonce,
            signature,
        }
    }

    /// Returns the bytes the authority signs: `0x05 || rlp([chain_id, address, nonce])`.
    pub fn signing_message(&self) -> Vec<u8> {
        let mut fields = Vec::with_capacity(64);
        fields.extend_from_slice(&rlp::encode_word(&self.chain_id));
        fields.extend_from_slice(&rlp::encode_bytes(&self.address));
        fields.extend_from_slice(&rlp::encode_u64(self.nonce));

        let list = rlp::encode_list(&fields);
        let mut message = Vec::with_capacity(1 + list.len());
        message.push(SET_CODE_MAGIC);
        message.extend_from_slice(&list);
        message
    }

    /// Returns the digest handed to signature recovery.
    pub fn signing_hash(&self) -> Hash256 {
        keccak256(&self.signing_message())
    }

    /// Recovers the authority with the built-in secp256k1 backend.
    pub fn authority(&self) -> Result<EthAddress, SetCodeError> {
        self.authority_with(&Secp256k1Recoverer)
    }

    /// Recovers the authority with the given recovery backend.
    pub fn authority_with<R: PublicKeyRecoverer>(
        &self,
        recoverer: &R,
    ) -> Result<EthAddress, SetCodeError> {
        let sig = &self.signature;
        if let Err(e) = validate_signature(sig) {
            log::debug!("setcode: rejecting authorization signature: {}", e);
            return Err(e);
        }

        let digest = self.signing_hash();
        let pubkey = recoverer
            .recover(&digest, &sig.r, &sig.s, sig.y_parity)
            .map_err(|e| {
                log::debug!("setcode: public key recovery failed: {}", e);
                SetCodeError::RecoveryFailed
            })?;

        if pubkey[0] != 0x04 {
            log::debug!("setcode: recovered key is not SEC1 uncompressed");
            return Err(SetCodeError::RecoveryFailed);
        }

        let authority = checked_authority(public_key_to_address(&pubkey))?;
        if log::log_enabled!(log::Level::Trace) {
            let formatted = format_address_checksummed(&authority);
            log::trace!(
                "setcode: authority {} for nonce {}",
                core::str::from_utf8(&formatted).unwrap_or("?"),
                self.nonce
            );
        }
        Ok(authority)
    }

    /// Encodes the signed tuple as `rlp([chain_id, address, nonce, y_parity, r, s])`.
    pub fn encode_rlp(&self) -> Vec<u8> {
        rlp::encode_list(&self.encode_fields())
    }

    /// Decodes a signed tuple from its RLP form.
    pub fn decode_rlp(data: &[u8]) -> Result<Self, SetCodeError> {
        let item = rlp::decode_exact(data)?;
        Self::from_rlp_item(&item)
    }

    fn encode_fields(&self) -> Vec<u8> {
        let mut fields = Vec::with_capacity(128);
        fields.extend_from_slice(&rlp::encode_word(&self.chain_id));
        fields.extend_from_slice(&rlp::encode_bytes(&self.address));
        fields.extend_from_slice(&rlp::encode_u64(self.nonce));
        fields.extend_from_slice(&rlp::encode_u64(self.signature.y_parity as u64));
        fields.extend_from_slice(&rlp::encode_word(&self.signature.r));
        fields.extend_from_slice(&rlp::encode_word(&self.signature.s));
        fields
    }

    fn from_rlp_item(item: &RlpItem<'_>) -> Result<Self, SetCodeError> {
        let fields = item.as_list().ok_or(SetCodeError::InvalidEncoding)?;
        if fields.len() != SIGNED_TUPLE_FIELDS {
            return Err(SetCodeError::InvalidEncoding);
        }

        let chain_id = fields[0].as_word().ok_or(SetCodeError::InvalidEncoding)?;
        let address = fields[1].as_address().ok_or(SetCodeError::InvalidEncoding)?;
        let nonce = fields[2].as_u64().ok_or(SetCodeError::InvalidEncoding)?;
        let y_parity = fields[3]
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or(SetCodeError::InvalidEncoding)?;
        let r = fields[4].as_word().ok_or(SetCodeError::InvalidEncoding)?;
        let s = fields[5].as_word().ok_or(SetCodeError::InvalidEncoding)?;

        Ok(Self::new(
            chain_id,
            address,
            nonce,
            Signature::new(y_parity, r, s),
        ))
    }
}

/// Checks signature component ranges.
///
/// Requires `y_parity` in {0, 1}, `0 < r < n` and `0 < s <= n/2`.
pub fn validate_signature(sig: &Signature) -> Result<(), SetCodeError> {
    if sig.y_parity > 1 {
        return Err(SetCodeError::InvalidSignature);
    }
    if word_is_zero(&sig.r) || sig.r >= SECP256K1_N {
        return Err(SetCodeError::InvalidSignature);
    }
    if word_is_zero(&sig.s) || sig.s > SECP256K1_HALF_N {
        return Err(SetCodeError::InvalidSignature);
    }
    Ok(())
}

/// Rejects the zero address, which means "no authority" elsewhere.
fn checked_authority(address: EthAddress) -> Result<EthAddress, SetCodeError> {
    if address == [0u8; 20] {
        return Err(SetCodeError::RecoveryFailed);
    }
    Ok(address)
}

/// Decodes the authorization list of a set-code transaction.
pub fn decode_authorization_list(data: &[u8]) -> Result<Vec<SetCodeAuthorization>, SetCodeError> {
    let item = rlp::decode_exact(data)?;
    let entries = item.as_list().ok_or(SetCodeError::InvalidEncoding)?;
    entries
        .iter()
        .map(SetCodeAuthorization::from_rlp_item)
        .collect()
}

/// Encodes an authorization list.
pub fn encode_authorization_list(list: &[SetCodeAuthorization]) -> Vec<u8> {
    let mut items = Vec::new();
    for auth in list {
        items.extend_from_slice(&auth.encode_rlp());
    }
    rlp::encode_list(&items)
}

/// Recovers the authority of every tuple, in order.
///
/// A failing tuple does not affect the others.
pub fn recover_authorities(list: &[SetCodeAuthorization]) -> Vec<Result<EthAddress, SetCodeError>> {
    list.iter().map(SetCodeAuthorization::authority).collect()
}
