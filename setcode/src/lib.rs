//! EIP-7702 set-code primitives.
//!
//! This crate provides the two validity checks a set-code transaction
//! pipeline needs:
//! - [`delegation`]: recognizing a delegation designator
//!   (`0xef 0x01 0x00 || address`) in account code
//! - [`authorization`]: recovering the authority of a signed
//!   `(chain_id, address, nonce, signature)` tuple
//!
//! Both are pure functions over caller-owned data; there is no shared
//! state, so they may be called from any number of threads.
//!
//! # Security
//!
//! All input is untrusted. Parsers fail closed, signature components are
//! range-checked before any curve arithmetic, and high-s signatures are
//! rejected.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod authorization;
pub mod crypto;
pub mod delegation;
pub mod rlp;

pub use authorization::{
    decode_authorization_list, encode_authorization_list, recover_authorities, validate_signature,
    SetCodeAuthorization,
};
pub use crypto::{keccak256, PublicKeyRecoverer, Secp256k1Recoverer};
pub use delegation::{address_to_delegation, parse_delegation, DelegationDesignator};
pub use setcode_common::{
    EthAddress, Hash256, SetCodeError, Signature, Word, DELEGATION_LENGTH, DELEGATION_PREFIX,
};
