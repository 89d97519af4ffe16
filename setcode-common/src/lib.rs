//! Common types for EIP-7702 set-code authorizations.
//!
//! This crate provides the plain value types shared by the delegation
//! codec and the authorization verifier: addresses, 256-bit words,
//! signature components, protocol constants and error codes.
//!
//! # Security Note
//!
//! These types carry untrusted data. Nothing here validates a signature
//! or a designator; that happens in the `setcode` crate.

#![no_std]

extern crate alloc;

pub mod error;
#[cfg(feature = "serde")]
pub mod serde_hex;
pub mod types;

pub use error::SetCodeError;
pub use types::*;
