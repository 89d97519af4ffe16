//! Error codes for set-code authorization processing.
//!
//! Messages are terse; callers decide whether a failure invalidates the
//! whole transaction or is a routine "not delegated" outcome.

use core::fmt;
use num_derive::{FromPrimitive, ToPrimitive};

/// Error codes for delegation parsing and authority recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum SetCodeError {
    /// Code is not a delegation designator (wrong length or prefix).
    MalformedDelegation = 0x01,

    /// Signature component out of range (zero, above the curve order,
    /// high-s, or y-parity not 0/1).
    InvalidSignature = 0x02,

    /// No public key corresponds to the signature, or it maps to the
    /// zero address.
    RecoveryFailed = 0x03,

    /// Malformed or non-canonical RLP for an authorization tuple.
    InvalidEncoding = 0x04,
}

impl SetCodeError {
    /// Returns the error code as a u8.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for SetCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetCodeError::MalformedDelegation => write!(f, "Malformed delegation"),
            SetCodeError::InvalidSignature => write!(f, "Invalid signature"),
            SetCodeError::RecoveryFailed => write!(f, "Recovery failed"),
            SetCodeError::InvalidEncoding => write!(f, "Invalid encoding"),
        }
    }
}
