//! Delegation designator codec.
//!
//! A delegated account's code is exactly `0xef 0x01 0x00 || address`.
//! Anything else is ordinary code (or garbage), which is a routine outcome
//! rather than an error, so the primary entry point returns an `Option`.

use setcode_common::{EthAddress, SetCodeError, DELEGATION_LENGTH, DELEGATION_PREFIX};

/// A parsed delegation designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelegationDesignator {
    /// Address that code execution is redirected to.
    pub target: EthAddress,
}

impl DelegationDesignator {
    /// Creates a designator pointing at `target`.
    pub fn new(target: EthAddress) -> Self {
        Self { target }
    }

    /// Parses account code as a designator.
    ///
    /// Fails with `MalformedDelegation` unless `code` is exactly 23 bytes
    /// starting with the full 3-byte prefix.
    pub fn parse(code: &[u8]) -> Result<Self, SetCodeError> {
        parse_delegation(code)
            .map(Self::new)
            .ok_or(SetCodeError::MalformedDelegation)
    }

    /// Returns the 23-byte wire form.
    pub fn to_bytes(&self) -> [u8; DELEGATION_LENGTH] {
        address_to_delegation(&self.target)
    }
}

/// Returns the delegation target if `code` is a delegation designator.
pub fn parse_delegation(code: &[u8]) -> Option<EthAddress> {
    if code.len() != DELEGATION_LENGTH {
        return None;
    }
    let (prefix, target) = code.split_at(DELEGATION_PREFIX.len());
    if prefix != DELEGATION_PREFIX {
        return None;
    }
    target.try_into().ok()
}

/// Builds the delegation designator for `address`.
pub fn address_to_delegation(address: &EthAddress) -> [u8; DELEGATION_LENGTH] {
    let mut code = [0u8; DELEGATION_LENGTH];
    code[..DELEGATION_PREFIX.len()].copy_from_slice(&DELEGATION_PREFIX);
    code[DELEGATION_PREFIX.len()..].copy_from_slice(address);
    code
}
