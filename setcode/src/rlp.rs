//! RLP (Recursive Length Prefix) codec for authorization tuples.
//!
//! Only what set-code authorizations need: bounded decoding of untrusted
//! input and canonical encoding of byte strings, integers and lists.
//!
//! # Encoding rules
//!
//! - Single byte [0x00, 0x7f]: itself
//! - String [0x80, 0xb7]: 0x80 + len, then data
//! - String [0xb8, 0xbf]: 0xb7 + len_of_len, then len, then data
//! - List [0xc0, 0xf7]: 0xc0 + len, then items
//! - List [0xf8, 0xff]: 0xf7 + len_of_len, then len, then items
//!
//! # Security
//!
//! - Validates all length fields before access
//! - Rejects non-canonical encodings
//! - Bounded recursion depth (max 16)

use alloc::vec;
use alloc::vec::Vec;

use setcode_common::{word_trimmed, EthAddress, SetCodeError, Word};

/// Maximum RLP nesting depth.
const MAX_DEPTH: usize = 16;

/// RLP decoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlpError {
    /// Input is empty when data expected.
    EmptyInput,
    /// Input too short for declared length.
    UnexpectedEof,
    /// Non-canonical encoding (leading zeros in length).
    NonCanonical,
    /// Single byte should be encoded as itself.
    SingleByteMismatch,
    /// Length field is too large.
    LengthOverflow,
    /// Exceeded maximum nesting depth.
    TooDeep,
    /// Extra data after RLP item.
    TrailingData,
}

impl From<RlpError> for SetCodeError {
    fn from(_: RlpError) -> Self {
        SetCodeError::InvalidEncoding
    }
}

/// A decoded RLP item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem<'a> {
    /// A byte string (may be empty).
    String(&'a [u8]),
    /// A list of items.
    List(Vec<RlpItem<'a>>),
}

impl<'a> RlpItem<'a> {
    /// Returns the string data if this is a string item.
    pub fn as_string(&self) -> Option<&'a [u8]> {
        match self {
            RlpItem::String(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the list items if this is a list item.
    pub fn as_list(&self) -> Option<&[RlpItem<'a>]> {
        match self {
            RlpItem::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts string data to a u64 value (big-endian, canonical).
    pub fn as_u64(&self) -> Option<u64> {
        let data = self.as_string()?;
        if data.len() > 8 {
            return None;
        }
        if !data.is_empty() && data[0] == 0 {
            return None;
        }
        Some(data.iter().fold(0u64, |acc, &byte| acc << 8 | byte as u64))
    }

    /// Converts string data to a 256-bit word (big-endian, canonical).
    pub fn as_word(&self) -> Option<Word> {
        let data = self.as_string()?;
        if data.len() > 32 {
            return None;
        }
        if !data.is_empty() && data[0] == 0 {
            return None;
        }
        let mut result = [0u8; 32];
        result[32 - data.len()..].copy_from_slice(data);
        Some(result)
    }

    /// Converts string data to a 20-byte address.
    pub fn as_address(&self) -> Option<EthAddress> {
        let data = self.as_string()?;
        if data.len() != 20 {
            return None;
        }
        let mut addr = [0u8; 20];
        addr.copy_from_slice(data);
        Some(addr)
    }
}

/// Decodes one RLP item from the front of the input.
pub fn decode(input: &[u8]) -> Result<(RlpItem<'_>, &[u8]), RlpError> {
    decode_internal(input, 0)
}

/// Decodes a complete RLP item, rejecting trailing data.
pub fn decode_exact(input: &[u8]) -> Result<RlpItem<'_>, RlpError> {
    let (item, rest) = decode(input)?;
    if !rest.is_empty() {
        return Err(RlpError::TrailingData);
    }
    Ok(item)
}

fn decode_internal(input: &[u8], depth: usize) -> Result<(RlpItem<'_>, &[u8]), RlpError> {
    if depth > MAX_DEPTH {
        return Err(RlpError::TooDeep);
    }

    let first = *input.first().ok_or(RlpError::EmptyInput)?;

    match first {
        0x00..=0x7f => Ok((RlpItem::String(&input[..1]), &input[1..])),

        0x80..=0xb7 => {
            let len = (first - 0x80) as usize;
            let (data, rest) = split_payload(input, 1, len)?;
            if len == 1 && data[0] < 0x80 {
                return Err(RlpError::SingleByteMismatch);
            }
            Ok((RlpItem::String(data), rest))
        }

        0xb8..=0xbf => {
            let len_of_len = (first - 0xb7) as usize;
            let len = decode_long_length(input, len_of_len)?;
            let (data, rest) = split_payload(input, 1 + len_of_len, len)?;
            Ok((RlpItem::String(data), rest))
        }

        0xc0..=0xf7 => {
            let len = (first - 0xc0) as usize;
            let (list_data, rest) = split_payload(input, 1, len)?;
            let items = decode_list_items(list_data, depth + 1)?;
            Ok((RlpItem::List(items), rest))
        }

        0xf8..=0xff => {
            let len_of_len = (first - 0xf7) as usize;
            let len = decode_long_length(input, len_of_len)?;
            let (list_data, rest) = split_payload(input, 1 + len_of_len, len)?;
            let items = decode_list_items(list_data, depth + 1)?;
            Ok((RlpItem::List(items), rest))
        }
    }
}

/// Splits `len` payload bytes starting at `start` from the remainder.
fn split_payload(input: &[u8], start: usize, len: usize) -> Result<(&[u8], &[u8]), RlpError> {
    let end = start.checked_add(len).ok_or(RlpError::LengthOverflow)?;
    if input.len() < end {
        return Err(RlpError::UnexpectedEof);
    }
    Ok((&input[start..end], &input[end..]))
}

/// Reads the length of a long string or list and checks it is canonical.
fn decode_long_length(input: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    let (len_bytes, _) = split_payload(input, 1, len_of_len)?;

    // Leading zeros in the length field
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonical);
    }

    let len = decode_length(len_bytes)?;

    // Short form must be used below 56 bytes
    if len < 56 {
        return Err(RlpError::NonCanonical);
    }
    Ok(len)
}

/// Decodes a big-endian length value.
fn decode_length(bytes: &[u8]) -> Result<usize, RlpError> {
    if bytes.len() > core::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow);
    }

    let mut len = 0usize;
    for &byte in bytes {
        len = len.checked_shl(8).ok_or(RlpError::LengthOverflow)?;
        len = len
            .checked_add(byte as usize)
            .ok_or(RlpError::LengthOverflow)?;
    }

    Ok(len)
}

fn decode_list_items(mut data: &[u8], depth: usize) -> Result<Vec<RlpItem<'_>>, RlpError> {
    let mut items = Vec::new();

    while !data.is_empty() {
        let (item, rest) = decode_internal(data, depth)?;
        items.push(item);
        data = rest;
    }

    Ok(items)
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes a u64 as RLP bytes.
pub fn encode_u64(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    encode_bytes(&bytes[start..])
}

/// Encodes a 256-bit word as a minimal big-endian RLP integer.
pub fn encode_word(value: &Word) -> Vec<u8> {
    encode_bytes(word_trimmed(value))
}

/// Encodes a byte slice as RLP.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    if data.len() == 1 && data[0] < 0x80 {
        return data.to_vec();
    }
    with_header(0x80, 0xb7, data)
}

/// Encodes a list of already-encoded items as RLP.
pub fn encode_list(items: &[u8]) -> Vec<u8> {
    with_header(0xc0, 0xf7, items)
}

fn with_header(short_base: u8, long_base: u8, payload: &[u8]) -> Vec<u8> {
    let mut result = if payload.len() <= 55 {
        vec![short_base + payload.len() as u8]
    } else {
        let len_bytes = encode_length_bytes(payload.len());
        let mut header = vec![long_base + len_bytes.len() as u8];
        header.extend_from_slice(&len_bytes);
        header
    };
    result.extend_from_slice(payload);
    result
}

/// Encodes a length as big-endian bytes.
fn encode_length_bytes(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_byte() {
        let (item, rest) = decode(&[0x42]).unwrap();
        assert_eq!(item.as_string(), Some(&[0x42][..]));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_decode_short_string() {
        let data = [0x83, b'c', b'a', b't'];
        let (item, rest) = decode(&data).unwrap();
        assert_eq!(item.as_string(), Some(&b"cat"[..]));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_decode_nested_list() {
        let (item, _) = decode(&[0xc1, 0xc0]).unwrap();
        let list = item.as_list().unwrap();
        assert_eq!(list.len(), 1);
        assert!(list[0].as_list().unwrap().is_empty());
    }

    #[test]
    fn test_decode_long_string() {
        let payload = [0xaa; 60];
        let encoded = encode_bytes(&payload);
        assert_eq!(&encoded[..2], &[0xb8, 60]);
        assert_eq!(
            decode_exact(&encoded).unwrap().as_string(),
            Some(&payload[..])
        );
    }

    #[test]
    fn test_non_canonical_single_byte() {
        assert_eq!(decode(&[0x81, 0x42]), Err(RlpError::SingleByteMismatch));
    }

    #[test]
    fn test_non_canonical_long_length() {
        // 3-byte string announced with the long form
        assert_eq!(
            decode(&[0xb8, 0x03, 0x01, 0x02, 0x03]),
            Err(RlpError::NonCanonical)
        );
        assert_eq!(decode(&[0xb9, 0x00, 0x40]), Err(RlpError::NonCanonical));
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(decode(&[0x83, b'c', b'a']), Err(RlpError::UnexpectedEof));
        assert_eq!(decode(&[]), Err(RlpError::EmptyInput));
        assert_eq!(decode(&[0xc2, 0x01]), Err(RlpError::UnexpectedEof));
    }

    #[test]
    fn test_trailing_data() {
        assert_eq!(decode_exact(&[0x01, 0x02]), Err(RlpError::TrailingData));
    }

    #[test]
    fn test_depth_limit() {
        let mut nested = vec![0xc0];
        for _ in 0..20 {
            nested = encode_list(&nested);
        }
        assert_eq!(decode(&nested), Err(RlpError::TooDeep));
    }

    #[test]
    fn test_integer_accessors_reject_leading_zeros() {
        let (item, _) = decode(&[0x82, 0x04, 0x00]).unwrap();
        assert_eq!(item.as_u64(), Some(1024));
        assert_eq!(
            item.as_word().map(|w| w[30..].to_vec()),
            Some(vec![0x04, 0x00])
        );

        let (item, _) = decode(&[0x82, 0x00, 0x04]).unwrap();
        assert_eq!(item.as_u64(), None);
        assert_eq!(item.as_word(), None);

        let (item, _) = decode(&[0x80]).unwrap();
        assert_eq!(item.as_u64(), Some(0));
        assert_eq!(item.as_word(), Some([0u8; 32]));
    }

    #[test]
    fn test_encode_u64() {
        assert_eq!(encode_u64(0), vec![0x80]);
        assert_eq!(encode_u64(127), vec![0x7f]);
        assert_eq!(encode_u64(128), vec![0x81, 0x80]);
        assert_eq!(encode_u64(256), vec![0x82, 0x01, 0x00]);
    }

    #[test]
    fn test_encode_word() {
        assert_eq!(encode_word(&[0u8; 32]), vec![0x80]);
        let mut word = [0u8; 32];
        word[29..].copy_from_slice(&[0x0d, 0xe9, 0xfb]);
        assert_eq!(encode_word(&word), vec![0x83, 0x0d, 0xe9, 0xfb]);
        assert_eq!(encode_word(&[0xff; 32]).len(), 33);
    }

    #[test]
    fn test_encode_bytes() {
        assert_eq!(encode_bytes(b""), vec![0x80]);
        assert_eq!(encode_bytes(&[0x42]), vec![0x42]);
        assert_eq!(encode_bytes(&[0x80]), vec![0x81, 0x80]);
        assert_eq!(encode_bytes(b"cat"), vec![0x83, b'c', b'a', b't']);
    }
}
