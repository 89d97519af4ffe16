//! Hex encodings used by the JSON form of authorization tuples.
//!
//! Quantities are `0x`-prefixed, lowercase on output, with no leading
//! zero digits (`0x0` is zero). Addresses are `0x` plus exactly 40 hex
//! digits.

use alloc::format;
use alloc::string::String;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::types::{word_trimmed, EthAddress, Word};

/// Strips the `0x` prefix and checks the digits of a hex quantity.
fn quantity_digits(text: &str) -> Result<&str, &'static str> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .ok_or("hex quantity without 0x prefix")?;
    if digits.is_empty() {
        return Err("empty hex quantity");
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err("hex quantity with leading zero digits");
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err("invalid hex digit");
    }
    Ok(digits)
}

/// Parses a hex quantity into a u64.
pub fn parse_quantity_u64(text: &str) -> Result<u64, &'static str> {
    let digits = quantity_digits(text)?;
    if digits.len() > 16 {
        return Err("hex quantity exceeds 64 bits");
    }
    u64::from_str_radix(digits, 16).map_err(|_| "invalid hex quantity")
}

/// Parses a hex quantity into a 256-bit word.
pub fn parse_quantity_word(text: &str) -> Result<Word, &'static str> {
    let digits = quantity_digits(text)?;
    if digits.len() > 64 {
        return Err("hex quantity exceeds 256 bits");
    }
    let mut padded = [b'0'; 64];
    padded[64 - digits.len()..].copy_from_slice(digits.as_bytes());
    let mut word = [0u8; 32];
    hex::decode_to_slice(padded, &mut word).map_err(|_| "invalid hex quantity")?;
    Ok(word)
}

/// Formats a 256-bit word as a hex quantity.
pub fn format_quantity_word(word: &Word) -> String {
    let digits = hex::encode(word_trimmed(word));
    match digits.strip_prefix('0') {
        Some(rest) => format!("0x{}", rest),
        None if digits.is_empty() => String::from("0x0"),
        None => format!("0x{}", digits),
    }
}

/// Parses a `0x`-prefixed 20-byte address.
pub fn parse_address(text: &str) -> Result<EthAddress, &'static str> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .ok_or("address without 0x prefix")?;
    if digits.len() != 40 {
        return Err("address must be 20 bytes");
    }
    let mut address = [0u8; 20];
    hex::decode_to_slice(digits, &mut address).map_err(|_| "invalid hex address")?;
    Ok(address)
}

/// Serde adapter for `u64` hex quantities.
pub mod quantity_u64 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:#x}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_quantity_u64(&text).map_err(D::Error::custom)
    }
}

/// Serde adapter for `u8` hex quantities (recovery ids).
pub mod quantity_u8 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:#x}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let text = String::deserialize(deserializer)?;
        let value = parse_quantity_u64(&text).map_err(D::Error::custom)?;
        u8::try_from(value).map_err(|_| D::Error::custom("hex quantity exceeds 8 bits"))
    }
}

/// Serde adapter for 256-bit hex quantities.
pub mod quantity_word {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Word, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_quantity_word(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Word, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_quantity_word(&text).map_err(D::Error::custom)
    }
}

/// Serde adapter for addresses.
pub mod address {
    use super::*;

    pub fn serialize<S: Serializer>(value: &EthAddress, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EthAddress, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_address(&text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{word_from_u64, Signature};

    #[test]
    fn test_parse_quantity_u64() {
        assert_eq!(parse_quantity_u64("0x0"), Ok(0));
        assert_eq!(parse_quantity_u64("0xde9fb"), Ok(0xde9fb));
        assert_eq!(parse_quantity_u64("0xffffffffffffffff"), Ok(u64::MAX));
        assert!(parse_quantity_u64("0x01").is_err());
        assert!(parse_quantity_u64("0x").is_err());
        assert!(parse_quantity_u64("12").is_err());
        assert!(parse_quantity_u64("0x+1").is_err());
        assert!(parse_quantity_u64("0x10000000000000000").is_err());
    }

    #[test]
    fn test_parse_quantity_word() {
        assert_eq!(parse_quantity_word("0x0"), Ok([0u8; 32]));
        assert_eq!(parse_quantity_word("0xde9fb"), Ok(word_from_u64(0xde9fb)));
        assert_eq!(
            parse_quantity_word(
                "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            ),
            Ok([0xff; 32])
        );
        assert!(parse_quantity_word(
            "0x1ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        )
        .is_err());
        assert!(parse_quantity_word("0xzz").is_err());
    }

    #[test]
    fn test_format_quantity_word() {
        assert_eq!(format_quantity_word(&[0u8; 32]), "0x0");
        assert_eq!(format_quantity_word(&word_from_u64(0xde9fb)), "0xde9fb");
        assert_eq!(format_quantity_word(&word_from_u64(0x10)), "0x10");
    }

    #[test]
    fn test_parse_address() {
        let address = parse_address("0xadeebe459e44222ed40fa615be9a929d2fa77893").unwrap();
        assert_eq!(address[0], 0xad);
        assert_eq!(address[19], 0x93);
        assert!(parse_address("0xadeebe459e44222ed40fa615be9a929d2fa778").is_err());
        assert!(parse_address("adeebe459e44222ed40fa615be9a929d2fa77893").is_err());
    }

    #[test]
    fn test_signature_json_field_names() {
        let json = r#"{"v":"0x1","r":"0x2","s":"0x3"}"#;
        let sig: Signature = serde_json::from_str(json).unwrap();
        assert_eq!(sig.y_parity, 1);
        assert_eq!(sig.r, word_from_u64(2));
        assert_eq!(sig.s, word_from_u64(3));

        let out = serde_json::to_string(&sig).unwrap();
        assert_eq!(out, r#"{"yParity":"0x1","r":"0x2","s":"0x3"}"#);
    }

    #[test]
    fn test_y_parity_overflow_rejected() {
        let json = r#"{"yParity":"0x100","r":"0x2","s":"0x3"}"#;
        assert!(serde_json::from_str::<Signature>(json).is_err());
    }
}
