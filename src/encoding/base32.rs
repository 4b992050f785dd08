//! Base32 symbols for action codes.
//!
//! Each symbol carries five bits. Two-symbol codes are big-endian: the
//! first symbol holds the high five bits.
//!
//! ```
//! use neolithic_rules::encoding::base32;
//!
//! assert_eq!(base32::encode_bits10(71).unwrap(), "CH");
//! assert_eq!(base32::decode("CH").unwrap(), 71);
//! ```

use thiserror::Error;

/// The 32 symbols, indexed by value.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const SYMBOLS: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const BITS_PER_SYMBOL: u32 = 5;
const SYMBOL_MASK: u32 = (1 << BITS_PER_SYMBOL) - 1;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: u32, bits: u32 },
    #[error("code {0:?} must have one or two symbols")]
    InvalidLength(String),
    #[error("{0:?} is not a base32 symbol")]
    InvalidSymbol(char),
}

fn symbol_value(symbol: char) -> Option<u32> {
    ALPHABET.find(symbol).map(|index| index as u32)
}

fn symbol(value: u32) -> char {
    char::from(SYMBOLS[(value & SYMBOL_MASK) as usize])
}

/// True if every character of `code` is a symbol of the alphabet.
#[must_use]
pub fn is_valid(code: &str) -> bool {
    code.chars().all(|c| symbol_value(c).is_some())
}

/// One symbol for a value in `0..32`.
pub fn encode_bits5(value: u32) -> Result<String, CodecError> {
    if value > SYMBOL_MASK {
        return Err(CodecError::ValueOutOfRange { value, bits: 5 });
    }
    Ok(symbol(value).to_string())
}

/// Two symbols for a value in `0..1024`.
pub fn encode_bits10(value: u32) -> Result<String, CodecError> {
    if value >> (2 * BITS_PER_SYMBOL) != 0 {
        return Err(CodecError::ValueOutOfRange { value, bits: 10 });
    }
    Ok([symbol(value >> BITS_PER_SYMBOL), symbol(value)].iter().collect())
}

/// Value of a one- or two-symbol code.
pub fn decode(code: &str) -> Result<u32, CodecError> {
    let length = code.chars().count();
    if !(1..=2).contains(&length) {
        return Err(CodecError::InvalidLength(code.to_string()));
    }
    code.chars().try_fold(0, |value, c| {
        let digit = symbol_value(c).ok_or(CodecError::InvalidSymbol(c))?;
        Ok((value << BITS_PER_SYMBOL) | digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alphabet() {
        assert_eq!(ALPHABET.len(), 32);
        assert_eq!(ALPHABET.as_bytes(), SYMBOLS);
        assert!(is_valid("AZ27"));
        assert!(!is_valid("A8"));
        assert!(!is_valid("a"));
    }

    #[test]
    fn test_known_values() {
        assert_eq!(encode_bits5(0).unwrap(), "A");
        assert_eq!(encode_bits5(31).unwrap(), "7");
        assert_eq!(encode_bits10(71).unwrap(), "CH");
        assert_eq!(encode_bits10(1023).unwrap(), "77");
        assert_eq!(decode("CH").unwrap(), 71);
        assert_eq!(decode("7").unwrap(), 31);
    }

    #[test]
    fn test_range_checks() {
        assert_eq!(encode_bits5(32), Err(CodecError::ValueOutOfRange { value: 32, bits: 5 }));
        assert_eq!(
            encode_bits10(1024),
            Err(CodecError::ValueOutOfRange { value: 1024, bits: 10 })
        );
    }

    #[test]
    fn test_decode_rejects_bad_codes() {
        assert_eq!(decode(""), Err(CodecError::InvalidLength(String::new())));
        assert_eq!(decode("ABC"), Err(CodecError::InvalidLength("ABC".to_string())));
        assert_eq!(decode("8"), Err(CodecError::InvalidSymbol('8')));
        assert_eq!(decode("A1"), Err(CodecError::InvalidSymbol('1')));
    }

    proptest! {
        #[test]
        fn test_bits10_round_trip(value in 0u32..1024) {
            let code = encode_bits10(value).unwrap();
            prop_assert_eq!(code.len(), 2);
            prop_assert!(is_valid(&code));
            prop_assert_eq!(decode(&code).unwrap(), value);
        }

        #[test]
        fn test_bits5_round_trip(value in 0u32..32) {
            prop_assert_eq!(decode(&encode_bits5(value).unwrap()).unwrap(), value);
        }
    }
}
