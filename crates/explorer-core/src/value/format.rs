//! Textual rendering of bit-array values across numeral bases.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::bits::{Bit, BitArray};

/// Numeral base selection for value display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayBase {
    /// `0b`-prefixed binary, one digit per bit.
    Binary,
    /// Unprefixed, unpadded base-10.
    Decimal,
    /// `0x`-prefixed lowercase hexadecimal.
    #[default]
    Hexadecimal,
}

impl DisplayBase {
    /// Canonical lowercase name of this base.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Decimal => "decimal",
            Self::Hexadecimal => "hexadecimal",
        }
    }
}

impl fmt::Display for DisplayBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a display-base name cannot be recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown display base: {0:?} (expected binary, decimal, or hexadecimal)")]
pub struct ParseDisplayBaseError(String);

impl FromStr for DisplayBase {
    type Err = ParseDisplayBaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(Self::Binary),
            "decimal" | "dec" => Ok(Self::Decimal),
            "hexadecimal" | "hex" => Ok(Self::Hexadecimal),
            _ => Err(ParseDisplayBaseError(s.to_owned())),
        }
    }
}

/// Renders an unsigned value as an unpadded lowercase `0x` literal.
///
/// Used for address display: `0` renders `0x0`, `16` renders `0x10`.
#[must_use]
pub fn hex_literal(value: u128) -> String {
    format!("{value:#x}")
}

impl BitArray {
    /// Renders this array in the requested base.
    ///
    /// Fully-known values render as unsigned integers: hexadecimal is
    /// lowercase and zero-padded to `ceil(nbits / 4)` digits (the value zero
    /// renders `0x0` at every width), binary always carries exactly `nbits`
    /// digits, decimal is never padded. When any bit is unknown, binary
    /// substitutes `?` per digit positionally while hexadecimal and decimal
    /// degrade to the single placeholder `?` — a partially-unknown value has
    /// no meaningful digit rendering in those bases.
    #[must_use]
    pub fn to_base_string(&self, base: DisplayBase) -> String {
        match base {
            DisplayBase::Binary => self.to_binary_string(),
            DisplayBase::Decimal => self
                .value()
                .map_or_else(|| "?".to_owned(), |value| value.to_string()),
            DisplayBase::Hexadecimal => {
                if self.is_fully_known() {
                    self.to_hex_string()
                } else {
                    "?".to_owned()
                }
            }
        }
    }

    /// Renders the `0b`-prefixed digit string, most-significant digit first.
    fn to_binary_string(&self) -> String {
        let digits: String = self
            .bits()
            .iter()
            .rev()
            .map(|bit| bit.to_digit())
            .collect();
        format!("0b{digits}")
    }

    /// Renders the padded lowercase hex string of a fully-known array.
    ///
    /// Built nibble-wise from the bits so that widths beyond the integer
    /// conversion range still render exactly.
    fn to_hex_string(&self) -> String {
        if self.bits().iter().all(|bit| *bit == Bit::Zero) {
            return "0x0".to_owned();
        }

        let digits: String = self
            .bits()
            .chunks(4)
            .rev()
            .map(|nibble| {
                let value = nibble
                    .iter()
                    .enumerate()
                    .filter(|(_, bit)| **bit == Bit::One)
                    .fold(0_u32, |acc, (index, _)| acc | (1 << index));
                char::from_digit(value, 16).unwrap_or('0')
            })
            .collect();
        format!("0x{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::super::bits::{Bit, BitArray};
    use super::{hex_literal, DisplayBase};

    #[test]
    fn hex_literal_is_lowercase_and_unpadded() {
        assert_eq!(hex_literal(0), "0x0");
        assert_eq!(hex_literal(16), "0x10");
        assert_eq!(hex_literal(305_441_741), "0x1234abcd");
    }

    #[test]
    fn all_zero_arrays_render_canonically_at_every_width() {
        for nbits in [1, 4, 13, 32, 130] {
            let array = BitArray::zero(nbits);
            assert_eq!(array.to_base_string(DisplayBase::Hexadecimal), "0x0");
            assert_eq!(
                array.to_base_string(DisplayBase::Binary),
                format!("0b{}", "0".repeat(nbits))
            );
            assert_eq!(array.to_base_string(DisplayBase::Decimal), "0");
        }
    }

    #[test]
    fn hexadecimal_pads_nonzero_values_to_width_digits() {
        let array = BitArray::from_value(0xABCD, 32);
        assert_eq!(array.to_base_string(DisplayBase::Hexadecimal), "0x0000abcd");

        let narrow = BitArray::from_value(0xAF, 8);
        assert_eq!(narrow.to_base_string(DisplayBase::Hexadecimal), "0xaf");

        let odd_width = BitArray::from_value(0x5, 5);
        assert_eq!(odd_width.to_base_string(DisplayBase::Hexadecimal), "0x05");
    }

    #[test]
    fn binary_carries_exactly_width_digits() {
        let array = BitArray::from_value(0b1111, 8);
        assert_eq!(array.to_base_string(DisplayBase::Binary), "0b00001111");
    }

    #[test]
    fn decimal_is_never_padded() {
        let array = BitArray::from_value(175, 32);
        assert_eq!(array.to_base_string(DisplayBase::Decimal), "175");
    }

    #[test]
    fn unknown_bits_render_positionally_in_binary_only() {
        // Bits LSB-first: [1, ?, 0, ?] renders MSB-first as ?0?1.
        let array = BitArray::from_bits(vec![Bit::One, Bit::Unknown, Bit::Zero, Bit::Unknown]);
        assert_eq!(array.to_base_string(DisplayBase::Binary), "0b?0?1");
        assert_eq!(array.to_base_string(DisplayBase::Hexadecimal), "?");
        assert_eq!(array.to_base_string(DisplayBase::Decimal), "?");
    }

    #[test]
    fn known_mixed_value_renders_in_all_bases() {
        let array = BitArray::from_bits(vec![
            Bit::One,
            Bit::One,
            Bit::One,
            Bit::One,
            Bit::Zero,
            Bit::One,
            Bit::Zero,
            Bit::One,
        ]);
        assert_eq!(array.to_base_string(DisplayBase::Hexadecimal), "0xaf");
        assert_eq!(array.to_base_string(DisplayBase::Binary), "0b10101111");
        assert_eq!(array.to_base_string(DisplayBase::Decimal), "175");
    }

    #[test]
    fn display_base_parses_full_and_short_names() {
        assert_eq!("binary".parse(), Ok(DisplayBase::Binary));
        assert_eq!("hex".parse(), Ok(DisplayBase::Hexadecimal));
        assert_eq!("Decimal".parse(), Ok(DisplayBase::Decimal));
        assert!("octal".parse::<DisplayBase>().is_err());
    }

    #[test]
    fn display_base_default_is_hexadecimal() {
        assert_eq!(DisplayBase::default(), DisplayBase::Hexadecimal);
    }
}
