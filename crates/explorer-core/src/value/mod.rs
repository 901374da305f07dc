//! Bit-level value representation engine.
//!
//! Converts fixed-width binary quantities, possibly containing don't-care
//! bits, between binary, hexadecimal, and decimal textual forms.

mod bits;
mod format;

pub use bits::{Bit, BitArray, ByteSwapError};
pub use format::{hex_literal, DisplayBase, ParseDisplayBaseError};
