//! View preferences applied when rendering field values.

use crate::value::{BitArray, DisplayBase};

/// Immutable presentation configuration for value rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct ViewConfig {
    /// Numeral base used for field and register values.
    pub display_base: DisplayBase,
    /// Whether values display with whole-byte order swapped.
    pub byte_swap: bool,
}

impl ViewConfig {
    /// Renders a value under this configuration.
    ///
    /// Byte swapping only applies to widths that divide into whole bytes;
    /// other widths render unswapped (the permutation would corrupt bit
    /// order, so it is skipped rather than approximated).
    #[must_use]
    pub fn render(self, value: &BitArray) -> String {
        if self.byte_swap {
            if let Ok(swapped) = value.byte_swapped() {
                return swapped.to_base_string(self.display_base);
            }
        }
        value.to_base_string(self.display_base)
    }
}
