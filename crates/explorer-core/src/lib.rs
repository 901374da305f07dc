//! Core explorer crate for Regscope.
//!
//! Loads a hardware register description document, renders fixed-width field
//! values across numeral bases (including don't-care bits), and drives
//! name-substring search with keyboard navigation and recent-search memory.

/// Bit-level value representation engine.
pub mod value;
pub use value::{hex_literal, Bit, BitArray, ByteSwapError, DisplayBase, ParseDisplayBaseError};

/// Register description document model.
pub mod document;
pub use document::{
    leaf_name, DesignRoot, ElementKind, Register, RegisterDescriptionFile, RegisterField,
    ResetValue,
};

/// In-memory register store with atomic reload semantics.
pub mod store;
pub use store::{DanglingChild, LoadError, LoadSummary, RegisterStore};

/// Name-substring search over the loaded element set.
pub mod search;
pub use search::SearchIndex;

/// Suggestion session state machine and recent-search cache.
pub mod suggest;
pub use suggest::{NavKey, PanelState, RecentEntry, RecentSearches, SuggestionSession, MAX_RECENT};

/// View preferences for value rendering.
pub mod config;
pub use config::ViewConfig;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
