//! Search suggestion state: the keyboard-driven session controller and the
//! bounded recent-searches cache it feeds.

mod recent;
mod session;

pub use recent::{RecentEntry, RecentSearches, MAX_RECENT};
pub use session::{NavKey, PanelState, SuggestionSession};
