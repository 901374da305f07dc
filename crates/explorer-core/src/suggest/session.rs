//! Search-box suggestion session: live query, ranked results, and a cursor
//! for keyboard selection.
//!
//! The session is an explicit state machine driven synchronously by discrete
//! input events (focus, keystroke, arrow keys, commit, dismiss). The
//! rendering layer only needs the visible list, the cursor index, and the
//! derived panel state.

use crate::search::SearchIndex;
use crate::suggest::recent::RecentSearches;

/// Derived visibility state of the suggestion panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    /// Input blurred; no panel shown.
    Unfocused,
    /// Input focused with an empty query; the recents panel is shown (or a
    /// "no recent searches" placeholder when the recents list is empty).
    FocusedEmpty,
    /// Input focused with a non-empty query; the suggestions panel is shown.
    FocusedQuerying,
}

/// Cursor-movement keys the session responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// Retreat the cursor, clamped at the first item.
    Up,
    /// Advance the cursor, clamped at the last item.
    Down,
    /// Move the cursor off the list entirely.
    Left,
    /// Move the cursor onto the first item.
    Right,
}

/// Stateful controller binding a live query, its current results, and a
/// keyboard-selection cursor, interacting with a [`RecentSearches`] cache.
#[derive(Debug, Clone, Default)]
pub struct SuggestionSession {
    query: String,
    results: Vec<String>,
    cursor: Option<usize>,
    focused: bool,
}

impl SuggestionSession {
    /// Creates an unfocused session with no query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the current ranked result ids.
    #[must_use]
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Returns the cursor position within the visible list, when one item is
    /// highlighted.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns `true` while the input is focused.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns the derived panel state.
    #[must_use]
    pub fn panel_state(&self) -> PanelState {
        if self.focused {
            if self.query.is_empty() {
                PanelState::FocusedEmpty
            } else {
                PanelState::FocusedQuerying
            }
        } else {
            PanelState::Unfocused
        }
    }

    /// Focus event: opens the panel with no item pre-selected.
    pub fn focus(&mut self) {
        self.focused = true;
        self.cursor = None;
    }

    /// Escape or outside click: closes the panel without committing,
    /// clearing query and cursor.
    pub fn blur(&mut self) {
        self.focused = false;
        self.query.clear();
        self.results.clear();
        self.cursor = None;
    }

    /// Keystroke changing the query text.
    ///
    /// Results are recomputed through the index and the cursor resets so no
    /// item is pre-selected. An empty query returns to the recents panel.
    pub fn set_query(&mut self, text: &str, index: &SearchIndex) {
        self.focused = true;
        self.query.clear();
        self.query.push_str(text);
        self.cursor = None;
        self.results = index.query(&self.query).iter().map(|&id| id.to_owned()).collect();
    }

    /// Re-runs the current query after an index rebuild.
    ///
    /// Unlike a keystroke this keeps the cursor, clamping it when the
    /// result list shrinks beneath it.
    pub fn refresh(&mut self, index: &SearchIndex, recents: &RecentSearches) {
        self.results = index.query(&self.query).iter().map(|&id| id.to_owned()).collect();
        self.clamp_cursor(recents);
    }

    /// Arrow-key event moving the cursor over the visible list.
    pub fn navigate(&mut self, key: NavKey, recents: &RecentSearches) {
        let len = self.visible_len(recents);

        self.cursor = match key {
            NavKey::Down => match self.cursor {
                // From no selection the first press lands on the first item.
                None if len > 0 => Some(0),
                Some(index) if len > 0 => Some((index + 1).min(len - 1)),
                _ => None,
            },
            NavKey::Up => match self.cursor {
                Some(index) if len > 0 => Some(index.saturating_sub(1).min(len - 1)),
                // Up from no selection has nothing to retreat from.
                _ => None,
            },
            NavKey::Right if len > 0 => Some(0),
            NavKey::Right | NavKey::Left => None,
        };
    }

    /// Enter keypress: commits the highlighted item, or the sole result when
    /// nothing is highlighted.
    ///
    /// A commit records the id into `recents`, clears the query, returns the
    /// session to the unfocused state, and yields the navigation target.
    /// Returns `None` (leaving all state unchanged) when there is nothing
    /// unambiguous to commit.
    pub fn commit(&mut self, recents: &mut RecentSearches) -> Option<String> {
        let target = match self.cursor {
            Some(index) => self.visible_item(index, recents).map(str::to_owned),
            None if self.results.len() == 1 && !self.query.is_empty() => {
                self.results.first().cloned()
            }
            None => None,
        }?;

        self.finish_commit(&target, recents);
        Some(target)
    }

    /// Explicit click on the visible item at `index`; same effect as moving
    /// the cursor there and committing.
    pub fn commit_index(
        &mut self,
        index: usize,
        recents: &mut RecentSearches,
    ) -> Option<String> {
        let target = self.visible_item(index, recents).map(str::to_owned)?;
        self.finish_commit(&target, recents);
        Some(target)
    }

    /// Per-entry dismiss control on the recents panel: removes the entry and
    /// keeps the cursor within the shrunken list.
    pub fn dismiss_recent(&mut self, id: &str, recents: &mut RecentSearches) {
        recents.remove(id);
        self.clamp_cursor(recents);
    }

    /// Drops all session state (store reload).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of entries in the currently visible list: results while
    /// querying, recents otherwise.
    #[must_use]
    pub fn visible_len(&self, recents: &RecentSearches) -> usize {
        if self.query.is_empty() {
            recents.len()
        } else {
            self.results.len()
        }
    }

    /// The visible item at `index`, from results or recents per the current
    /// panel state.
    #[must_use]
    pub fn visible_item<'a>(&'a self, index: usize, recents: &'a RecentSearches) -> Option<&'a str> {
        if self.query.is_empty() {
            recents.get(index)
        } else {
            self.results.get(index).map(String::as_str)
        }
    }

    fn finish_commit(&mut self, target: &str, recents: &mut RecentSearches) {
        recents.record(target);
        self.query.clear();
        self.results.clear();
        self.cursor = None;
        self.focused = false;
    }

    fn clamp_cursor(&mut self, recents: &RecentSearches) {
        let len = self.visible_len(recents);
        self.cursor = match self.cursor {
            Some(_) if len == 0 => None,
            Some(index) => Some(index.min(len - 1)),
            None => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{NavKey, PanelState, SuggestionSession};
    use crate::search::SearchIndex;
    use crate::store::RegisterStore;
    use crate::suggest::recent::RecentSearches;

    const DOCUMENT: &str = r#"{
        "root": {"display_name": "Demo", "version": "0", "children": ["blkA"]},
        "elements": {
            "blkA": {"type": "blk", "name": "blkA", "children": ["blkA.regA0", "blkA.regA1", "blkA.regA2"]},
            "blkA.regA0": {"type": "reg", "name": "regA0"},
            "blkA.regA1": {"type": "reg", "name": "regA1"},
            "blkA.regA2": {"type": "reg", "name": "regA2"}
        }
    }"#;

    fn built_index() -> SearchIndex {
        let mut store = RegisterStore::new();
        store.load_json_str(DOCUMENT, "").expect("document parses");
        SearchIndex::build(&store)
    }

    #[test]
    fn starts_unfocused_with_no_panel() {
        let session = SuggestionSession::new();
        assert_eq!(session.panel_state(), PanelState::Unfocused);
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn focus_opens_the_recents_panel_with_no_selection() {
        let mut session = SuggestionSession::new();
        session.focus();
        assert_eq!(session.panel_state(), PanelState::FocusedEmpty);
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn typing_switches_between_querying_and_empty_states() {
        let index = built_index();
        let mut session = SuggestionSession::new();
        session.focus();

        session.set_query("reg", &index);
        assert_eq!(session.panel_state(), PanelState::FocusedQuerying);
        assert_eq!(session.results().len(), 3);

        session.set_query("", &index);
        assert_eq!(session.panel_state(), PanelState::FocusedEmpty);
        assert!(session.results().is_empty());
    }

    #[test]
    fn query_edits_reset_the_cursor() {
        let index = built_index();
        let recents = RecentSearches::new();
        let mut session = SuggestionSession::new();

        session.set_query("reg", &index);
        session.navigate(NavKey::Down, &recents);
        assert_eq!(session.cursor(), Some(0));

        session.set_query("regA", &index);
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn down_arrow_selects_first_then_clamps_at_last() {
        let index = built_index();
        let recents = RecentSearches::new();
        let mut session = SuggestionSession::new();
        session.set_query("reg", &index);

        session.navigate(NavKey::Down, &recents);
        assert_eq!(session.cursor(), Some(0));

        for _ in 0..10 {
            session.navigate(NavKey::Down, &recents);
        }
        assert_eq!(session.cursor(), Some(2));
    }

    #[test]
    fn up_arrow_clamps_at_first_and_ignores_no_selection() {
        let index = built_index();
        let recents = RecentSearches::new();
        let mut session = SuggestionSession::new();
        session.set_query("reg", &index);

        session.navigate(NavKey::Up, &recents);
        assert_eq!(session.cursor(), None);

        session.navigate(NavKey::Down, &recents);
        session.navigate(NavKey::Up, &recents);
        assert_eq!(session.cursor(), Some(0));

        session.navigate(NavKey::Up, &recents);
        assert_eq!(session.cursor(), Some(0));
    }

    #[test]
    fn left_and_right_move_the_cursor_off_and_onto_the_list() {
        let index = built_index();
        let recents = RecentSearches::new();
        let mut session = SuggestionSession::new();
        session.set_query("reg", &index);

        session.navigate(NavKey::Right, &recents);
        assert_eq!(session.cursor(), Some(0));

        session.navigate(NavKey::Down, &recents);
        session.navigate(NavKey::Left, &recents);
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn commit_on_cursor_records_and_unfocuses() {
        let index = built_index();
        let mut recents = RecentSearches::new();
        let mut session = SuggestionSession::new();

        session.set_query("reg", &index);
        session.navigate(NavKey::Down, &recents);
        session.navigate(NavKey::Down, &recents);

        let target = session.commit(&mut recents);
        assert_eq!(target.as_deref(), Some("blkA.regA1"));
        assert_eq!(session.panel_state(), PanelState::Unfocused);
        assert_eq!(session.query(), "");
        let ids: Vec<&str> = recents.ids().collect();
        assert_eq!(ids, ["blkA.regA1"]);
    }

    #[test]
    fn commit_without_cursor_needs_exactly_one_result() {
        let index = built_index();
        let mut recents = RecentSearches::new();
        let mut session = SuggestionSession::new();

        session.set_query("regA0", &index);
        assert_eq!(session.commit(&mut recents).as_deref(), Some("blkA.regA0"));

        session.set_query("reg", &index);
        assert_eq!(session.commit(&mut recents), None);
        // An ambiguous enter leaves the session querying.
        assert_eq!(session.panel_state(), PanelState::FocusedQuerying);
    }

    #[test]
    fn commit_from_the_recents_panel_reorders_recents() {
        let mut recents = RecentSearches::new();
        recents.record("blkA.regA0");
        recents.record("blkA.regA1");

        let mut session = SuggestionSession::new();
        session.focus();
        session.navigate(NavKey::Down, &recents);
        session.navigate(NavKey::Down, &recents);

        let target = session.commit(&mut recents);
        assert_eq!(target.as_deref(), Some("blkA.regA0"));
        let ids: Vec<&str> = recents.ids().collect();
        assert_eq!(ids, ["blkA.regA0", "blkA.regA1"]);
    }

    #[test]
    fn enter_in_an_empty_recents_panel_commits_nothing() {
        let mut recents = RecentSearches::new();
        let mut session = SuggestionSession::new();
        session.focus();
        assert_eq!(session.commit(&mut recents), None);
        assert_eq!(session.panel_state(), PanelState::FocusedEmpty);
    }

    #[test]
    fn click_commits_the_exact_item() {
        let index = built_index();
        let mut recents = RecentSearches::new();
        let mut session = SuggestionSession::new();
        session.set_query("reg", &index);

        let target = session.commit_index(2, &mut recents);
        assert_eq!(target.as_deref(), Some("blkA.regA2"));
        assert_eq!(session.commit_index(7, &mut recents), None);
    }

    #[test]
    fn blur_discards_without_committing() {
        let index = built_index();
        let mut recents = RecentSearches::new();
        let mut session = SuggestionSession::new();

        session.set_query("regA0", &index);
        session.navigate(NavKey::Down, &recents);
        session.blur();

        assert_eq!(session.panel_state(), PanelState::Unfocused);
        assert_eq!(session.query(), "");
        assert_eq!(session.cursor(), None);
        assert!(recents.is_empty());
    }

    #[test]
    fn dismissing_a_recent_clamps_the_cursor() {
        let mut recents = RecentSearches::new();
        recents.record("blkA.regA0");
        recents.record("blkA.regA1");

        let mut session = SuggestionSession::new();
        session.focus();
        session.navigate(NavKey::Down, &recents);
        session.navigate(NavKey::Down, &recents);
        assert_eq!(session.cursor(), Some(1));

        session.dismiss_recent("blkA.regA0", &mut recents);
        assert_eq!(session.cursor(), Some(0));

        session.dismiss_recent("blkA.regA1", &mut recents);
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn refresh_clamps_the_cursor_when_results_shrink() {
        let index = built_index();
        let recents = RecentSearches::new();
        let mut session = SuggestionSession::new();

        session.set_query("reg", &index);
        for _ in 0..3 {
            session.navigate(NavKey::Down, &recents);
        }
        assert_eq!(session.cursor(), Some(2));

        // Rebuild over a smaller document: only one register remains.
        let mut store = RegisterStore::new();
        store
            .load_json_str(
                r#"{
                    "root": {"display_name": "d", "version": "0", "children": []},
                    "elements": {"blkA.regA0": {"type": "reg", "name": "regA0"}}
                }"#,
                "",
            )
            .expect("document parses");
        let rebuilt = SearchIndex::build(&store);

        session.refresh(&rebuilt, &recents);
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.cursor(), Some(0));
    }
}
