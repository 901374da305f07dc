use explorer_core::{
    hex_literal, NavKey, RecentSearches, RegisterStore, SearchIndex, SuggestionSession, ViewConfig,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format!($($t)*)))
}

/// JS-compatible row of a register's field table.
#[derive(Serialize, Deserialize)]
pub struct WasmFieldView {
    pub name: String,
    pub access: String,
    pub bits: String,
    pub value: String,
    pub doc: String,
}

/// JS-compatible element summary used by the navigation tree.
#[derive(Serialize, Deserialize)]
pub struct WasmElementView {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub addr: Option<String>,
    pub children: Vec<String>,
}

#[wasm_bindgen]
pub struct WasmExplorer {
    store: RegisterStore,
    index: SearchIndex,
    session: SuggestionSession,
    recents: RecentSearches,
    config: ViewConfig,
}

impl Default for WasmExplorer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmExplorer {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            store: RegisterStore::new(),
            index: SearchIndex::default(),
            session: SuggestionSession::new(),
            recents: RecentSearches::new(),
            config: ViewConfig::default(),
        }
    }

    /// Loads register description JSON, replacing any previous document.
    /// Returns false (keeping the previous document intact) when the text is
    /// structurally invalid.
    pub fn load(&mut self, json: &str, url: &str) -> bool {
        match self.store.load_json_str(json, url) {
            Ok(summary) => {
                self.index = SearchIndex::build(&self.store);
                self.session.reset();
                self.recents.clear();
                console_log!("Loaded {} elements", summary.element_count);
                for dangling in &summary.dangling {
                    console_log!("Missing child reference: {}", dangling.child);
                }
                true
            }
            Err(error) => {
                console_log!("Load failed: {error}");
                false
            }
        }
    }

    #[must_use]
    pub fn loaded(&self) -> bool {
        self.store.loaded()
    }

    #[must_use]
    pub fn url(&self) -> String {
        self.store.url().to_owned()
    }

    #[must_use]
    pub fn design_name(&self) -> String {
        self.store.root().display_name.clone()
    }

    #[must_use]
    pub fn design_version(&self) -> String {
        self.store.root().version.clone()
    }

    /// Deterministic navigation fallback: the first register in the document.
    #[must_use]
    pub fn first_register_id(&self) -> Option<String> {
        self.store.first_register_id().map(str::to_owned)
    }

    pub fn focus(&mut self) {
        self.session.focus();
    }

    pub fn blur(&mut self) {
        self.session.blur();
    }

    pub fn set_query(&mut self, text: &str) {
        self.session.set_query(text, &self.index);
    }

    /// Feeds a keyboard event by its DOM `event.key` name.
    /// Returns the committed element id when the key completed a selection.
    pub fn handle_key(&mut self, key: &str) -> Option<String> {
        match key {
            "ArrowDown" => {
                self.session.navigate(NavKey::Down, &self.recents);
                None
            }
            "ArrowUp" => {
                self.session.navigate(NavKey::Up, &self.recents);
                None
            }
            "ArrowLeft" => {
                self.session.navigate(NavKey::Left, &self.recents);
                None
            }
            "ArrowRight" => {
                self.session.navigate(NavKey::Right, &self.recents);
                None
            }
            "Enter" => self.session.commit(&mut self.recents),
            "Escape" => {
                self.session.blur();
                None
            }
            _ => None,
        }
    }

    /// Click on the visible suggestion at `index`.
    pub fn commit_index(&mut self, index: usize) -> Option<String> {
        self.session.commit_index(index, &mut self.recents)
    }

    /// Per-entry dismiss control on the recents panel.
    pub fn dismiss_recent(&mut self, id: &str) {
        self.session.dismiss_recent(id, &mut self.recents);
    }

    /// Returns the current panel state as a string value.
    #[must_use]
    pub fn panel_state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.session.panel_state()).unwrap()
    }

    /// Returns the ranked suggestion ids for the live query.
    #[must_use]
    pub fn suggestions(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.session.results()).unwrap()
    }

    /// Returns recent selections, most recent first.
    #[must_use]
    pub fn recents(&self) -> JsValue {
        let ids: Vec<&str> = self.recents.ids().collect();
        serde_wasm_bindgen::to_value(&ids).unwrap()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.session.cursor()
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.session.query().to_owned()
    }

    /// Switches the value display base; returns false for unknown names.
    pub fn set_display_base(&mut self, base: &str) -> bool {
        match base.parse() {
            Ok(parsed) => {
                self.config.display_base = parsed;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_byte_swap(&mut self, enabled: bool) {
        self.config.byte_swap = enabled;
    }

    /// Returns one element's summary, or undefined when the id is unknown.
    #[must_use]
    pub fn element(&self, id: &str) -> JsValue {
        self.store.get(id).map_or(JsValue::UNDEFINED, |element| {
            let view = WasmElementView {
                id: element.id.clone(),
                kind: element.kind.label().to_owned(),
                name: element.label().to_owned(),
                addr: element.addr.map(|addr| hex_literal(u128::from(addr))),
                children: element.children.clone(),
            };
            serde_wasm_bindgen::to_value(&view).unwrap()
        })
    }

    /// Returns the field table of a register rendered under the current
    /// view configuration; empty for containers and unknown ids.
    #[must_use]
    pub fn field_views(&self, id: &str) -> JsValue {
        let views: Vec<WasmFieldView> = self
            .store
            .get(id)
            .and_then(|element| element.fields.as_ref())
            .map_or_else(Vec::new, |fields| {
                fields
                    .iter()
                    .map(|field| WasmFieldView {
                        name: field.name.clone(),
                        access: field.access.clone(),
                        bits: format!("[{}:{}]", field.msb(), field.lsb),
                        value: self.config.render(&field.value),
                        doc: field.doc.clone(),
                    })
                    .collect()
            });

        serde_wasm_bindgen::to_value(&views).unwrap()
    }
}
