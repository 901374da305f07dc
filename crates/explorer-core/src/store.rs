//! In-memory register store built from a loaded description document.
//!
//! The store is the single owner of all element records. It is populated by
//! `load`, replaced wholesale on reload, and never mutated incrementally; a
//! failed load leaves the previously loaded state untouched.

use indexmap::IndexMap;
use thiserror::Error;

use crate::document::{DesignRoot, Register, RegisterDescriptionFile, ResetValue};
use crate::value::BitArray;

/// Error returned when a description document cannot be ingested.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document text is structurally unparsable: invalid JSON or a shape
    /// missing the required `root`/`elements` structure.
    #[error("register description is structurally invalid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A child id referenced by an element but absent from the element map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingChild {
    /// Id of the referring element; `None` when the root referred to it.
    pub parent: Option<String>,
    /// The missing child id.
    pub child: String,
}

/// Non-fatal findings from a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of elements ingested.
    pub element_count: usize,
    /// Dangling child references, surfaced for display but not fatal.
    pub dangling: Vec<DanglingChild>,
}

/// In-memory index of all design elements keyed by id.
#[derive(Debug, Clone, Default)]
pub struct RegisterStore {
    root: DesignRoot,
    elements: IndexMap<String, Register>,
    loaded: bool,
    url: String,
}

impl RegisterStore {
    /// Creates an empty, unloaded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests an already-deserialized description document.
    ///
    /// Every field value is derived from its declared reset via the value
    /// engine; absent or malformed resets fall back to all-zero rather than
    /// aborting the load. Child references are validated and dangling ids
    /// reported in the returned summary. The element map and root are
    /// committed as whole-value replacements after full preparation, so a
    /// reader never observes a mix of old and new entries.
    ///
    /// `url` records where the document came from (empty for local data).
    pub fn load(
        &mut self,
        mut document: RegisterDescriptionFile,
        url: impl Into<String>,
    ) -> LoadSummary {
        for (id, element) in &mut document.elements {
            if element.id.is_empty() {
                element.id.clone_from(id);
            }

            if let Some(fields) = element.fields.as_mut() {
                for field in fields {
                    field.value = field
                        .reset
                        .as_ref()
                        .and_then(ResetValue::as_literal)
                        .map_or_else(
                            || BitArray::zero(field.nbits),
                            |literal| BitArray::from_reset_str(&literal, field.nbits),
                        );
                }
            }
        }

        let mut dangling = Vec::new();
        for child in &document.root.children {
            if !document.elements.contains_key(child) {
                dangling.push(DanglingChild {
                    parent: None,
                    child: child.clone(),
                });
            }
        }
        for (id, element) in &document.elements {
            for child in &element.children {
                if !document.elements.contains_key(child) {
                    dangling.push(DanglingChild {
                        parent: Some(id.clone()),
                        child: child.clone(),
                    });
                }
            }
        }

        let element_count = document.elements.len();

        self.root = document.root;
        self.elements = document.elements;
        self.url = url.into();
        self.loaded = true;

        LoadSummary {
            element_count,
            dangling,
        }
    }

    /// Parses description JSON text and loads it.
    ///
    /// The store keeps its previously loaded state when parsing fails, so a
    /// bad reload never clears a working view.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] when the text is not a structurally
    /// valid description document.
    pub fn load_json_str(
        &mut self,
        json: &str,
        url: impl Into<String>,
    ) -> Result<LoadSummary, LoadError> {
        let document: RegisterDescriptionFile = serde_json::from_str(json)?;
        Ok(self.load(document, url))
    }

    /// Returns `true` once a document has been fully ingested.
    #[must_use]
    pub const fn loaded(&self) -> bool {
        self.loaded
    }

    /// Returns where the current document was loaded from (empty for local
    /// data or an unloaded store).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the top-level design descriptor.
    #[must_use]
    pub const fn root(&self) -> &DesignRoot {
        &self.root
    }

    /// Looks up an element by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Register> {
        self.elements.get(id)
    }

    /// Returns the number of loaded elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` when no elements are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates element ids in document (insertion) order.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Iterates elements in document (insertion) order.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &Register)> {
        self.elements
            .iter()
            .map(|(id, element)| (id.as_str(), element))
    }

    /// Returns the first element id, in document order, whose kind is `reg`.
    ///
    /// Used as a deterministic navigation fallback when no element is
    /// selected; `None` when the document has no registers.
    #[must_use]
    pub fn first_register_id(&self) -> Option<&str> {
        self.elements
            .iter()
            .find(|(_, element)| element.kind.is_register())
            .map(|(id, _)| id.as_str())
    }
}
