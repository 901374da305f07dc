//! Register description document model.
//!
//! A description document is a tree of design elements (blocks, sub-blocks,
//! memories, registers) flattened into an id-keyed map. Parent/child
//! relations are expressed as id references rather than owned pointers, so
//! the store remains the single owner of every element record.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::BitArray;

/// Returns the leaf segment of a dot-delimited element id.
///
/// `blkA.sub_blkA.regA0` yields `regA0`; an id without dots is its own leaf.
#[must_use]
pub fn leaf_name(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or(id)
}

/// Classification of a design element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ElementKind {
    /// A register with bit fields.
    Reg,
    /// A block or sub-block container.
    Blk,
    /// A memory container.
    Mem,
    /// An unrecognized kind, tolerated so one odd element cannot abort a load.
    Other,
}

impl From<String> for ElementKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "reg" => Self::Reg,
            "blk" => Self::Blk,
            "mem" => Self::Mem,
            _ => Self::Other,
        }
    }
}

impl ElementKind {
    /// Returns `true` for elements navigable as registers.
    #[must_use]
    pub const fn is_register(self) -> bool {
        matches!(self, Self::Reg)
    }

    /// Short display label for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reg => "reg",
            Self::Blk => "blk",
            Self::Mem => "mem",
            Self::Other => "?",
        }
    }
}

/// A field reset value as it appears in the document: numeric or textual.
///
/// Anything else is captured raw and treated as absent, so malformed reset
/// data degrades to an all-zero value instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ResetValue {
    /// Plain unsigned numeric reset.
    Number(u64),
    /// Textual reset literal (decimal, `0x…`, or `0b…`, with `?` don't-cares).
    Text(String),
    /// Unrecognized reset payload, carried through but never interpreted.
    Raw(serde_json::Value),
}

impl ResetValue {
    /// Returns the literal text this reset value parses from, if any.
    #[must_use]
    pub fn as_literal(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Number(value) => Some(Cow::Owned(value.to_string())),
            Self::Text(text) => Some(Cow::Borrowed(text)),
            Self::Raw(_) => None,
        }
    }
}

/// One named bit field within a register.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegisterField {
    /// Field name, unique within its register.
    pub name: String,
    /// Bit offset of the field's least-significant bit within the register.
    #[serde(default)]
    pub lsb: usize,
    /// Field width in bits (`nbits >= 1` for a valid field).
    pub nbits: usize,
    /// Read/write access policy tag.
    #[serde(default)]
    pub access: String,
    /// Free-text documentation.
    #[serde(default)]
    pub doc: String,
    /// Declared reset value, absent when the document omits it.
    #[serde(default)]
    pub reset: Option<ResetValue>,
    /// Reset value as bits, derived at load time (all-zero when the reset is
    /// absent or malformed). Display-only state, never serialized back.
    #[serde(skip)]
    pub value: BitArray,
}

impl RegisterField {
    /// Bit offset of the field's most-significant bit within the register.
    #[must_use]
    pub const fn msb(&self) -> usize {
        self.lsb + self.nbits.saturating_sub(1)
    }
}

/// One design element: a register or a container node sharing its shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Register {
    /// Globally unique dot-delimited path id. Back-filled from the element's
    /// map key when the body omits it.
    #[serde(default)]
    pub id: String,
    /// Element classification.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Short name (leaf of the id for well-formed documents).
    #[serde(default)]
    pub name: String,
    /// Human-facing display name.
    #[serde(default)]
    pub display_name: String,
    /// Free-text documentation.
    #[serde(default)]
    pub doc: String,
    /// Optional element version tag.
    #[serde(default)]
    pub version: Option<String>,
    /// Absolute address, when the element has one.
    #[serde(default)]
    pub addr: Option<u64>,
    /// Address offset relative to the parent.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Ordered child element ids. References, never owned subtrees.
    #[serde(default)]
    pub children: Vec<String>,
    /// Ordered bit fields; absent for container elements.
    #[serde(default)]
    pub fields: Option<Vec<RegisterField>>,
    /// Named external links.
    #[serde(default)]
    pub links: IndexMap<String, String>,
}

impl Register {
    /// Returns the display name, falling back to the short name.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// Returns the leaf segment of this element's id.
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        leaf_name(&self.id)
    }
}

/// Top-level descriptor of the overall design.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct DesignRoot {
    /// Human-facing design name.
    #[serde(default)]
    pub display_name: String,
    /// Design version string.
    #[serde(default)]
    pub version: String,
    /// Ordered root-level element ids.
    #[serde(default)]
    pub children: Vec<String>,
    /// Named external links.
    #[serde(default)]
    pub links: IndexMap<String, String>,
}

/// A fully-deserialized register description document.
///
/// Every id referenced from a `children` list should exist as a key in
/// `elements`; dangling references are surfaced at load time but do not
/// prevent partial display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegisterDescriptionFile {
    /// The top-level design descriptor.
    pub root: DesignRoot,
    /// All design elements keyed by id, in document order.
    pub elements: IndexMap<String, Register>,
}
