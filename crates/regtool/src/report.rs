//! Loading and plain-text rendering of register description reports.

use std::collections::HashSet;
use std::fmt;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use explorer_core::{hex_literal, LoadError, LoadSummary, Register, RegisterStore, ViewConfig};

/// Error raised while producing a report.
#[derive(Debug)]
pub enum ReportError {
    /// The description file could not be read.
    Io(std::io::Error),
    /// The description file could not be ingested.
    Load(LoadError),
    /// The requested element id does not exist in the document.
    UnknownId(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "failed to read description file: {error}"),
            Self::Load(error) => write!(f, "{error}"),
            Self::UnknownId(id) => write!(f, "no element with id '{id}'"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<LoadError> for ReportError {
    fn from(error: LoadError) -> Self {
        Self::Load(error)
    }
}

/// Reads and ingests a register description file from disk.
///
/// # Errors
///
/// Returns [`ReportError::Io`] when the file cannot be read and
/// [`ReportError::Load`] when its content is structurally invalid.
pub fn load_store(path: &Path) -> Result<(RegisterStore, LoadSummary), ReportError> {
    let json = fs::read_to_string(path)?;
    let mut store = RegisterStore::new();
    let summary = store.load_json_str(&json, path.to_string_lossy())?;
    Ok((store, summary))
}

/// Renders the design tree from the root down, one element per line.
///
/// Dangling child references render as `[missing]` placeholders, and an
/// element already printed on the current path is not descended into again,
/// so a cyclic reference cannot recurse forever.
#[must_use]
pub fn render_tree(store: &RegisterStore) -> String {
    let root = store.root();
    let mut out = String::new();
    if root.version.is_empty() {
        let _ = writeln!(out, "{}", root.display_name);
    } else {
        let _ = writeln!(out, "{} v{}", root.display_name, root.version);
    }

    let mut on_path = HashSet::new();
    for child in &root.children {
        append_subtree(store, child, 1, &mut on_path, &mut out);
    }
    out
}

fn append_subtree<'a>(
    store: &'a RegisterStore,
    id: &'a str,
    depth: usize,
    on_path: &mut HashSet<&'a str>,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);

    let Some(element) = store.get(id) else {
        let _ = writeln!(out, "{indent}{id} [missing]");
        return;
    };

    let _ = write!(out, "{indent}{} [{}]", element.leaf_name(), element.kind.label());
    if let Some(addr) = element.addr {
        let _ = write!(out, " @ {}", hex_literal(u128::from(addr)));
    }
    let _ = writeln!(out);

    if !on_path.insert(id) {
        return;
    }
    for child in &element.children {
        append_subtree(store, child, depth + 1, on_path, out);
    }
    on_path.remove(id);
}

/// Renders one element: its header plus a field table for registers or a
/// child listing for containers, values formatted per `config`.
///
/// # Errors
///
/// Returns [`ReportError::UnknownId`] when `id` is not in the store.
pub fn render_register(
    store: &RegisterStore,
    id: &str,
    config: ViewConfig,
) -> Result<String, ReportError> {
    let element = store
        .get(id)
        .ok_or_else(|| ReportError::UnknownId(id.to_owned()))?;

    let mut out = String::new();
    append_header(element, &mut out);

    match &element.fields {
        Some(fields) if !fields.is_empty() => {
            for field in fields {
                let _ = writeln!(
                    out,
                    "  [{:>2}:{:<2}] {:<16} {:<4} {}",
                    field.msb(),
                    field.lsb,
                    field.name,
                    field.access,
                    config.render(&field.value)
                );
            }
        }
        _ => {
            for child in &element.children {
                let _ = writeln!(out, "  {child}");
            }
        }
    }
    Ok(out)
}

fn append_header(element: &Register, out: &mut String) {
    let _ = write!(out, "{} ({})", element.label(), element.id);
    if let Some(addr) = element.addr {
        let _ = write!(out, " @ {}", hex_literal(u128::from(addr)));
    }
    let _ = writeln!(out);
}
