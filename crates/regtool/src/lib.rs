//! Register description reporting for the regtool CLI.

/// Report loading and plain-text rendering.
pub mod report;
pub use report::{load_store, render_register, render_tree, ReportError};

#[cfg(test)]
use tempfile as _;
