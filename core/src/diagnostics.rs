#![deny(missing_docs)]

//! # Diagnostics
//!
//! Advisory messages about analysed types. Nothing is reported unless the
//! host opts in through `GeneratorConfig::report_empty_work`, and whether a
//! diagnostic is delivered never changes generated output.

use crate::work::{WorkItem, DISPOSE_MANAGED, DISPOSE_UNMANAGED};
use std::fmt;

/// Id of the "nothing to clean up" warning.
pub const NO_CLEANUP_WORK_ID: &str = "DP0001";

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Likely a mistake in the analysed code.
    Warning,
    /// Informational.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single advisory message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stable id, e.g. `DP0001`.
    pub id: &'static str,
    /// Severity.
    pub severity: Severity,
    /// Human readable text.
    pub message: String,
    /// Fully qualified name of the type it concerns.
    pub type_name: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {} ({})", self.severity, self.id, self.message, self.type_name)
    }
}

/// Receives diagnostics raised during a pass.
pub trait DiagnosticSink {
    /// Accepts one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// The "no actual cleanup work" check: `Some` iff the item has nothing to do.
pub fn no_cleanup_work(item: &WorkItem) -> Option<Diagnostic> {
    if item.has_work() {
        return None;
    }

    Some(Diagnostic {
        id: NO_CLEANUP_WORK_ID,
        severity: Severity::Warning,
        message: format!(
            "Class '{}' does not implement a {} or {} method.",
            item.class_name, DISPOSE_MANAGED, DISPOSE_UNMANAGED
        ),
        type_name: item.full_name(),
    })
}
