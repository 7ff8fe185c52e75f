#![deny(missing_docs)]

//! # Work Items
//!
//! The declarative description of the dispose code one type needs. Built by
//! the resolver, consumed by the emitter, never mutated in between.

use serde::{Deserialize, Serialize};

/// Name of the public cleanup method.
pub const DISPOSE_METHOD: &str = "Dispose";

/// Hook called on explicit disposal only.
pub const DISPOSE_MANAGED: &str = "DisposeManaged";

/// Hook called on both explicit disposal and finalization.
pub const DISPOSE_UNMANAGED: &str = "DisposeUnmanaged";

/// What to generate for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Fully qualified containing namespace.
    pub namespace_name: String,
    /// Simple type name.
    pub class_name: String,
    /// `public`, `internal`, `protected`, `private` or empty.
    pub declared_accessibility: String,
    /// Members to dispose, in declaration order. Duplicates are kept.
    pub disposable_member_names: Vec<String>,
    /// The type defines `void DisposeManaged()`.
    pub implement_managed: bool,
    /// The type defines `void DisposeUnmanaged()`.
    pub implement_unmanaged: bool,
}

impl WorkItem {
    /// Whether the generated dispose method has anything to do.
    pub fn has_work(&self) -> bool {
        self.implement_unmanaged
            || self.implement_managed
            || !self.disposable_member_names.is_empty()
    }

    /// `Namespace.Class`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace_name, self.class_name)
    }

    /// `{namespace}.{class}.Dispose{suffix}`, unique per type within a pass.
    pub fn artifact_key(&self, suffix: &str) -> String {
        format!("{}.{}{}", self.full_name(), DISPOSE_METHOD, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_work() {
        assert!(!WorkItem::default().has_work());
    }

    #[test]
    fn test_managed_has_work() {
        let work = WorkItem {
            implement_managed: true,
            ..Default::default()
        };
        assert!(work.has_work());
    }

    #[test]
    fn test_unmanaged_has_work() {
        let work = WorkItem {
            implement_unmanaged: true,
            ..Default::default()
        };
        assert!(work.has_work());
    }

    #[test]
    fn test_members_have_work() {
        let work = WorkItem {
            disposable_member_names: vec!["Test1".into(), "Test2".into()],
            ..Default::default()
        };
        assert!(work.has_work());
    }

    #[test]
    fn test_artifact_key() {
        let work = WorkItem {
            namespace_name: "App.Net".into(),
            class_name: "Connection".into(),
            ..Default::default()
        };
        assert_eq!(work.artifact_key(".g.cs"), "App.Net.Connection.Dispose.g.cs");
    }
}
