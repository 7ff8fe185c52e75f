#![deny(missing_docs)]

//! # Declarations
//!
//! The syntactic view of a type declaration, as handed over by the host
//! traversal. Nothing here is resolved; base list entries are kept exactly
//! as they were written.

use serde::{Deserialize, Serialize};

/// The shape of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// `class Foo { }`
    Class,
    /// `struct Foo { }`
    Struct,
    /// `interface IFoo { }`
    Interface,
    /// `record Foo(...)`
    Record,
    /// `enum Foo { }`
    Enum,
}

/// A single type declaration node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Declaration shape.
    pub kind: DeclarationKind,
    /// Containing namespace, dotted. Empty for the global namespace.
    pub namespace: String,
    /// Simple name of the declared type.
    pub name: String,
    /// Base/interface list entries as written (`IDisposable`, `System.IDisposable`, ...).
    pub base_list: Vec<String>,
    /// Whether the declaration carries the `partial` modifier.
    pub is_partial: bool,
}

impl TypeDeclaration {
    /// Creates a class declaration with the given bases.
    pub fn class(namespace: &str, name: &str, bases: &[&str]) -> Self {
        Self {
            kind: DeclarationKind::Class,
            namespace: namespace.to_string(),
            name: name.to_string(),
            base_list: bases.iter().map(|b| b.to_string()).collect(),
            is_partial: true,
        }
    }

    /// True for class declarations.
    pub fn is_class(&self) -> bool {
        self.kind == DeclarationKind::Class
    }

    /// True when at least one base/interface entry was written.
    pub fn has_base_list(&self) -> bool {
        !self.base_list.is_empty()
    }

    /// `Namespace.Name`, or just `Name` in the global namespace.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let decl = TypeDeclaration::class("App.Io", "Reader", &[]);
        assert_eq!(decl.full_name(), "App.Io.Reader");

        let global = TypeDeclaration::class("", "Reader", &[]);
        assert_eq!(global.full_name(), "Reader");
    }

    #[test]
    fn test_base_list_presence() {
        assert!(!TypeDeclaration::class("A", "B", &[]).has_base_list());
        assert!(TypeDeclaration::class("A", "B", &["IDisposable"]).has_base_list());
    }
}
