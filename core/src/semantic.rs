#![deny(missing_docs)]

//! # Semantic Model
//!
//! The questions the resolver needs answered about types, expressed as a
//! trait so the host can plug in whatever actually knows the answers.
//! `in_memory::TypeUniverse` is the bundled implementation.

use crate::declarations::TypeDeclaration;
use serde::{Deserialize, Serialize};

pub mod in_memory;

pub use in_memory::TypeUniverse;

/// Declared accessibility of a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    /// `public`
    Public,
    /// `internal`
    Internal,
    /// `protected`
    Protected,
    /// `private`
    Private,
    /// No modifier written.
    #[default]
    #[serde(alias = "", alias = "default")]
    NotApplicable,
}

impl Accessibility {
    /// The source keyword, or `""` when none applies.
    pub fn as_keyword(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Private => "private",
            Accessibility::NotApplicable => "",
        }
    }
}

/// What sort of type a symbol is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Reference type.
    #[default]
    Class,
    /// Value type.
    Struct,
    /// Interface.
    Interface,
    /// Enumeration.
    Enum,
}

/// A resolved type. Identity is the fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSymbol {
    /// Containing namespace, `""` for the global namespace.
    pub namespace: String,
    /// Simple name.
    pub name: String,
    /// Kind of type.
    pub kind: TypeKind,
    /// Declared accessibility.
    pub accessibility: Accessibility,
}

impl TypeSymbol {
    /// `Namespace.Name`, or `Name` in the global namespace.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// Kind of a declared member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// Method, including finalizers and operators.
    #[default]
    Method,
    /// Field.
    Field,
    /// Property.
    Property,
    /// Event.
    Event,
    /// Nested type declaration.
    NestedType,
}

/// Signature-level description of a declared member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Member name.
    pub name: String,
    /// Member kind.
    pub kind: MemberKind,
    /// Parameter count, zero for non-methods.
    pub parameter_count: usize,
    /// Whether a method returns `void`. Meaningless for non-methods.
    pub returns_void: bool,
    /// Declared type of a field or property, when it resolves to a known type.
    pub declared_type: Option<TypeSymbol>,
}

impl MemberDescriptor {
    /// True for `void {name}()`.
    pub fn is_parameterless_void_method(&self, name: &str) -> bool {
        self.kind == MemberKind::Method
            && self.name == name
            && self.parameter_count == 0
            && self.returns_void
    }
}

/// Source of semantic information for one analysis pass.
///
/// Implementations are read-only for the duration of a pass.
pub trait SemanticModel {
    /// Resolves a syntactic declaration to its symbol. `None` if it cannot be resolved.
    fn declared_symbol(&self, declaration: &TypeDeclaration) -> Option<TypeSymbol>;

    /// Looks a type up by fully qualified metadata name.
    fn type_by_metadata_name(&self, metadata_name: &str) -> Option<TypeSymbol>;

    /// Every interface `symbol` implements, including inherited ones, without duplicates.
    fn all_interfaces(&self, symbol: &TypeSymbol) -> Vec<TypeSymbol>;

    /// Members declared directly on `symbol`, in declaration order.
    fn declared_members(&self, symbol: &TypeSymbol) -> Vec<MemberDescriptor>;

    /// Whether `symbol` implements `interface`.
    fn implements(&self, symbol: &TypeSymbol, interface: &TypeSymbol) -> bool {
        self.all_interfaces(symbol).contains(interface)
    }
}
