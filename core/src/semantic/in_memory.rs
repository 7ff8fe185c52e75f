//! # In-Memory Type Universe
//!
//! A small type/interface graph that implements [`SemanticModel`]. It backs
//! the unit tests and the CLI, which loads it from YAML or JSON manifests:
//!
//! ```yaml
//! usings: [System]
//! types:
//!   - namespace: App
//!     name: Connection
//!     accessibility: public
//!     partial: true
//!     bases: [IDisposable]
//!     members:
//!       - { name: _socket, kind: field, type: Socket }
//!       - { name: DisposeUnmanaged, kind: method }
//! ```
//!
//! Fragments of the same type (same namespace and name) are merged, so the
//! model always answers with one complete member list per type.

use super::{Accessibility, MemberDescriptor, MemberKind, SemanticModel, TypeKind, TypeSymbol};
use crate::declarations::{DeclarationKind, TypeDeclaration};
use crate::error::AppResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

fn default_true() -> bool {
    true
}

/// A member as written in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDefinition {
    /// Member name.
    pub name: String,
    /// Member kind, `method` when omitted.
    #[serde(default)]
    pub kind: MemberKind,
    /// Number of parameters (methods only).
    #[serde(default)]
    pub parameters: usize,
    /// Whether a method returns `void`.
    #[serde(default = "default_true")]
    pub returns_void: bool,
    /// Declared type name of a field or property, as written.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
}

impl MemberDefinition {
    /// `void {name}(...)` with the given parameter count.
    pub fn method(name: &str, parameters: usize, returns_void: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: MemberKind::Method,
            parameters,
            returns_void,
            ty: None,
        }
    }

    /// A field of type `ty`.
    pub fn field(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: MemberKind::Field,
            parameters: 0,
            returns_void: false,
            ty: Some(ty.to_string()),
        }
    }

    /// A property of type `ty`.
    pub fn property(name: &str, ty: &str) -> Self {
        Self {
            kind: MemberKind::Property,
            ..Self::field(name, ty)
        }
    }
}

/// A type as written in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Containing namespace.
    #[serde(default)]
    pub namespace: String,
    /// Simple name.
    pub name: String,
    /// Declaration shape, `class` when omitted.
    #[serde(default = "default_kind")]
    pub kind: DeclarationKind,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// `partial` modifier.
    #[serde(default)]
    pub partial: bool,
    /// Namespaces imported by the declaring file.
    #[serde(default)]
    pub usings: Vec<String>,
    /// Base class and interfaces, as written.
    #[serde(default)]
    pub bases: Vec<String>,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<MemberDefinition>,
}

fn default_kind() -> DeclarationKind {
    DeclarationKind::Class
}

impl TypeDefinition {
    fn new(namespace: &str, name: &str, kind: DeclarationKind) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
            accessibility: Accessibility::NotApplicable,
            partial: false,
            usings: Vec::new(),
            bases: Vec::new(),
            members: Vec::new(),
        }
    }

    /// A partial class with no modifiers.
    pub fn class(namespace: &str, name: &str) -> Self {
        Self {
            partial: true,
            ..Self::new(namespace, name, DeclarationKind::Class)
        }
    }

    /// An interface.
    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::new(namespace, name, DeclarationKind::Interface)
    }

    /// A struct.
    pub fn structure(namespace: &str, name: &str) -> Self {
        Self::new(namespace, name, DeclarationKind::Struct)
    }

    /// Sets the accessibility.
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Adds a base entry.
    pub fn with_base(mut self, base: &str) -> Self {
        self.bases.push(base.to_string());
        self
    }

    /// Adds a `using` namespace.
    pub fn with_using(mut self, namespace: &str) -> Self {
        self.usings.push(namespace.to_string());
        self
    }

    /// Adds a member.
    pub fn with_member(mut self, member: MemberDefinition) -> Self {
        self.members.push(member);
        self
    }

    /// `Namespace.Name`.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    fn symbol(&self) -> TypeSymbol {
        let kind = match self.kind {
            DeclarationKind::Class | DeclarationKind::Record => TypeKind::Class,
            DeclarationKind::Struct => TypeKind::Struct,
            DeclarationKind::Interface => TypeKind::Interface,
            DeclarationKind::Enum => TypeKind::Enum,
        };

        TypeSymbol {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            kind,
            accessibility: self.accessibility,
        }
    }

    fn declaration(&self) -> TypeDeclaration {
        TypeDeclaration {
            kind: self.kind,
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            base_list: self.bases.clone(),
            is_partial: self.partial,
        }
    }
}

/// On-disk shape of a universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeManifest {
    /// Preload the bundled `System` types.
    #[serde(default = "default_true")]
    pub standard_types: bool,
    /// Namespaces imported everywhere.
    #[serde(default)]
    pub usings: Vec<String>,
    /// Type definitions in source order.
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

/// The in-memory semantic model.
#[derive(Debug, Clone, Default)]
pub struct TypeUniverse {
    usings: Vec<String>,
    types: IndexMap<String, TypeDefinition>,
    fragments: Vec<TypeDeclaration>,
}

impl TypeUniverse {
    /// An empty universe. Note that without the standard types the disposal
    /// interface itself is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// A universe preloaded with the bundled `System` types.
    pub fn with_standard_types() -> Self {
        let mut universe = Self::new();
        universe.load_standard_types();
        universe
    }

    fn load_standard_types(&mut self) {
        let public = Accessibility::Public;
        self.insert(TypeDefinition::class("System", "Object").with_accessibility(public), false);
        self.insert(
            TypeDefinition::interface("System", "IDisposable")
                .with_accessibility(public)
                .with_member(MemberDefinition::method("Dispose", 0, true)),
            false,
        );
        self.insert(
            TypeDefinition::interface("System", "IAsyncDisposable").with_accessibility(public),
            false,
        );
        self.insert(
            TypeDefinition::interface("System.Collections", "IEnumerable")
                .with_accessibility(public),
            false,
        );
        self.insert(
            TypeDefinition::class("System.IO", "Stream")
                .with_accessibility(public)
                .with_base("System.IDisposable")
                .with_base("System.IAsyncDisposable")
                .with_member(MemberDefinition::method("Dispose", 0, true)),
            false,
        );
    }

    /// Builds a universe from a decoded manifest.
    pub fn from_manifest(manifest: TypeManifest) -> Self {
        let mut universe = if manifest.standard_types {
            Self::with_standard_types()
        } else {
            Self::new()
        };
        universe.usings = manifest.usings;
        for definition in manifest.types {
            universe.add_type(definition);
        }
        universe
    }

    /// Parses a YAML manifest.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let manifest: TypeManifest = serde_yaml::from_str(content)?;
        Ok(Self::from_manifest(manifest))
    }

    /// Parses a JSON manifest.
    pub fn from_json_str(content: &str) -> AppResult<Self> {
        let manifest: TypeManifest = serde_json::from_str(content)?;
        Ok(Self::from_manifest(manifest))
    }

    /// Reads a manifest from disk. `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Adds a namespace imported by every type.
    pub fn add_using(&mut self, namespace: &str) {
        self.usings.push(namespace.to_string());
    }

    /// Adds a user type, visible to the host traversal as a declaration node.
    ///
    /// A second definition with the same full name is treated as another
    /// fragment of the same type: its bases, usings and members are appended.
    pub fn add_type(&mut self, definition: TypeDefinition) {
        self.insert(definition, true);
    }

    /// Builder form of [`TypeUniverse::add_type`].
    pub fn with_type(mut self, definition: TypeDefinition) -> Self {
        self.add_type(definition);
        self
    }

    fn insert(&mut self, definition: TypeDefinition, declared: bool) {
        if declared {
            self.fragments.push(definition.declaration());
        }

        match self.types.get_mut(&definition.full_name()) {
            Some(existing) => {
                existing.partial |= definition.partial;
                if existing.accessibility == Accessibility::NotApplicable {
                    existing.accessibility = definition.accessibility;
                }
                existing.usings.extend(definition.usings);
                existing.bases.extend(definition.bases);
                existing.members.extend(definition.members);
            }
            None => {
                self.types.insert(definition.full_name(), definition);
            }
        }
    }

    /// Declaration nodes for every user type fragment, in insertion order.
    pub fn declarations(&self) -> &[TypeDeclaration] {
        &self.fragments
    }

    /// Number of known types, bundled ones included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when no type is known.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Finds the definition a type name refers to from inside `context`.
    ///
    /// Enclosing namespaces are searched innermost first, then the global
    /// namespace, then the context's `using` namespaces and finally the
    /// universe-wide ones.
    fn resolve_name(&self, name: &str, context: &TypeDefinition) -> Option<&TypeDefinition> {
        let name = name.trim();
        let name = name.split('<').next().unwrap_or(name).trim();
        let name = name.trim_end_matches('?');

        if let Some(qualified) = name.strip_prefix("global::") {
            return self.types.get(qualified);
        }

        let mut scope = context.namespace.as_str();
        while !scope.is_empty() {
            if let Some(found) = self.types.get(&format!("{}.{}", scope, name)) {
                return Some(found);
            }
            scope = scope.rsplit_once('.').map_or("", |(outer, _)| outer);
        }

        if let Some(found) = self.types.get(name) {
            return Some(found);
        }

        context
            .usings
            .iter()
            .chain(self.usings.iter())
            .find_map(|using| self.types.get(&format!("{}.{}", using, name)))
    }

    fn collect_interfaces(
        &self,
        definition: &TypeDefinition,
        out: &mut Vec<TypeSymbol>,
        visited: &mut HashSet<String>,
    ) {
        for base in &definition.bases {
            let Some(resolved) = self.resolve_name(base, definition) else {
                continue;
            };
            if !visited.insert(resolved.full_name()) {
                continue;
            }
            if resolved.kind == DeclarationKind::Interface {
                out.push(resolved.symbol());
            }
            self.collect_interfaces(resolved, out, visited);
        }
    }
}

impl SemanticModel for TypeUniverse {
    fn declared_symbol(&self, declaration: &TypeDeclaration) -> Option<TypeSymbol> {
        self.types
            .get(&declaration.full_name())
            .map(TypeDefinition::symbol)
    }

    fn type_by_metadata_name(&self, metadata_name: &str) -> Option<TypeSymbol> {
        self.types.get(metadata_name).map(TypeDefinition::symbol)
    }

    fn all_interfaces(&self, symbol: &TypeSymbol) -> Vec<TypeSymbol> {
        let mut out = Vec::new();
        if let Some(definition) = self.types.get(&symbol.full_name()) {
            let mut visited = HashSet::from([definition.full_name()]);
            self.collect_interfaces(definition, &mut out, &mut visited);
        }
        out
    }

    fn declared_members(&self, symbol: &TypeSymbol) -> Vec<MemberDescriptor> {
        let Some(definition) = self.types.get(&symbol.full_name()) else {
            return Vec::new();
        };

        definition
            .members
            .iter()
            .map(|member| MemberDescriptor {
                name: member.name.clone(),
                kind: member.kind,
                parameter_count: member.parameters,
                returns_void: member.returns_void,
                declared_type: match member.kind {
                    MemberKind::Field | MemberKind::Property => member
                        .ty
                        .as_deref()
                        .and_then(|ty| self.resolve_name(ty, definition))
                        .map(TypeDefinition::symbol),
                    _ => None,
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(symbols: &[TypeSymbol]) -> Vec<String> {
        symbols.iter().map(TypeSymbol::full_name).collect()
    }

    #[test]
    fn test_standard_types_present() {
        let universe = TypeUniverse::with_standard_types();
        assert!(universe.type_by_metadata_name("System.IDisposable").is_some());
        assert!(universe.declarations().is_empty());
        assert!(TypeUniverse::new().type_by_metadata_name("System.IDisposable").is_none());
    }

    #[test]
    fn test_interfaces_are_transitive_through_bases_and_interfaces() {
        let universe = TypeUniverse::with_standard_types()
            .with_type(
                TypeDefinition::interface("App", "IResource").with_base("System.IDisposable"),
            )
            .with_type(TypeDefinition::class("App", "Base").with_base("IResource"))
            .with_type(TypeDefinition::class("App", "Derived").with_base("Base"));

        let derived = universe.type_by_metadata_name("App.Derived").unwrap();
        assert_eq!(
            names(&universe.all_interfaces(&derived)),
            vec!["App.IResource", "System.IDisposable"]
        );
    }

    #[test]
    fn test_interface_set_has_no_duplicates() {
        let universe = TypeUniverse::with_standard_types()
            .with_type(TypeDefinition::interface("App", "IA").with_base("System.IDisposable"))
            .with_type(TypeDefinition::interface("App", "IB").with_base("System.IDisposable"))
            .with_type(TypeDefinition::class("App", "Both").with_base("IA").with_base("IB"));

        let both = universe.type_by_metadata_name("App.Both").unwrap();
        assert_eq!(
            names(&universe.all_interfaces(&both)),
            vec!["App.IA", "System.IDisposable", "App.IB"]
        );
    }

    #[test]
    fn test_cyclic_bases_terminate() {
        let universe = TypeUniverse::new()
            .with_type(TypeDefinition::interface("App", "IA").with_base("IB"))
            .with_type(TypeDefinition::interface("App", "IB").with_base("IA"));

        let a = universe.type_by_metadata_name("App.IA").unwrap();
        assert_eq!(names(&universe.all_interfaces(&a)), vec!["App.IB"]);
    }

    #[test]
    fn test_only_fields_and_properties_carry_a_type() {
        let universe = TypeUniverse::with_standard_types().with_type(
            TypeDefinition::class("App", "Factory").with_member(MemberDefinition {
                kind: MemberKind::Event,
                ..MemberDefinition::field("Closed", "System.IO.Stream")
            }),
        );

        let factory = universe.type_by_metadata_name("App.Factory").unwrap();
        let members = universe.declared_members(&factory);
        assert_eq!(members[0].kind, MemberKind::Event);
        assert_eq!(members[0].declared_type, None);
    }

    #[test]
    fn test_name_resolution_order() {
        let universe = TypeUniverse::with_standard_types()
            .with_type(TypeDefinition::class("Outer", "Handle"))
            .with_type(
                TypeDefinition::class("Outer.Inner", "Owner")
                    .with_using("System.IO")
                    .with_member(MemberDefinition::field("_handle", "Handle"))
                    .with_member(MemberDefinition::field("_stream", "Stream?"))
                    .with_member(MemberDefinition::field(
                        "_list",
                        "global::System.Collections.IEnumerable",
                    ))
                    .with_member(MemberDefinition::field("_count", "int")),
            );

        let owner = universe.type_by_metadata_name("Outer.Inner.Owner").unwrap();
        let resolved: Vec<Option<String>> = universe
            .declared_members(&owner)
            .iter()
            .map(|m| m.declared_type.as_ref().map(TypeSymbol::full_name))
            .collect();

        assert_eq!(
            resolved,
            vec![
                Some("Outer.Handle".to_string()),
                Some("System.IO.Stream".to_string()),
                Some("System.Collections.IEnumerable".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_fragments_merge_into_one_type() {
        let universe = TypeUniverse::with_standard_types()
            .with_type(TypeDefinition::class("App", "Split").with_base("System.IDisposable"))
            .with_type(
                TypeDefinition::class("App", "Split")
                    .with_accessibility(Accessibility::Internal)
                    .with_member(MemberDefinition::method("DisposeManaged", 0, true)),
            );

        assert_eq!(universe.declarations().len(), 2);

        let split = universe.declared_symbol(&universe.declarations()[0]).unwrap();
        assert_eq!(split.accessibility, Accessibility::Internal);
        assert_eq!(universe.declared_members(&split).len(), 1);
        assert_eq!(names(&universe.all_interfaces(&split)), vec!["System.IDisposable"]);
    }

    #[test]
    fn test_unknown_declaration_is_unresolvable() {
        let universe = TypeUniverse::with_standard_types();
        let decl = TypeDeclaration::class("App", "Ghost", &["IDisposable"]);
        assert!(universe.declared_symbol(&decl).is_none());
    }

    #[test]
    fn test_yaml_manifest() {
        let yaml = r#"
usings: [System]
types:
  - namespace: App
    name: Connection
    accessibility: public
    partial: true
    bases: [IDisposable]
    members:
      - { name: _stream, kind: field, type: System.IO.Stream }
      - { name: DisposeUnmanaged }
      - { name: Read, parameters: 2, returns_void: false }
"#;
        let universe = TypeUniverse::from_yaml_str(yaml).unwrap();
        let decl = &universe.declarations()[0];
        assert_eq!(decl.base_list, vec!["IDisposable"]);
        assert!(decl.is_partial);

        let symbol = universe.declared_symbol(decl).unwrap();
        assert_eq!(symbol.accessibility, Accessibility::Public);
        assert_eq!(names(&universe.all_interfaces(&symbol)), vec!["System.IDisposable"]);

        let members = universe.declared_members(&symbol);
        assert!(members[1].is_parameterless_void_method("DisposeUnmanaged"));
        assert_eq!(members[2].parameter_count, 2);
        assert!(!members[2].returns_void);
    }

    #[test]
    fn test_json_manifest_without_standard_types() {
        let json = r#"{ "standard_types": false, "types": [ { "name": "Lonely" } ] }"#;
        let universe = TypeUniverse::from_json_str(json).unwrap();
        assert_eq!(universe.len(), 1);
        assert!(universe.type_by_metadata_name("System.IDisposable").is_none());
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("types.json");
        fs::write(&json_path, r#"{ "types": [ { "namespace": "A", "name": "B" } ] }"#).unwrap();
        let universe = TypeUniverse::load(&json_path).unwrap();
        assert!(universe.type_by_metadata_name("A.B").is_some());

        let yaml_path = dir.path().join("types.yaml");
        fs::write(&yaml_path, "types:\n  - { namespace: A, name: C }\n").unwrap();
        let universe = TypeUniverse::load(&yaml_path).unwrap();
        assert!(universe.type_by_metadata_name("A.C").is_some());
    }
}
