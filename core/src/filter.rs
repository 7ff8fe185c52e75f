#![deny(missing_docs)]

//! # Candidate Filter
//!
//! Cheap syntactic pre-filter over declaration nodes. It only exists to keep
//! obviously irrelevant declarations away from semantic resolution; the
//! resolver re-checks everything that passes.

use crate::declarations::TypeDeclaration;
use serde::{Deserialize, Serialize};

/// How strict the syntactic check is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Any class with a non-empty base list.
    Loose,
    /// Any class whose base list names the disposal interface.
    #[default]
    Strict,
}

impl std::str::FromStr for FilterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "loose" => Ok(FilterPolicy::Loose),
            "strict" => Ok(FilterPolicy::Strict),
            other => Err(format!("unknown filter policy '{}'", other)),
        }
    }
}

/// Accumulates candidate declarations in arrival order.
///
/// Visits are not deduplicated: visiting the same node three times records
/// it three times.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    policy: FilterPolicy,
    qualified: String,
    bare: String,
    candidates: Vec<TypeDeclaration>,
}

impl CandidateFilter {
    /// Creates an empty filter.
    ///
    /// # Arguments
    ///
    /// * `policy` - Loose or strict matching.
    /// * `disposal_interface` - Fully qualified interface name, e.g. `System.IDisposable`.
    pub fn new(policy: FilterPolicy, disposal_interface: &str) -> Self {
        let qualified = disposal_interface.trim().to_string();
        let bare = qualified
            .rsplit('.')
            .next()
            .unwrap_or(qualified.as_str())
            .to_string();

        Self {
            policy,
            qualified,
            bare,
            candidates: Vec::new(),
        }
    }

    /// Inspects one node and records it if it is a candidate.
    pub fn visit(&mut self, node: &TypeDeclaration) {
        if self.accepts(node) {
            tracing::trace!(node = %node.full_name(), "candidate recorded");
            self.candidates.push(node.clone());
        }
    }

    /// Whether `node` passes the syntactic check under this filter's policy.
    pub fn accepts(&self, node: &TypeDeclaration) -> bool {
        if !node.is_class() || !node.has_base_list() {
            return false;
        }

        match self.policy {
            FilterPolicy::Loose => true,
            FilterPolicy::Strict => node.base_list.iter().any(|b| self.names_interface(b)),
        }
    }

    fn names_interface(&self, entry: &str) -> bool {
        let entry = entry.trim();
        let entry = entry.strip_prefix("global::").unwrap_or(entry);
        entry == self.bare || entry == self.qualified
    }

    /// Candidates recorded so far, in visit order.
    pub fn candidates(&self) -> &[TypeDeclaration] {
        &self.candidates
    }

    /// Consumes the filter, returning the recorded candidates.
    pub fn into_candidates(self) -> Vec<TypeDeclaration> {
        self.candidates
    }

    /// Number of recorded candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Runs a fresh filter over `nodes` and returns the candidates.
pub fn collect_candidates<'a, I>(
    policy: FilterPolicy,
    disposal_interface: &str,
    nodes: I,
) -> Vec<TypeDeclaration>
where
    I: IntoIterator<Item = &'a TypeDeclaration>,
{
    let mut filter = CandidateFilter::new(policy, disposal_interface);
    for node in nodes {
        filter.visit(node);
    }
    filter.into_candidates()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::DeclarationKind;

    const IDISPOSABLE: &str = "System.IDisposable";

    #[test]
    fn test_strict_matches_bare_qualified_and_global() {
        let filter = CandidateFilter::new(FilterPolicy::Strict, IDISPOSABLE);
        for base in [
            "IDisposable",
            "System.IDisposable",
            "global::System.IDisposable",
            " IDisposable ",
        ] {
            let decl = TypeDeclaration::class("App", "Owner", &[base]);
            assert!(filter.accepts(&decl), "expected '{}' to match", base);
        }
    }

    #[test]
    fn test_strict_rejects_lookalikes() {
        let filter = CandidateFilter::new(FilterPolicy::Strict, IDISPOSABLE);
        for base in ["IEnumerable", "IDisposableFactory", "MyIDisposable", "Other.IDisposable2"] {
            let decl = TypeDeclaration::class("App", "Owner", &[base]);
            assert!(!filter.accepts(&decl), "'{}' should not match", base);
        }
    }

    #[test]
    fn test_loose_accepts_any_base() {
        let filter = CandidateFilter::new(FilterPolicy::Loose, IDISPOSABLE);
        let decl = TypeDeclaration::class("App", "Owner", &["IEnumerable"]);
        assert!(filter.accepts(&decl));
    }

    #[test]
    fn test_non_class_is_never_a_candidate() {
        let filter = CandidateFilter::new(FilterPolicy::Loose, IDISPOSABLE);
        let mut decl = TypeDeclaration::class("App", "Handle", &["IDisposable"]);
        decl.kind = DeclarationKind::Struct;
        assert!(!filter.accepts(&decl));
        decl.kind = DeclarationKind::Interface;
        assert!(!filter.accepts(&decl));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("LOOSE".parse::<FilterPolicy>(), Ok(FilterPolicy::Loose));
        assert_eq!("strict".parse::<FilterPolicy>(), Ok(FilterPolicy::Strict));
        assert!("medium".parse::<FilterPolicy>().is_err());
    }
}
