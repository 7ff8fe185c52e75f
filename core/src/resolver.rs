#![deny(missing_docs)]

//! # Work Resolver
//!
//! Turns syntactic candidates into [`WorkItem`]s using a [`SemanticModel`].
//!
//! For each candidate, in order:
//! 1. resolve its symbol, skipping anything that is not a named, namespaced class;
//! 2. require the disposal interface in its full interface set;
//! 3. skip it if it already declares `void Dispose()`;
//! 4. otherwise record its disposable fields and properties and custom hooks.
//!
//! Candidates that fail any step are dropped silently; nothing here aborts a
//! pass except host cancellation.
//!
//! A `Dispose()` inherited from a base class, abstract or not, is not looked
//! for: only members declared on the type itself count.

use crate::config::GeneratorConfig;
use crate::declarations::TypeDeclaration;
use crate::diagnostics::{no_cleanup_work, DiagnosticSink, NullSink};
use crate::error::{AppError, AppResult};
use crate::semantic::{MemberDescriptor, MemberKind, SemanticModel, TypeKind, TypeSymbol};
use crate::work::{WorkItem, DISPOSE_MANAGED, DISPOSE_METHOD, DISPOSE_UNMANAGED};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// Resolves candidates against a semantic model.
#[derive(Debug, Clone)]
pub struct WorkResolver {
    disposal_interface: String,
    report_empty_work: bool,
}

impl WorkResolver {
    /// Creates a resolver for the given configuration.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            disposal_interface: config.disposal_interface.clone(),
            report_empty_work: config.report_empty_work,
        }
    }

    /// Resolves `candidates` with no diagnostics and no cancellation.
    pub fn resolve<M>(&self, candidates: &[TypeDeclaration], model: &M) -> Vec<WorkItem>
    where
        M: SemanticModel + ?Sized,
    {
        // Without a cancellation flag the pass cannot fail.
        self.resolve_with(candidates, model, &mut NullSink, None)
            .unwrap_or_default()
    }

    /// Resolves `candidates`, reporting to `diagnostics` and checking `cancel`
    /// before every candidate.
    ///
    /// # Returns
    ///
    /// * The work items in candidate order, one per qualifying type.
    /// * `AppError::Cancelled` if `cancel` was set; partial results are discarded.
    #[tracing::instrument(level = "debug", skip_all, fields(candidates = candidates.len()))]
    pub fn resolve_with<M>(
        &self,
        candidates: &[TypeDeclaration],
        model: &M,
        diagnostics: &mut dyn DiagnosticSink,
        cancel: Option<&AtomicBool>,
    ) -> AppResult<Vec<WorkItem>>
    where
        M: SemanticModel + ?Sized,
    {
        let Some(disposal) = model.type_by_metadata_name(&self.disposal_interface) else {
            tracing::debug!(
                interface = %self.disposal_interface,
                "disposal interface unknown, nothing to do"
            );
            return Ok(Vec::new());
        };

        let mut work = Vec::new();
        let mut seen = HashSet::new();

        for candidate in candidates {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                tracing::debug!("pass cancelled");
                return Err(AppError::Cancelled);
            }

            let Some(item) = self.resolve_candidate(candidate, model, &disposal) else {
                continue;
            };

            if !seen.insert(item.full_name()) {
                tracing::debug!(candidate = %item.full_name(), "type already resolved in this pass");
                continue;
            }

            if self.report_empty_work {
                if let Some(diagnostic) = no_cleanup_work(&item) {
                    diagnostics.report(diagnostic);
                }
            }

            work.push(item);
        }

        Ok(work)
    }

    fn resolve_candidate<M>(
        &self,
        candidate: &TypeDeclaration,
        model: &M,
        disposal: &TypeSymbol,
    ) -> Option<WorkItem>
    where
        M: SemanticModel + ?Sized,
    {
        let name = candidate.full_name();

        let Some(symbol) = model.declared_symbol(candidate) else {
            tracing::debug!(candidate = %name, "unresolvable, skipped");
            return None;
        };

        if symbol.kind != TypeKind::Class || symbol.name.is_empty() || symbol.namespace.is_empty() {
            tracing::debug!(candidate = %name, kind = ?symbol.kind, "not a namespaced class, skipped");
            return None;
        }

        if !model.implements(&symbol, disposal) {
            tracing::debug!(candidate = %name, "does not implement the disposal interface, skipped");
            return None;
        }

        let members = model.declared_members(&symbol);

        if has_method(&members, DISPOSE_METHOD) {
            tracing::debug!(candidate = %name, "already declares Dispose(), skipped");
            return None;
        }

        let disposable_member_names = members
            .iter()
            .filter(|member| matches!(member.kind, MemberKind::Field | MemberKind::Property))
            .filter_map(|member| {
                let ty = member.declared_type.as_ref()?;
                let disposable =
                    ty.full_name() == disposal.full_name() || model.implements(ty, disposal);
                disposable.then(|| member.name.clone())
            })
            .collect();

        let item = WorkItem {
            namespace_name: symbol.namespace.clone(),
            class_name: symbol.name.clone(),
            declared_accessibility: symbol.accessibility.as_keyword().to_string(),
            disposable_member_names,
            implement_managed: has_method(&members, DISPOSE_MANAGED),
            implement_unmanaged: has_method(&members, DISPOSE_UNMANAGED),
        };

        tracing::debug!(
            candidate = %name,
            members = item.disposable_member_names.len(),
            managed = item.implement_managed,
            unmanaged = item.implement_unmanaged,
            "work item created"
        );

        Some(item)
    }
}

fn has_method(members: &[MemberDescriptor], name: &str) -> bool {
    members.iter().any(|m| m.is_parameterless_void_method(name))
}
