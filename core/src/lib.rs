#![deny(missing_docs)]

//! # Disposegen Core
//!
//! Decides which class declarations need the dispose pattern and renders it.
//!
//! declarations → [`filter`] → candidates → [`resolver`] (+ [`semantic`] model)
//! → [`WorkItem`]s → [`codegen`] → artifacts keyed `{namespace}.{class}.Dispose{suffix}`.

/// Shared error types.
pub mod error;

/// Pass configuration.
pub mod config;

/// Syntactic declaration nodes.
pub mod declarations;

/// Syntactic candidate filter.
pub mod filter;

/// Semantic information provider and its in-memory implementation.
pub mod semantic;

/// Work item data model.
pub mod work;

/// Advisory diagnostics.
pub mod diagnostics;

/// Work determination.
pub mod resolver;

/// Dispose pattern emitter.
pub mod codegen;

/// Pass orchestration.
pub mod generator;

pub use codegen::{render, DisposeWriter};
pub use config::GeneratorConfig;
pub use declarations::{DeclarationKind, TypeDeclaration};
pub use diagnostics::{no_cleanup_work, Diagnostic, DiagnosticSink, NullSink, Severity};
pub use error::{AppError, AppResult};
pub use filter::{collect_candidates, CandidateFilter, FilterPolicy};
pub use generator::{Artifact, ArtifactSink, DisposeGenerator, PassSummary};
pub use resolver::WorkResolver;
pub use semantic::{
    Accessibility, MemberDescriptor, MemberKind, SemanticModel, TypeKind, TypeSymbol, TypeUniverse,
};
pub use work::WorkItem;
