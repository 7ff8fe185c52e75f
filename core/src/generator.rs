#![deny(missing_docs)]

//! # Generator
//!
//! Runs one analysis pass: filter the host's declaration nodes, resolve the
//! candidates into work items and hand each rendered artifact to a sink.
//!
//! A pass owns its filter and resolver. Passes share nothing, so hosts may
//! run several at once as long as each gets its own inputs and sink.

use crate::codegen::DisposeWriter;
use crate::config::GeneratorConfig;
use crate::declarations::TypeDeclaration;
use crate::diagnostics::{DiagnosticSink, NullSink};
use crate::error::AppResult;
use crate::filter::CandidateFilter;
use crate::resolver::WorkResolver;
use crate::semantic::SemanticModel;
use std::sync::atomic::AtomicBool;

/// A named unit of generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Unique key, `{namespace}.{class}.Dispose{suffix}`.
    pub key: String,
    /// Generated source text.
    pub source: String,
}

/// Receives generated artifacts.
pub trait ArtifactSink {
    /// Accepts one artifact.
    fn add_source(&mut self, key: &str, source: &str) -> AppResult<()>;
}

impl ArtifactSink for Vec<Artifact> {
    fn add_source(&mut self, key: &str, source: &str) -> AppResult<()> {
        self.push(Artifact {
            key: key.to_string(),
            source: source.to_string(),
        });
        Ok(())
    }
}

/// Counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Declaration nodes seen.
    pub visited: usize,
    /// Nodes that passed the syntactic filter.
    pub candidates: usize,
    /// Artifacts handed to the sink.
    pub generated: usize,
}

/// Entry point for hosts.
#[derive(Debug, Clone, Default)]
pub struct DisposeGenerator {
    config: GeneratorConfig,
}

impl DisposeGenerator {
    /// Creates a generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs a pass with no diagnostics and no cancellation.
    pub fn execute<'a, I, M, S>(&self, nodes: I, model: &M, sink: &mut S) -> AppResult<PassSummary>
    where
        I: IntoIterator<Item = &'a TypeDeclaration>,
        M: SemanticModel + ?Sized,
        S: ArtifactSink + ?Sized,
    {
        self.execute_with(nodes, model, sink, &mut NullSink, None)
    }

    /// Runs a pass.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Declaration nodes in host traversal order.
    /// * `model` - Semantic information for those nodes.
    /// * `sink` - Receives one artifact per qualifying type.
    /// * `diagnostics` - Receives advisory diagnostics, if enabled.
    /// * `cancel` - Checked between candidates; when set, nothing is emitted.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn execute_with<'a, I, M, S>(
        &self,
        nodes: I,
        model: &M,
        sink: &mut S,
        diagnostics: &mut dyn DiagnosticSink,
        cancel: Option<&AtomicBool>,
    ) -> AppResult<PassSummary>
    where
        I: IntoIterator<Item = &'a TypeDeclaration>,
        M: SemanticModel + ?Sized,
        S: ArtifactSink + ?Sized,
    {
        let mut filter =
            CandidateFilter::new(self.config.filter_policy, &self.config.disposal_interface);
        let mut visited = 0;
        for node in nodes {
            visited += 1;
            filter.visit(node);
        }

        let resolver = WorkResolver::new(&self.config);
        let work = resolver.resolve_with(filter.candidates(), model, diagnostics, cancel)?;

        for item in &work {
            let writer = DisposeWriter::new(item);
            sink.add_source(
                &writer.suggest_file_name(&self.config.artifact_suffix),
                &writer.emit(),
            )?;
        }

        let summary = PassSummary {
            visited,
            candidates: filter.len(),
            generated: work.len(),
        };
        tracing::debug!(?summary, "pass complete");

        Ok(summary)
    }
}
