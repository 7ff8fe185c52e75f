#![deny(missing_docs)]

//! # Generate Command
//!
//! Loads each manifest, runs an isolated analysis pass over it and writes the
//! generated dispose implementations to the output directory.

use crate::error::{CliError, CliResult};
use crate::manifests::discover;
use disposegen_core::{
    AppResult, ArtifactSink, Diagnostic, DiagnosticSink, DisposeGenerator, FilterPolicy,
    GeneratorConfig, TypeUniverse,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Manifest file, or directory searched for `.yaml`/`.yml`/`.json` manifests.
    #[clap(long)]
    pub input: PathBuf,

    /// Directory receiving `{Namespace}.{Class}.Dispose{suffix}` files.
    #[clap(long, env = "DISPOSEGEN_OUTPUT", default_value = "generated")]
    pub output: PathBuf,

    /// Optional YAML configuration file.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Candidate filter policy (`loose` or `strict`). Overrides the config file.
    #[clap(long)]
    pub policy: Option<FilterPolicy>,

    /// Warn about disposable types with nothing to clean up.
    #[clap(long)]
    pub warn_empty: bool,

    /// Artifact suffix. Overrides the config file.
    #[clap(long)]
    pub suffix: Option<String>,

    /// Print generated sources instead of writing them.
    #[clap(long)]
    pub dry_run: bool,
}

/// Builds the effective configuration: file (or defaults) first, then flags.
pub fn effective_config(
    config: Option<&Path>,
    policy: Option<FilterPolicy>,
    warn_empty: bool,
    suffix: Option<&str>,
) -> CliResult<GeneratorConfig> {
    let mut effective = match config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(policy) = policy {
        effective.filter_policy = policy;
    }
    if warn_empty {
        effective.report_empty_work = true;
    }
    if let Some(suffix) = suffix {
        effective.artifact_suffix = suffix.to_string();
    }

    Ok(effective)
}

/// Writes each artifact to `{dir}/{key}`.
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Creates the sink, creating `dir` if needed.
    pub fn create(dir: &Path) -> CliResult<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| CliError::General(format!("Failed to create output dir: {}", e)))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: Vec::new(),
        })
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ArtifactSink for DirectorySink {
    fn add_source(&mut self, key: &str, source: &str) -> AppResult<()> {
        let path = self.dir.join(key);
        if self.written.contains(&path) {
            tracing::warn!(?path, "artifact written by an earlier manifest, overwriting");
        }
        fs::write(&path, source)?;
        tracing::debug!(?path, "artifact written");
        self.written.push(path);
        Ok(())
    }
}

/// Prints each artifact to stdout under a header comment.
pub struct StdoutSink;

impl ArtifactSink for StdoutSink {
    fn add_source(&mut self, key: &str, source: &str) -> AppResult<()> {
        println!("// {}", key);
        print!("{}", source);
        Ok(())
    }
}

/// Prints diagnostics to stderr.
#[derive(Default)]
pub struct StderrReporter {
    reported: usize,
}

impl DiagnosticSink for StderrReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported += 1;
        eprintln!("{}", diagnostic);
    }
}

/// Executes the generation.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let config = effective_config(
        args.config.as_deref(),
        args.policy,
        args.warn_empty,
        args.suffix.as_deref(),
    )?;
    let generator = DisposeGenerator::new(config);

    let manifests = discover(&args.input)?;
    if manifests.is_empty() {
        println!("No manifests found under {:?}.", args.input);
        return Ok(());
    }

    let mut reporter = StderrReporter::default();
    let mut directory = if args.dry_run {
        None
    } else {
        Some(DirectorySink::create(&args.output)?)
    };

    for manifest in &manifests {
        // One universe per manifest: passes never share state.
        let universe = TypeUniverse::load(manifest)?;
        let summary = match directory.as_mut() {
            Some(sink) => generator.execute_with(
                universe.declarations(),
                &universe,
                sink,
                &mut reporter,
                None,
            )?,
            None => generator.execute_with(
                universe.declarations(),
                &universe,
                &mut StdoutSink,
                &mut reporter,
                None,
            )?,
        };

        tracing::info!(
            manifest = ?manifest,
            visited = summary.visited,
            candidates = summary.candidates,
            generated = summary.generated,
            "manifest processed"
        );
        if directory.is_some() {
            println!("  -> {} artifact(s) from {:?}", summary.generated, manifest);
        }
    }

    if let Some(sink) = &directory {
        println!(
            "Generated {} file(s) in {:?} ({} warning(s)).",
            sink.written().len(),
            args.output,
            reporter.reported
        );
    }

    Ok(())
}
