#![deny(missing_docs)]

//! # Inspect Command
//!
//! Prints the work items a manifest resolves to, as JSON, without rendering
//! any source.

use crate::error::{CliError, CliResult};
use crate::generate::effective_config;
use disposegen_core::{collect_candidates, FilterPolicy, TypeUniverse, WorkItem, WorkResolver};
use std::path::{Path, PathBuf};

/// Arguments for the inspect command.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// Manifest file.
    #[clap(long)]
    pub input: PathBuf,

    /// Optional YAML configuration file.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Candidate filter policy (`loose` or `strict`).
    #[clap(long)]
    pub policy: Option<FilterPolicy>,
}

/// Resolves the work items for one manifest.
pub fn work_items(
    input: &Path,
    config: Option<&Path>,
    policy: Option<FilterPolicy>,
) -> CliResult<Vec<WorkItem>> {
    let config = effective_config(config, policy, false, None)?;
    let universe = TypeUniverse::load(input)?;

    let candidates = collect_candidates(
        config.filter_policy,
        &config.disposal_interface,
        universe.declarations(),
    );
    Ok(WorkResolver::new(&config).resolve(&candidates, &universe))
}

/// Executes the inspection.
pub fn execute(args: &InspectArgs) -> CliResult<()> {
    if !args.input.is_file() {
        return Err(CliError::General(format!(
            "Manifest not found: {:?}",
            args.input
        )));
    }

    let items = work_items(&args.input, args.config.as_deref(), args.policy)?;
    let json = serde_json::to_string_pretty(&items)
        .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?;
    println!("{}", json);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_work_items_from_json_manifest() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("types.json");
        fs::write(
            &input,
            r#"{
  "types": [
    { "namespace": "Demo", "name": "Pipe", "accessibility": "internal",
      "bases": ["System.IDisposable"],
      "members": [ { "name": "DisposeManaged" } ] },
    { "namespace": "Demo", "name": "List", "bases": ["System.Collections.IEnumerable"] }
  ]
}"#,
        )
        .unwrap();

        let items = work_items(&input, None, Some(FilterPolicy::Loose)).unwrap();
        assert_eq!(
            items,
            vec![WorkItem {
                namespace_name: "Demo".into(),
                class_name: "Pipe".into(),
                declared_accessibility: "internal".into(),
                implement_managed: true,
                ..Default::default()
            }]
        );
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempdir().unwrap();
        let args = InspectArgs {
            input: dir.path().join("none.yaml"),
            config: None,
            policy: None,
        };
        let err = execute(&args).unwrap_err();
        assert!(format!("{}", err).contains("Manifest not found"));
    }
}
