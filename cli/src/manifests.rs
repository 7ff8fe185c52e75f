#![deny(missing_docs)]

//! # Manifest Discovery
//!
//! Finds type-universe manifests under an input path.

use crate::error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

fn is_manifest(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext))
}

/// Lists manifests under `input`, sorted by path.
///
/// A file is returned as-is regardless of extension; a directory is walked
/// recursively for `.yaml`, `.yml` and `.json` files.
pub fn discover(input: &Path) -> CliResult<Vec<PathBuf>> {
    if !input.exists() {
        return Err(CliError::General(format!("Input not found: {:?}", input)));
    }

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut found: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_manifest(e.path()))
        .map(|e| e.into_path())
        .collect();
    found.sort();

    Ok(found)
}
