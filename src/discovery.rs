//! Input discovery.
//!
//! Turns the paths given on the command line into the ordered list of files
//! the batch pipeline processes.

use ptav_av::ArtifactNaming;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand `paths` into a sorted, de-duplicated list of input files.
///
/// Files are taken as given, even without the source extension, so the
/// pipeline can report why they were rejected. Directories contribute their
/// files carrying the source extension, searching subdirectories only when
/// `recursive` is set. An empty `paths` means the current directory.
pub fn discover_inputs(paths: &[PathBuf], naming: &ArtifactNaming, recursive: bool) -> Vec<PathBuf> {
    let default = [PathBuf::from(".")];
    let roots = if paths.is_empty() { &default[..] } else { paths };

    let mut inputs = Vec::new();
    for root in roots {
        if root.is_dir() {
            inputs.extend(scan_directory(root, naming, recursive));
        } else {
            inputs.push(root.clone());
        }
    }

    inputs.sort();
    inputs.dedup();
    inputs
}

fn scan_directory(dir: &Path, naming: &ArtifactNaming, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    WalkDir::new(dir)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {:?}: {}", dir, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && naming.is_source(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}
