//! Benchmark aggregation.
//!
//! Walks a directory tree of per-category benchmark result files and merges
//! them into a single [`CombinedDocument`]. The two-level key for each file
//! is derived from its path alone: category = parent directory basename,
//! benchmark name = filename without extension. Traversal is lexically
//! sorted so repeated runs over the same tree produce identical output even
//! when two files collide on the same (benchmark, category) pair.

use crate::models::{CombineStats, CombinedDocument, ResultMap, ResultRecord};
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Filename treated as run metadata rather than benchmark data.
pub const META_FILENAME: &str = "meta.json";

/// Merge every `*.json` file under `root` into one combined document.
///
/// Skips are non-fatal: a file that cannot be read, cannot be parsed, or
/// lacks a `results` array is logged and left out, and the walk continues.
/// The run always completes and returns whatever was accumulated.
pub fn merge_benchmarks(root: &Path, default_meta: Value) -> (CombinedDocument, CombineStats) {
    let mut doc = CombinedDocument::new(default_meta);
    let mut stats = CombineStats::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        merge_file(path, &mut doc, &mut stats);
    }

    (doc, stats)
}

/// Merge a single benchmark file into the document.
fn merge_file(path: &Path, doc: &mut CombinedDocument, stats: &mut CombineStats) {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return;
    };

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            stats.skipped += 1;
            return;
        }
    };

    let data: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            warn!("Could not decode JSON in {}: {}", path.display(), e);
            stats.skipped += 1;
            return;
        }
    };

    // Run metadata replaces `meta` in full and never touches `frameworks`.
    if file_name == META_FILENAME {
        debug!("Using run metadata from {}", path.display());
        doc.meta = data;
        stats.meta_found = true;
        return;
    }

    let Some(results) = data.get("results") else {
        warn!("'results' key not found in {}", path.display());
        stats.skipped += 1;
        return;
    };

    let records: Vec<ResultRecord> = match serde_json::from_value(results.clone()) {
        Ok(r) => r,
        Err(e) => {
            warn!("Malformed 'results' in {}: {}", path.display(), e);
            stats.skipped += 1;
            return;
        }
    };

    let (benchmark_name, category) = match derive_keys(path) {
        Some(keys) => keys,
        None => {
            warn!("Could not derive benchmark/category for {}", path.display());
            stats.skipped += 1;
            return;
        }
    };

    // Duplicate names within one file collapse to the last occurrence.
    let mut results_map = ResultMap::new();
    for record in records {
        results_map.insert(record.name.clone(), record);
    }

    let categories = doc.frameworks.entry(benchmark_name.clone()).or_default();
    if categories.insert(category.clone(), results_map).is_some() {
        // Last-write-wins on an exact pair collision, deterministic because
        // traversal is sorted.
        debug!(
            "Replaced earlier results for {}/{} with {}",
            benchmark_name,
            category,
            path.display()
        );
    }
    stats.merged += 1;
}

/// Derive (benchmark name, category) from a file's path.
///
/// Benchmark name is the filename stem; category is the basename of the
/// containing directory. Pure function of the path, independent of how the
/// file was reached.
fn derive_keys(path: &Path) -> Option<(String, String)> {
    let benchmark_name = path.file_stem()?.to_str()?.to_string();
    let category = path.parent()?.file_name()?.to_str()?.to_string();
    Some((benchmark_name, category))
}

/// Write the combined document as indented JSON.
pub fn write_combined(doc: &CombinedDocument, output: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(doc).context("Failed to serialize combined data")?;
    fs::write(output, json)
        .with_context(|| format!("Failed to write combined data to {}", output.display()))?;
    Ok(())
}
