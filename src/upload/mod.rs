//! Benchmark upload.
//!
//! Reads a flat directory of JSON files and stores them as the fields of a
//! single new document in a remote collection. All failures here are fatal:
//! a malformed input file, a missing credential, or a failed request aborts
//! the run, and because the write is one document-create call, no partial
//! document is ever committed.

pub mod firestore;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A remote store that can create one document in a named collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a new document with the given fields and return its
    /// fully-qualified name.
    async fn create_document(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String>;
}

/// Load every `*.json` file in `dir` (non-recursive) into a mapping keyed by
/// filename without its extension.
///
/// Unlike aggregation, a file that fails to parse is fatal here.
pub fn collect_documents(dir: &Path) -> Result<Map<String, Value>> {
    let mut documents = Map::new();

    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("Failed to list directory {}", dir.display()))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;

        debug!("Loaded {} as document key '{}'", path.display(), stem);
        documents.insert(stem.to_string(), value);
    }

    Ok(documents)
}

/// Upload every JSON file in `dir` as one new document in `collection`.
pub async fn upload_directory(
    store: &dyn DocumentStore,
    dir: &Path,
    collection: &str,
) -> Result<String> {
    let documents = collect_documents(dir)?;
    info!(
        "Uploading {} document(s) to collection '{}'",
        documents.len(),
        collection
    );

    let name = store.create_document(collection, &documents).await?;
    info!("Created {}", name);
    Ok(name)
}
