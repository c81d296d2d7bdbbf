//! JSON catalog snapshots: a file holding an array of perfumes in their serde form.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use aromatica_core::catalog::{CatalogError, CatalogSource};
use aromatica_core::domain::perfume::Perfume;

/// Read and decode a snapshot, rejecting perfumes that fail validation.
pub async fn load_snapshot(path: &Path) -> Result<Vec<Perfume>, CatalogError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|error| {
        CatalogError::Unavailable(format!("could not read `{}`: {error}", path.display()))
    })?;

    let perfumes: Vec<Perfume> = serde_json::from_str(&raw)
        .map_err(|error| CatalogError::Decode(format!("`{}`: {error}", path.display())))?;

    for perfume in &perfumes {
        perfume.validate().map_err(|error| {
            CatalogError::Decode(format!("`{}`: perfume {}: {error}", path.display(), perfume.id))
        })?;
    }

    info!(
        event_name = "catalog.snapshot_loaded",
        path = %path.display(),
        perfume_count = perfumes.len(),
        "catalog snapshot loaded"
    );
    Ok(perfumes)
}

/// Catalog collaborator that re-reads its snapshot file on every fetch.
#[derive(Clone, Debug)]
pub struct SnapshotCatalog {
    path: PathBuf,
}

impl SnapshotCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for SnapshotCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<Perfume>, CatalogError> {
        load_snapshot(&self.path).await
    }
}
