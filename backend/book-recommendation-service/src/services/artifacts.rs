//! On-disk shape of the offline artifacts.
//!
//! Each artifact is JSON or bincode, chosen by file extension. The loader
//! only depends on the logical shape below, never on a byte layout.

use crate::config::ArtifactConfig;
use crate::error::{AppError, Result};
use crate::models::{Book, PopularRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CATALOG_FILE: &str = "books.json";
pub const POPULARITY_FILE: &str = "popular.json";
pub const INTERACTION_FILE: &str = "pt.json";
pub const SIMILARITY_FILE: &str = "similarity_scores.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") | Some("bincode") => ArtifactFormat::Bincode,
            _ => ArtifactFormat::Json,
        }
    }
}

/// Book × user rating pivot. `values[r][u]` is 0 where user `u` never rated book `r`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionArtifact {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Square item-item similarity scores, rows aligned with the interaction rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityArtifact {
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    pub scores: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub catalog: PathBuf,
    pub popularity: PathBuf,
    pub interaction: PathBuf,
    pub similarity: PathBuf,
}

impl ArtifactPaths {
    pub fn from_config(config: &ArtifactConfig) -> Self {
        Self {
            catalog: normalize_path(&config.catalog_path, CATALOG_FILE),
            popularity: normalize_path(&config.popularity_path, POPULARITY_FILE),
            interaction: normalize_path(&config.interaction_path, INTERACTION_FILE),
            similarity: normalize_path(&config.similarity_path, SIMILARITY_FILE),
        }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            catalog: dir.join(CATALOG_FILE),
            popularity: dir.join(POPULARITY_FILE),
            interaction: dir.join(INTERACTION_FILE),
            similarity: dir.join(SIMILARITY_FILE),
        }
    }
}

/// Everything the offline job produces, deserialized but not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSet {
    pub catalog: Vec<Book>,
    pub popularity: Vec<PopularRecord>,
    pub interaction: InteractionArtifact,
    pub similarity: SimilarityArtifact,
}

impl ArtifactSet {
    pub fn read(paths: &ArtifactPaths) -> Result<Self> {
        Ok(Self {
            catalog: read_artifact(&paths.catalog)?,
            popularity: read_artifact(&paths.popularity)?,
            interaction: read_artifact(&paths.interaction)?,
            similarity: read_artifact(&paths.similarity)?,
        })
    }

    pub fn write(&self, paths: &ArtifactPaths) -> Result<()> {
        write_artifact(&paths.catalog, &self.catalog)?;
        write_artifact(&paths.popularity, &self.popularity)?;
        write_artifact(&paths.interaction, &self.interaction)?;
        write_artifact(&paths.similarity, &self.similarity)?;
        Ok(())
    }
}

fn normalize_path(path: &str, default_file: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_dir() {
        candidate.join(default_file)
    } else {
        candidate.to_path_buf()
    }
}

pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read(path)
        .map_err(|err| AppError::Io(format!("{}: {}", path.display(), err)))?;
    if data.is_empty() {
        return Err(AppError::Serialization(format!(
            "{}: artifact is empty",
            path.display()
        )));
    }

    debug!(path = %path.display(), bytes = data.len(), "Reading artifact");

    match ArtifactFormat::from_path(path) {
        ArtifactFormat::Json => serde_json::from_slice(&data)
            .map_err(|err| AppError::Serialization(format!("{}: {}", path.display(), err))),
        ArtifactFormat::Bincode => bincode::deserialize(&data)
            .map_err(|err| AppError::Serialization(format!("{}: {}", path.display(), err))),
    }
}

pub fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = match ArtifactFormat::from_path(path) {
        ArtifactFormat::Json => serde_json::to_vec(value)?,
        ArtifactFormat::Bincode => bincode::serialize(value)?,
    };
    fs::write(path, data).map_err(|err| AppError::Io(format!("{}: {}", path.display(), err)))
}
