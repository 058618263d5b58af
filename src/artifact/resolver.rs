// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::config::ArtifactConfig;
use crate::traits::{ArtifactSource, DatasetError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Artifact source backed by the build output directory.
///
/// The artifact name is not fixed; any regular, non-hidden file with the
/// configured extension is a candidate.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    config: ArtifactConfig,
}

impl DirectorySource {
    pub fn new(config: ArtifactConfig) -> Self {
        Self { config }
    }

    pub fn dir(&self) -> &Path {
        &self.config.output_dir
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(name)
    }

    /// All candidate file names in the directory, sorted.
    pub async fn candidates(&self) -> Result<Vec<String>, DatasetError> {
        list_candidates(&self.config).await
    }
}

pub(crate) async fn list_candidates(config: &ArtifactConfig) -> Result<Vec<String>, DatasetError> {
    let dir = &config.output_dir;
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
        DatasetError::ArtifactNotFound(format!("Cannot read {}: {}", dir.display(), e))
    })?;

    let mut names = Vec::new();
    loop {
        let entry = entries.next_entry().await.map_err(|e| {
            DatasetError::ArtifactNotFound(format!("Cannot list {}: {}", dir.display(), e))
        })?;
        let Some(entry) = entry else {
            break;
        };
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !config.is_candidate(&name) {
            continue;
        }
        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);
        if is_file {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

#[async_trait]
impl ArtifactSource for DirectorySource {
    async fn resolve(&self) -> Result<String, DatasetError> {
        let mut names = self.candidates().await?;
        if names.is_empty() {
            return Err(DatasetError::ArtifactNotFound(format!(
                "No *.{} artifact in {}",
                self.config.extension,
                self.dir().display()
            )));
        }
        if names.len() > 1 {
            warn!(
                dir = %self.dir().display(),
                candidates = ?names,
                "Multiple artifacts found, using the first"
            );
        }
        let name = names.swap_remove(0);
        debug!(dir = %self.dir().display(), artifact = %name, "Resolved artifact");
        Ok(name)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, DatasetError> {
        let path = self.path_of(name);
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DatasetError::ArtifactNotFound(format!("{} disappeared: {}", path.display(), e))
            } else {
                DatasetError::Io(format!("Cannot read {}: {}", path.display(), e))
            }
        })
    }
}
