// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// Error type for dataset compaction and loading.
///
/// Payloads are plain strings so the error is `Clone`: a single failed load
/// is handed to every caller that was waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("Malformed artifact: {0}")]
    MalformedArtifact(String),
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),
    #[error("Encode failure: {0}")]
    EncodeFailure(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DatasetError {
    /// Returns true for errors that mean the artifact itself is unusable.
    pub fn is_artifact_error(&self) -> bool {
        matches!(
            self,
            DatasetError::MalformedArtifact(_) | DatasetError::ArtifactNotFound(_)
        )
    }
}

/// Where the loader gets artifact bytes from.
///
/// The production implementation is [`crate::artifact::DirectorySource`],
/// which scans an output directory. Artifact names are opaque to callers:
/// whatever `resolve` returns is handed back to `read` unchanged.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Locates the single data artifact and returns its name.
    async fn resolve(&self) -> Result<String, DatasetError>;

    /// Reads the full contents of a resolved artifact.
    async fn read(&self, name: &str) -> Result<Vec<u8>, DatasetError>;
}
