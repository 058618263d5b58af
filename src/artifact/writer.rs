// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use super::resolver::list_candidates;
use super::serialization::raw_to_artifact_bytes;
use crate::config::{ArtifactConfig, ArtifactNaming};
use crate::raw_value::RawValue;
use crate::traits::DatasetError;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Build-time entry point: trims, encodes and writes the dataset artifact.
///
/// The artifact is fully serialized before anything touches the disk, then
/// written to a hidden temporary file and renamed into place, so a failed
/// build never leaves a partial artifact behind. Artifacts from earlier
/// builds are removed afterwards, leaving exactly one candidate for the
/// resolver.
///
/// Returns the path of the written artifact.
pub async fn write_artifact(
    raw: RawValue,
    config: &ArtifactConfig,
    naming: &ArtifactNaming,
) -> Result<PathBuf, DatasetError> {
    let started = Instant::now();
    let bytes = raw_to_artifact_bytes(raw)?;
    let name = naming.file_name(&bytes, config)?;
    let dir = &config.output_dir;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| io_error("create", dir, e))?;

    let path = dir.join(&name);
    let tmp = dir.join(format!(".{}.tmp", name));
    if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(io_error("write", &tmp, e));
    }
    if let Err(e) = tokio::fs::rename(&tmp, &path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(io_error("rename", &tmp, e));
    }

    remove_stale_artifacts(config, &name).await;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Wrote dataset artifact"
    );
    Ok(path)
}

/// Removes every candidate other than `keep`.
///
/// The new artifact is already in place when this runs, so failures here are
/// logged and never turned into a build error.
async fn remove_stale_artifacts(config: &ArtifactConfig, keep: &str) {
    let candidates = match list_candidates(config).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(error = %e, "Cannot list artifacts for cleanup");
            return;
        }
    };
    for stale in candidates.into_iter().filter(|c| c != keep) {
        let stale_path = config.output_dir.join(&stale);
        match tokio::fs::remove_file(&stale_path).await {
            Ok(()) => debug!(path = %stale_path.display(), "Removed stale artifact"),
            Err(e) => warn!(path = %stale_path.display(), error = %e, "Failed to remove stale artifact"),
        }
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> DatasetError {
    DatasetError::Io(format!("Cannot {} {}: {}", action, path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::serialization::artifact_bytes_to_value;
    use serde_json::json;

    #[tokio::test]
    async fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArtifactConfig::new(dir.path().join("out/data"));
        let raw = RawValue::from(json!({"movies": {"m1": {"title": "Ran"}}}));

        let path = write_artifact(raw, &config, &ArtifactNaming::default())
            .await
            .unwrap();

        assert!(path.starts_with(&config.output_dir));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(
            artifact_bytes_to_value(&bytes).unwrap(),
            json!({"movies": {"m1": {"title": "Ran"}}})
        );
    }

    #[tokio::test]
    async fn test_write_replaces_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArtifactConfig::new(dir.path());
        std::fs::write(dir.path().join("data-old.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("keep.txt"), b"").unwrap();

        let path = write_artifact(
            RawValue::from(json!([1, 2])),
            &config,
            &ArtifactNaming::Fixed("listings.json".into()),
        )
        .await
        .unwrap();

        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["keep.txt", "listings.json"]);
        assert_eq!(path, dir.path().join("listings.json"));
    }

    #[tokio::test]
    async fn test_cleanup_failure_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArtifactConfig::new(dir.path().join("gone"));

        // Listing a missing directory fails; cleanup only logs it.
        remove_stale_artifacts(&config, "listings.json").await;
        assert!(!config.output_dir.exists());
    }

    #[tokio::test]
    async fn test_cleanup_keeps_named_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArtifactConfig::new(dir.path());
        for name in ["a.json", "b.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"{}").unwrap();
        }

        remove_stale_artifacts(&config, "b.json").await;

        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["b.json", "notes.txt"]);
    }

    #[tokio::test]
    async fn test_invalid_name_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArtifactConfig::new(dir.path().join("out"));
        let err = write_artifact(
            RawValue::Null,
            &config,
            &ArtifactNaming::Fixed("listings.bin".into()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DatasetError::InvalidInput(_)));
        assert!(!config.output_dir.exists());
    }
}
