// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::traits::DatasetError;
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;
use std::path::{Path, PathBuf};

/// Environment variable that overrides [`ArtifactConfig::output_dir`].
pub const DATA_DIR_ENV: &str = "LISTINGS_DATA_DIR";

/// Where artifacts are written and looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub output_dir: PathBuf,
    /// File extension of artifact candidates, without the leading dot.
    pub extension: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data"),
            extension: "json".to_string(),
        }
    }
}

impl ArtifactConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Defaults, with `LISTINGS_DATA_DIR` applied when set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    /// Returns true if `name` looks like an artifact under this config.
    pub fn is_candidate(&self, name: &str) -> bool {
        !name.starts_with('.')
            && Path::new(name)
                .extension()
                .is_some_and(|ext| ext == self.extension.as_str())
    }
}

/// How the build step names the artifact it writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactNaming {
    /// `<prefix>-<16 hex digits>.<ext>`, the digits hashing the artifact bytes.
    ContentAddressed { prefix: String },
    Fixed(String),
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        ArtifactNaming::ContentAddressed {
            prefix: "data".to_string(),
        }
    }
}

impl ArtifactNaming {
    /// Produces the file name for serialized artifact `bytes`.
    pub fn file_name(&self, bytes: &[u8], config: &ArtifactConfig) -> Result<String, DatasetError> {
        let name = match self {
            ArtifactNaming::ContentAddressed { prefix } => {
                let mut hasher = SipHasher13::new();
                hasher.write(bytes);
                format!("{}-{:016x}.{}", prefix, hasher.finish(), config.extension)
            }
            ArtifactNaming::Fixed(name) => name.clone(),
        };

        if name.contains(['/', '\\']) || !config.is_candidate(&name) {
            return Err(DatasetError::InvalidInput(format!(
                "Artifact name {:?} would not be found by the resolver (expected a plain *.{} file name)",
                name, config.extension
            )));
        }
        Ok(name)
    }
}
