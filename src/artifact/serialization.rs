// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::compaction::{self, Compact};
use crate::raw_value::RawValue;
use crate::traits::DatasetError;
use crate::trim::trim;
use serde_json::Value;

/// Serializes a compact value to artifact bytes (UTF-8 JSON).
pub fn compact_to_bytes(compact: &Compact) -> Result<Vec<u8>, DatasetError> {
    serde_json::to_vec(compact).map_err(|e| DatasetError::EncodeFailure(e.to_string()))
}

/// Trims, encodes and serializes a raw tree.
pub fn raw_to_artifact_bytes(raw: RawValue) -> Result<Vec<u8>, DatasetError> {
    value_to_artifact_bytes(&trim(raw))
}

/// Encodes and serializes a canonical tree.
pub fn value_to_artifact_bytes(tree: &Value) -> Result<Vec<u8>, DatasetError> {
    compact_to_bytes(&compaction::encode(tree))
}

/// Parses artifact bytes into a compact value.
pub fn parse_artifact(bytes: &[u8]) -> Result<Compact, DatasetError> {
    serde_json::from_slice(bytes)
        .map_err(|e| DatasetError::MalformedArtifact(format!("Artifact parse error: {}", e)))
}

/// Parses and decodes artifact bytes.
pub fn artifact_bytes_to_value(bytes: &[u8]) -> Result<Value, DatasetError> {
    compaction::decode(&parse_artifact(bytes)?)
}
