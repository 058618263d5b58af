// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

pub mod resolver;
pub mod serialization;
pub mod writer;

pub use resolver::DirectorySource;
pub use writer::write_artifact;

use crate::compaction::{self, Compact, CompactStats};
use crate::dataset::Dataset;
use crate::raw_value::RawValue;
use crate::traits::{ArtifactSource, DatasetError};
use serde_json::Value;

/// Conversions between dataset trees and artifact bytes.
///
/// This is the in-memory half of the pipeline; [`write_artifact`] and
/// [`DirectorySource`] add the filesystem.
///
/// # Example
///
/// ```
/// use listings_compact::{ArtifactCodec, RawValue};
/// use serde_json::json;
///
/// let raw = RawValue::object()
///     .with("title", "Paris, Texas")
///     .with("subtitle", RawValue::Absent);
///
/// let bytes = ArtifactCodec::encode_raw(raw).unwrap();
/// let tree = ArtifactCodec::decode_bytes(&bytes).unwrap();
/// assert_eq!(tree, json!({"title": "Paris, Texas"}));
/// ```
pub struct ArtifactCodec;

impl ArtifactCodec {
    /// Trims, encodes and serializes a raw tree.
    pub fn encode_raw(raw: RawValue) -> Result<Vec<u8>, DatasetError> {
        serialization::raw_to_artifact_bytes(raw)
    }

    /// Encodes and serializes an already-canonical tree.
    pub fn encode_value(tree: &Value) -> Result<Vec<u8>, DatasetError> {
        serialization::value_to_artifact_bytes(tree)
    }

    /// Parses artifact bytes without decoding them.
    pub fn parse(bytes: &[u8]) -> Result<Compact, DatasetError> {
        serialization::parse_artifact(bytes)
    }

    /// Parses and decodes artifact bytes into the canonical tree.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Value, DatasetError> {
        serialization::artifact_bytes_to_value(bytes)
    }
}

/// What a single artifact read produced.
#[derive(Debug)]
pub struct ArtifactReport {
    pub name: String,
    pub bytes: usize,
    pub stats: CompactStats,
    pub dataset: Dataset,
}

/// Resolves and reads one artifact, then derives both the stats and the
/// dataset from those same bytes.
pub async fn inspect_artifact(
    source: &dyn ArtifactSource,
) -> Result<ArtifactReport, DatasetError> {
    let name = source.resolve().await?;
    let bytes = source.read(&name).await?;
    let compact = ArtifactCodec::parse(&bytes)?;
    let dataset = Dataset::new(compaction::decode(&compact)?);
    Ok(ArtifactReport {
        name,
        bytes: bytes.len(),
        stats: compact.stats(),
        dataset,
    })
}
