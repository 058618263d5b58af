// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Dictionary Compaction Codec
//!
//! Encodes a canonical tree into a [`Compact`] value: a dictionary of distinct
//! values plus a `data` shape that references dictionary slots by index.
//! Decoding resolves every reference and reproduces the original tree,
//! including object key order and array order.
//!
//! # Layout
//!
//! - **Shape**: a non-negative integer is a dictionary reference; an array is
//!   an array of shapes; an object keeps its original keys, in order, each
//!   mapped to a shape. No other JSON value is valid inside a shape.
//! - **Dictionary**: scalars (null, bool, number, string) are interned the
//!   first time they are seen. A non-empty array or object that occurs more
//!   than once in the input is interned as a shared shape on its first
//!   occurrence, after its children. Empty containers are written inline.
//!
//! A shared shape at slot `i` only references slots below `i`, so decoding is
//! a single forward pass over the dictionary.
//!
//! # Example
//!
//! ```
//! use listings_compact::compaction::{decode, encode};
//! use serde_json::json;
//!
//! let tree = json!({
//!     "venues": ["Rio", "Rio", "Curzon"],
//!     "showings": [{"venue": "Rio"}, {"venue": "Rio"}]
//! });
//!
//! let compact = encode(&tree);
//! assert_eq!(decode(&compact).unwrap(), tree);
//! ```

use crate::traits::DatasetError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Artifact format version written by [`encode`] and required by [`decode`].
pub const FORMAT_VERSION: u32 = 1;

/// The compact, serializable form of a canonical tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compact {
    pub version: u32,
    pub dictionary: Vec<Value>,
    pub data: Value,
}

/// Summary of a [`Compact`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompactStats {
    pub dictionary_len: usize,
    pub scalar_entries: usize,
    pub shared_entries: usize,
    /// Direct references written in `data` and in shared shapes.
    pub references: usize,
}

impl Compact {
    /// Counts how many positions of the decoded tree a dictionary slot fills.
    ///
    /// References made from inside a shared shape count once for every
    /// position that shape fills, so a string used at N places reports N
    /// even when some of those places sit inside a repeated subtree.
    pub fn reference_count(&self, index: usize) -> usize {
        self.occurrences().get(index).copied().unwrap_or(0)
    }

    /// Decoded-tree occurrence count for every dictionary slot.
    ///
    /// Only meaningful for well-formed values: shared shapes must reference
    /// earlier slots only.
    pub fn occurrences(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.dictionary.len()];
        walk_references(&self.data, &mut |i| {
            if let Some(c) = counts.get_mut(i) {
                *c += 1;
            }
        });
        // Shared shapes only point backwards, so walking from the end settles
        // each slot's count before it is pushed down to its children.
        for (slot, entry) in self.dictionary.iter().enumerate().rev() {
            if !is_composite(entry) || counts[slot] == 0 {
                continue;
            }
            let weight = counts[slot];
            walk_references(entry, &mut |i| {
                if i < slot {
                    counts[i] += weight;
                }
            });
        }
        counts
    }

    pub fn stats(&self) -> CompactStats {
        let shared_entries = self.dictionary.iter().filter(|e| is_composite(e)).count();
        let mut references = 0;
        self.for_each_reference(|_| references += 1);
        CompactStats {
            dictionary_len: self.dictionary.len(),
            scalar_entries: self.dictionary.len() - shared_entries,
            shared_entries,
            references,
        }
    }

    fn for_each_reference(&self, mut f: impl FnMut(usize)) {
        for entry in self.dictionary.iter().filter(|e| is_composite(e)) {
            walk_references(entry, &mut f);
        }
        walk_references(&self.data, &mut f);
    }
}

fn walk_references(shape: &Value, f: &mut impl FnMut(usize)) {
    match shape {
        Value::Number(n) => {
            if let Some(i) = n.as_u64() {
                f(i as usize);
            }
        }
        Value::Array(items) => items.iter().for_each(|s| walk_references(s, f)),
        Value::Object(map) => map.values().for_each(|s| walk_references(s, f)),
        _ => {}
    }
}

fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

// ============================================================================
// Encode
// ============================================================================

/// Structural identity of a subtree. Children are referred to by node id, so
/// equal keys mean deeply equal, order-sensitive subtrees.
#[derive(Debug, PartialEq, Eq, Hash)]
enum NodeKey<'a> {
    Null,
    Bool(bool),
    // Textual form keeps `1` and `1.0` apart.
    Number(String),
    String(&'a str),
    Array(Vec<u32>),
    Object(Vec<(&'a str, u32)>),
}

#[derive(Default)]
struct Encoder<'a> {
    node_ids: HashMap<NodeKey<'a>, u32>,
    occurrences: Vec<u32>,
    slots: Vec<Option<usize>>,
    dictionary: Vec<Value>,
}

impl<'a> Encoder<'a> {
    fn node_id(&mut self, key: NodeKey<'a>) -> u32 {
        if let Some(&id) = self.node_ids.get(&key) {
            return id;
        }
        let id = self.occurrences.len() as u32;
        self.node_ids.insert(key, id);
        self.occurrences.push(0);
        self.slots.push(None);
        id
    }

    /// First pass: assigns node ids and counts occurrences of each subtree.
    fn count(&mut self, value: &'a Value) -> u32 {
        let key = match value {
            Value::Array(items) => NodeKey::Array(items.iter().map(|v| self.count(v)).collect()),
            Value::Object(map) => NodeKey::Object(
                map.iter()
                    .map(|(k, v)| (k.as_str(), self.count(v)))
                    .collect(),
            ),
            scalar => scalar_key(scalar),
        };
        let id = self.node_id(key);
        self.occurrences[id as usize] += 1;
        id
    }

    /// Second pass: interns in first-seen order and builds the shape.
    fn emit(&mut self, value: &'a Value) -> (u32, Value) {
        match value {
            Value::Array(items) => {
                let (ids, shapes): (Vec<u32>, Vec<Value>) =
                    items.iter().map(|v| self.emit(v)).unzip();
                let id = self.node_id(NodeKey::Array(ids));
                (id, self.share(id, Value::Array(shapes)))
            }
            Value::Object(map) => {
                let mut key = Vec::with_capacity(map.len());
                let mut shape = Map::with_capacity(map.len());
                for (k, v) in map {
                    let (child, child_shape) = self.emit(v);
                    key.push((k.as_str(), child));
                    shape.insert(k.clone(), child_shape);
                }
                let id = self.node_id(NodeKey::Object(key));
                (id, self.share(id, Value::Object(shape)))
            }
            scalar => {
                let id = self.node_id(scalar_key(scalar));
                let slot = self.slot(id, || scalar.clone());
                (id, Value::from(slot))
            }
        }
    }

    /// Replaces a repeated, non-empty container shape with a reference.
    fn share(&mut self, id: u32, shape: Value) -> Value {
        let empty = match &shape {
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => true,
        };
        if empty || self.occurrences[id as usize] < 2 {
            return shape;
        }
        Value::from(self.slot(id, || shape))
    }

    fn slot(&mut self, id: u32, entry: impl FnOnce() -> Value) -> usize {
        if let Some(slot) = self.slots[id as usize] {
            return slot;
        }
        let slot = self.dictionary.len();
        self.dictionary.push(entry());
        self.slots[id as usize] = Some(slot);
        slot
    }
}

fn scalar_key(value: &Value) -> NodeKey<'_> {
    match value {
        Value::Null => NodeKey::Null,
        Value::Bool(b) => NodeKey::Bool(*b),
        Value::Number(n) => NodeKey::Number(n.to_string()),
        Value::String(s) => NodeKey::String(s),
        Value::Array(_) | Value::Object(_) => unreachable!("containers are keyed by their children"),
    }
}

/// Encodes a canonical tree.
///
/// Deterministic: the same input always yields the same dictionary order
/// and the same indices.
pub fn encode(tree: &Value) -> Compact {
    let mut encoder = Encoder::default();
    encoder.count(tree);
    let (_, data) = encoder.emit(tree);
    debug!(
        distinct_nodes = encoder.occurrences.len(),
        dictionary_len = encoder.dictionary.len(),
        "Encoded canonical tree"
    );
    Compact {
        version: FORMAT_VERSION,
        dictionary: encoder.dictionary,
        data,
    }
}

// ============================================================================
// Decode
// ============================================================================

/// Decodes a compact value back into the canonical tree.
///
/// Fails with [`DatasetError::MalformedArtifact`] on an unknown version, a
/// reference with no dictionary slot, a forward reference inside a shared
/// shape, or a non-reference scalar inside a shape. Nothing is returned on
/// failure.
pub fn decode(compact: &Compact) -> Result<Value, DatasetError> {
    if compact.version != FORMAT_VERSION {
        return Err(DatasetError::MalformedArtifact(format!(
            "Unsupported format version {} (expected {})",
            compact.version, FORMAT_VERSION
        )));
    }

    let mut resolved: Vec<Value> = Vec::with_capacity(compact.dictionary.len());
    for entry in &compact.dictionary {
        let value = if is_composite(entry) {
            resolve(entry, &resolved)?
        } else {
            entry.clone()
        };
        resolved.push(value);
    }

    resolve(&compact.data, &resolved)
}

/// Resolves a shape against the slots decoded so far.
fn resolve(shape: &Value, resolved: &[Value]) -> Result<Value, DatasetError> {
    match shape {
        Value::Number(n) => {
            let index = n.as_u64().ok_or_else(|| {
                DatasetError::MalformedArtifact(format!("Invalid dictionary reference: {}", n))
            })?;
            usize::try_from(index)
                .ok()
                .and_then(|i| resolved.get(i))
                .cloned()
                .ok_or_else(|| {
                    DatasetError::MalformedArtifact(format!(
                        "Dictionary reference {} has no entry ({} available)",
                        index,
                        resolved.len()
                    ))
                })
        }
        Value::Array(items) => items
            .iter()
            .map(|s| resolve(s, resolved))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, s) in map {
                out.insert(key.clone(), resolve(s, resolved)?);
            }
            Ok(Value::Object(out))
        }
        other => Err(DatasetError::MalformedArtifact(format!(
            "Unexpected literal in shape: {}",
            other
        ))),
    }
}
