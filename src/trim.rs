// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Tree trimming.
//!
//! Removes absent-valued object entries at every depth so the tree can be
//! handed to the codec as a canonical [`serde_json::Value`].

use crate::raw_value::RawValue;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Removes every absent object entry, recursively, in place.
///
/// When an object repeats a key, its last occurrence decides: if that one is
/// absent, every entry under the key goes. Array lengths never change: an
/// absent array element is left alone here and becomes `null` when the tree
/// is converted by [`trim`]. Idempotent.
pub fn trim_in_place(value: &mut RawValue) {
    match value {
        RawValue::Array(items) => items.iter_mut().for_each(trim_in_place),
        RawValue::Object(entries) => {
            retain_present(entries);
            entries.iter_mut().for_each(|(_, v)| trim_in_place(v));
        }
        _ => {}
    }
}

/// Trims a raw tree and converts it into a canonical tree.
///
/// An absent root or absent array element becomes `null`. When an object
/// repeats a key, the last occurrence decides: absent removes the key,
/// otherwise its value lands at the position of the first present entry.
/// `trim(x)` equals `trim` of `x` after [`trim_in_place`].
pub fn trim(value: RawValue) -> Value {
    match value {
        RawValue::Absent | RawValue::Null => Value::Null,
        RawValue::Bool(b) => Value::Bool(b),
        RawValue::Number(n) => Value::Number(n),
        RawValue::String(s) => Value::String(s),
        RawValue::Array(items) => Value::Array(items.into_iter().map(trim).collect()),
        RawValue::Object(mut entries) => {
            retain_present(&mut entries);
            let mut map = Map::with_capacity(entries.len());
            for (key, v) in entries {
                map.insert(key, trim(v));
            }
            Value::Object(map)
        }
    }
}

/// Drops absent entries, and every entry of a key whose last occurrence is
/// absent.
fn retain_present(entries: &mut Vec<(String, RawValue)>) {
    if !entries.iter().any(|(_, v)| v.is_absent()) {
        return;
    }
    let mut seen = HashSet::new();
    let mut dropped = HashSet::new();
    for (key, v) in entries.iter().rev() {
        if seen.insert(key.as_str()) && v.is_absent() {
            dropped.insert(key.clone());
        }
    }
    entries.retain(|(k, v)| !v.is_absent() && !dropped.contains(k));
}
