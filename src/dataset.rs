// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MOVIES: &str = "movies";
pub const SHOWINGS: &str = "showings";
pub const VENUES: &str = "venues";

/// A decoded listings dataset.
///
/// Read-only: once a loader hands it out, it is shared as `Arc<Dataset>`
/// for the rest of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    root: Value,
}

impl Dataset {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Top-level field lookup. `None` if the root is not an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// A keyed top-level collection, e.g. `"showings"`.
    pub fn collection(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn movies(&self) -> Option<&Map<String, Value>> {
        self.collection(MOVIES)
    }

    pub fn showings(&self) -> Option<&Map<String, Value>> {
        self.collection(SHOWINGS)
    }

    pub fn venues(&self) -> Option<&Map<String, Value>> {
        self.collection(VENUES)
    }

    /// Top-level keys in stored order, with the entry count of each
    /// collection (arrays and objects) or `None` for scalars.
    pub fn summary(&self) -> Vec<(&str, Option<usize>)> {
        let Some(map) = self.root.as_object() else {
            return Vec::new();
        };
        map.iter()
            .map(|(k, v)| {
                let len = match v {
                    Value::Array(items) => Some(items.len()),
                    Value::Object(entries) => Some(entries.len()),
                    _ => None,
                };
                (k.as_str(), len)
            })
            .collect()
    }

    pub fn into_inner(self) -> Value {
        self.root
    }
}

impl From<Value> for Dataset {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}
