// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::traits::DatasetError;
use serde::Serialize;
use serde_json::{Number, Value};

/// An untrimmed dataset tree.
///
/// Unlike [`serde_json::Value`], every position carries one of three states:
/// a value, an explicit `Null`, or `Absent`. Absent object entries are
/// removed by [`crate::trim`]; explicit nulls are kept.
///
/// Object entries keep insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Absent,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<RawValue>),
    Object(Vec<(String, RawValue)>),
}

impl RawValue {
    /// Builds a raw tree from any serializable value.
    ///
    /// Fields skipped with `#[serde(skip_serializing_if = ...)]` never reach
    /// the tree. Everything else, including `None`, is present.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, DatasetError> {
        serde_json::to_value(value)
            .map(RawValue::from)
            .map_err(|e| DatasetError::EncodeFailure(e.to_string()))
    }

    /// Starts an empty object.
    pub fn object() -> Self {
        RawValue::Object(Vec::new())
    }

    /// Appends an entry to an object, returning the object for chaining.
    ///
    /// Has no effect on non-object values.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        if let RawValue::Object(entries) = &mut self {
            entries.push((key.into(), value.into()));
        }
        self
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RawValue::Absent)
    }

    /// Returns true if no absent value exists anywhere below (or at) this node.
    pub fn is_trimmed(&self) -> bool {
        match self {
            RawValue::Absent => false,
            RawValue::Array(items) => items.iter().all(RawValue::is_trimmed),
            RawValue::Object(entries) => entries.iter().all(|(_, v)| v.is_trimmed()),
            _ => true,
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => RawValue::Number(n),
            Value::String(s) => RawValue::String(s),
            Value::Array(items) => RawValue::Array(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => {
                RawValue::Object(map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect())
            }
        }
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    /// `None` maps to `Absent`, not `Null`.
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Absent, Into::into)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::String(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value.into())
    }
}

impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        RawValue::Number(value.into())
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(value: Vec<RawValue>) -> Self {
        RawValue::Array(value)
    }
}
