// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

#![allow(dead_code)]

use serde_json::{json, Value};

/// A small listings dataset with the repetition the codec is built for.
pub fn listings() -> Value {
    json!({
        "movies": {
            "m1": {"title": "The Matrix", "year": 1999, "certificate": "15", "genres": ["sci-fi", "action"]},
            "m2": {"title": "Amélie", "year": 2001, "certificate": "15", "genres": ["comedy"]},
            "m3": {"title": "Paris, Texas", "year": 1984, "certificate": "15", "genres": ["drama"]}
        },
        "showings": {
            "s1": {"movie": "m1", "venue": "rio", "time": "2026-10-16T19:30", "includedMovies": []},
            "s2": {"movie": "m2", "venue": "rio", "time": "2026-10-16T21:00", "includedMovies": ["m2", "m3"]},
            "s3": {"movie": "m3", "venue": "curzon", "time": "2026-10-17T18:00", "includedMovies": ["m3"]}
        },
        "venues": {
            "rio": {"name": "Rio Cinema", "geo": {"lat": 51.5492, "lon": -0.0753}, "tags": []},
            "curzon": {"name": "Curzon Soho", "geo": {"lat": 51.5131, "lon": -0.1318}, "tags": []}
        },
        "generatedAt": "2026-10-16T06:00:00Z"
    })
}

/// Serializes with key order intact, for order-sensitive comparisons.
pub fn ordered(value: &Value) -> String {
    serde_json::to_string(value).unwrap()
}
