// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::traits::DatasetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Poster colour bucket assigned to a title.
///
/// The order of variants is the bucket order used by
/// [`crate::query::poster_color`]; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterColor {
    Red,
    Yellow,
    Blue,
}

impl PosterColor {
    pub const ALL: [PosterColor; 3] = [PosterColor::Red, PosterColor::Yellow, PosterColor::Blue];

    /// Label used by the presentation layer (CSS class suffix).
    pub fn label(&self) -> &'static str {
        match self {
            PosterColor::Red => "red",
            PosterColor::Yellow => "yellow",
            PosterColor::Blue => "blue",
        }
    }
}

impl fmt::Display for PosterColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PosterColor {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(PosterColor::Red),
            "yellow" => Ok(PosterColor::Yellow),
            "blue" => Ok(PosterColor::Blue),
            _ => Err(DatasetError::InvalidInput(format!(
                "Unknown poster color: {}",
                s
            ))),
        }
    }
}
