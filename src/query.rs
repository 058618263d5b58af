// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Read-only helpers over decoded dataset entities.

use crate::enums::PosterColor;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::num::NonZeroUsize;
use unicode_normalization::UnicodeNormalization;

/// Field of a showing that lists the movies shown together (double bills etc.).
pub const INCLUDED_MOVIES: &str = "includedMovies";

/// Returns the first non-empty `includedMovies` list among `showings`,
/// in iteration order. `None` if no showing has one.
pub fn first_included_movies(showings: &Map<String, Value>) -> Option<&Vec<Value>> {
    showings.values().find_map(|showing| {
        showing
            .get(INCLUDED_MOVIES)
            .and_then(Value::as_array)
            .filter(|movies| !movies.is_empty())
    })
}

/// One bucket per poster colour.
const COLOR_BUCKETS: NonZeroUsize = match NonZeroUsize::new(PosterColor::ALL.len()) {
    Some(n) => n,
    None => panic!("PosterColor::ALL is empty"),
};

/// Maps `s` to one of `buckets` buckets.
///
/// Rolling 32-bit hash (`h = h * 31 + unit`, wrapping) over the UTF-16 code
/// units of `s`. Depends on nothing but the string content.
pub fn bucket_index(s: &str, buckets: NonZeroUsize) -> usize {
    let hash = s
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    (hash.unsigned_abs() as usize) % buckets.get()
}

/// Poster colour bucket for a title.
pub fn poster_color(title: &str) -> PosterColor {
    PosterColor::ALL[bucket_index(title, COLOR_BUCKETS)]
}

/// Comparison key for ordering titles.
///
/// Lower-cases and trims, drops one leading `"the "`, decomposes accents
/// (NFD), then keeps only ASCII letters and digits. `"The Matrix"` and
/// `"matrix"` share a key, as do `"Amélie"` and `"amelie"`.
pub fn sort_key(title: &str) -> String {
    let folded = title.to_lowercase();
    let trimmed = folded.trim();
    let without_article = trimmed.strip_prefix("the ").unwrap_or(trimmed);
    without_article
        .nfd()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Orders titles by [`sort_key`], falling back to the titles themselves so
/// the order is total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn showings(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_first_included_movies() {
        let map = showings(json!({
            "a": {"includedMovies": []},
            "b": {"includedMovies": ["X", "Y"]},
            "c": {"includedMovies": ["Z"]}
        }));
        assert_eq!(
            first_included_movies(&map),
            Some(&vec![json!("X"), json!("Y")])
        );
    }

    #[test]
    fn test_first_included_movies_none() {
        let map = showings(json!({
            "a": {"includedMovies": []},
            "b": {"movie": "m1"},
            "c": {"includedMovies": "not-a-list"}
        }));
        assert_eq!(first_included_movies(&map), None);
        assert_eq!(first_included_movies(&Map::new()), None);
    }

    #[test]
    fn test_bucket_known_values() {
        // "a" = 97, 97 % 3 = 1
        assert_eq!(bucket_index("a", COLOR_BUCKETS), 1);
        // "ab" = 97 * 31 + 98 = 3105, 3105 % 3 = 0
        assert_eq!(bucket_index("ab", COLOR_BUCKETS), 0);
        assert_eq!(bucket_index("", COLOR_BUCKETS), 0);
        assert_eq!(poster_color("a"), PosterColor::Yellow);
    }

    #[test]
    fn test_bucket_is_stable() {
        let first = poster_color("Inception");
        for _ in 0..10 {
            assert_eq!(poster_color("Inception"), first);
        }
    }

    #[test]
    fn test_bucket_handles_overflow() {
        let long = "Dr. Strangelove or: How I Learned to Stop Worrying and Love the Bomb";
        assert!(bucket_index(long, COLOR_BUCKETS) < 3);
        assert!(bucket_index("🎬 Cinéma", COLOR_BUCKETS) < 3);
    }

    #[test]
    fn test_single_bucket() {
        assert_eq!(bucket_index("Inception", NonZeroUsize::MIN), 0);
        assert_eq!(bucket_index("", NonZeroUsize::MIN), 0);
        assert_eq!(COLOR_BUCKETS.get(), PosterColor::ALL.len());
    }

    #[test]
    fn test_sort_key() {
        assert_eq!(sort_key("The Matrix"), sort_key("matrix"));
        assert_eq!(sort_key("Amélie"), sort_key("amelie"));
        assert_eq!(sort_key("  THE Thing! "), "thing");
        assert_eq!(sort_key("Theeb"), "theeb");
        assert_eq!(sort_key("2001: A Space Odyssey"), "2001aspaceodyssey");
    }

    #[test]
    fn test_sort_key_removes_only_one_article() {
        assert_eq!(sort_key("The The Movie"), "themovie");
    }

    #[test]
    fn test_compare_titles() {
        let mut titles = vec!["Zodiac", "The Apartment", "amélie", "Amelie"];
        titles.sort_by(|a, b| compare_titles(a, b));
        assert_eq!(titles, ["Amelie", "amélie", "The Apartment", "Zodiac"]);
    }
}
