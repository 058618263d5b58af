//! # listings-compact
//!
//! Build-time compaction and run-time loading of the cinema listings dataset.
//!
//! At build time a raw tree is trimmed of absent fields ([`trim`]), encoded
//! into a dictionary plus an index-referencing shape ([`compaction`]), and
//! written as a single artifact file ([`write_artifact`]). At run time a
//! [`DatasetLoader`] locates that file without knowing its name, decodes it
//! exactly once per loader, and shares the result with every caller.

pub mod artifact;
pub mod compaction;
pub mod config;
pub mod dataset;
pub mod enums;
pub mod loader;
pub mod query;
pub mod raw_value;
pub mod traits;
pub mod trim;

// Re-export core traits
pub use traits::{ArtifactSource, DatasetError};

pub use artifact::{
    inspect_artifact, write_artifact, ArtifactCodec, ArtifactReport, DirectorySource,
};
pub use compaction::{decode, encode, Compact, CompactStats, FORMAT_VERSION};
pub use config::{ArtifactConfig, ArtifactNaming};
pub use dataset::Dataset;
pub use enums::PosterColor;
pub use loader::{get_data, global_loader, DatasetLoader};
pub use query::{bucket_index, compare_titles, first_included_movies, poster_color, sort_key};
pub use raw_value::RawValue;
pub use trim::{trim, trim_in_place};
