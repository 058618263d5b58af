// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

// Kept in its own test binary: the global loader reads the environment once.

mod common;

use common::listings;
use listings_compact::config::DATA_DIR_ENV;
use listings_compact::*;
use std::sync::Arc;

#[tokio::test]
async fn test_global_loader_uses_env_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(DATA_DIR_ENV, dir.path());

    write_artifact(
        RawValue::from(listings()),
        &ArtifactConfig::from_env(),
        &ArtifactNaming::default(),
    )
    .await
    .unwrap();

    let a = get_data().await.unwrap();
    let b = global_loader().get_data().await.unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.movies().map(|m| m.len()), Some(3));
}
