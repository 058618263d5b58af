// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Process-lifetime dataset cache.
//!
//! A [`DatasetLoader`] goes `new -> populate once -> read many`. The first
//! call to [`DatasetLoader::get_data`] resolves, reads and decodes the
//! artifact; callers arriving while that is in flight await the same
//! attempt. A success is kept for the lifetime of the loader. A failure is
//! returned to every caller of that attempt and then forgotten, so a later
//! call starts over.

use crate::artifact::{serialization, DirectorySource};
use crate::compaction;
use crate::config::ArtifactConfig;
use crate::dataset::Dataset;
use crate::traits::{ArtifactSource, DatasetError};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Instant;
use tracing::{debug, info};

type LoadFuture = Shared<BoxFuture<'static, Result<Arc<Dataset>, DatasetError>>>;

/// Single-flight, load-once cache for the decoded dataset.
pub struct DatasetLoader {
    source: Arc<dyn ArtifactSource>,
    ready: OnceLock<Arc<Dataset>>,
    in_flight: Mutex<Option<LoadFuture>>,
}

impl fmt::Debug for DatasetLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetLoader")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl DatasetLoader {
    pub fn new(source: Arc<dyn ArtifactSource>) -> Self {
        Self {
            source,
            ready: OnceLock::new(),
            in_flight: Mutex::new(None),
        }
    }

    /// Loader over the artifact directory named by `config`.
    pub fn from_config(config: &ArtifactConfig) -> Self {
        Self::new(Arc::new(DirectorySource::new(config.clone())))
    }

    pub fn is_loaded(&self) -> bool {
        self.ready.get().is_some()
    }

    /// Returns the dataset, loading it on first use.
    ///
    /// Every successful call on the same loader returns the same `Arc`.
    pub async fn get_data(&self) -> Result<Arc<Dataset>, DatasetError> {
        if let Some(dataset) = self.ready.get() {
            return Ok(Arc::clone(dataset));
        }

        let flight = {
            let mut in_flight = self.lock_in_flight();
            if let Some(dataset) = self.ready.get() {
                return Ok(Arc::clone(dataset));
            }
            match in_flight.as_ref() {
                Some(flight) => {
                    debug!("Joining in-flight dataset load");
                    flight.clone()
                }
                None => {
                    let flight = load(Arc::clone(&self.source)).boxed().shared();
                    *in_flight = Some(flight.clone());
                    flight
                }
            }
        };

        let result = flight.clone().await;

        let mut in_flight = self.lock_in_flight();
        let result = result.map(|dataset| Arc::clone(self.ready.get_or_init(|| dataset)));
        if in_flight.as_ref().is_some_and(|current| current.ptr_eq(&flight)) {
            *in_flight = None;
        }
        result
    }

    // The guarded state is replaced atomically, so a poisoned lock is still usable.
    fn lock_in_flight(&self) -> MutexGuard<'_, Option<LoadFuture>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn load(source: Arc<dyn ArtifactSource>) -> Result<Arc<Dataset>, DatasetError> {
    let started = Instant::now();
    let name = source.resolve().await?;
    let bytes = source.read(&name).await?;
    let compact = serialization::parse_artifact(&bytes)?;
    let root = compaction::decode(&compact)?;

    info!(
        artifact = %name,
        bytes = bytes.len(),
        dictionary_len = compact.dictionary.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Loaded dataset"
    );
    Ok(Arc::new(Dataset::new(root)))
}

static GLOBAL_LOADER: OnceLock<DatasetLoader> = OnceLock::new();

/// The process-wide loader, configured from the environment on first use.
///
/// Prefer passing a [`DatasetLoader`] explicitly; this exists for callers
/// that have nowhere to keep one.
pub fn global_loader() -> &'static DatasetLoader {
    GLOBAL_LOADER.get_or_init(|| DatasetLoader::from_config(&ArtifactConfig::from_env()))
}

/// Returns the dataset from the process-wide loader.
pub async fn get_data() -> Result<Arc<Dataset>, DatasetError> {
    global_loader().get_data().await
}
