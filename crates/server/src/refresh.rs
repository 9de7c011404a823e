//! Periodic dataset reload for the geo service.

use geostay::{IndexConfig, IndexHandle, dataset};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Load `path` and publish a new index built from it.
///
/// Parsing and building run on a blocking thread. On any failure the current
/// index keeps serving.
pub async fn reload(
    handle: Arc<IndexHandle>,
    path: PathBuf,
    config: IndexConfig,
) -> anyhow::Result<u64> {
    let generation = tokio::task::spawn_blocking(move || -> geostay::Result<u64> {
        let points = dataset::load_points(&path)?;
        handle.rebuild(points, &config)
    })
    .await??;
    Ok(generation)
}

/// Reload the dataset every `every` until the task is aborted.
pub fn spawn_refresh(
    handle: Arc<IndexHandle>,
    path: PathBuf,
    config: IndexConfig,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick fires immediately; the index was just built
        interval.tick().await;

        loop {
            interval.tick().await;
            match reload(Arc::clone(&handle), path.clone(), config).await {
                Ok(generation) => info!(
                    "Reloaded {} as index generation {}",
                    path.display(),
                    generation
                ),
                Err(e) => warn!("Reload of {} failed, keeping current index: {}", path.display(), e),
            }
        }
    })
}
