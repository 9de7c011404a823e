//! Shared, swappable reference to the current spatial index.
//!
//! Readers take a snapshot (an `Arc` clone) and query it without holding any
//! lock. A rebuild constructs the new index off to the side and then swaps
//! the pointer, so in-flight queries keep answering from the snapshot they
//! started with and never observe a half-built index.

use crate::compute::spatial::SpatialIndex;
use crate::config::IndexConfig;
use crate::error::Result;
use geostay_types::geo::GeoPoint;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Current index plus a generation counter bumped on every publish.
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<SpatialIndex>>,
    generation: AtomicU64,
}

impl IndexHandle {
    pub fn new(index: SpatialIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
            generation: AtomicU64::new(0),
        }
    }

    /// The index as of now. Later publishes do not affect the returned value.
    pub fn snapshot(&self) -> Arc<SpatialIndex> {
        Arc::clone(&self.current.read())
    }

    /// Replace the current index. Returns the new generation.
    pub fn publish(&self, index: SpatialIndex) -> u64 {
        let index = Arc::new(index);
        let points = index.len();

        // Lock held only for the pointer swap; the old index is dropped after
        // the last snapshot holding it goes away.
        let previous = std::mem::replace(&mut *self.current.write(), index);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        log::info!(
            "Published index generation {} ({} points, previously {})",
            generation,
            points,
            previous.len()
        );
        generation
    }

    /// Build a new index from `points` with `config` and publish it.
    ///
    /// On error the current index stays in place.
    pub fn rebuild<I>(&self, points: I, config: &IndexConfig) -> Result<u64>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let index = SpatialIndex::build(points, config)?;
        Ok(self.publish(index))
    }

    /// Number of publishes since creation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl Default for IndexHandle {
    fn default() -> Self {
        Self::new(SpatialIndex::default())
    }
}
