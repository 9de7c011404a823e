use geostay::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn grid(prefix: &str, n: usize) -> Vec<GeoPoint> {
    (0..n)
        .map(|i| {
            GeoPoint::new(
                format!("{prefix}{i:03}"),
                48.85 + (i / 10) as f64 * 0.001,
                2.35 + (i % 10) as f64 * 0.001,
            )
        })
        .collect()
}

#[test]
fn test_snapshot_taken_before_rebuild_keeps_old_data() {
    let config = IndexConfig::default();
    let handle = IndexHandle::new(SpatialIndex::build(grid("old", 50), &config).unwrap());
    let center = GeoPoint::anonymous(48.85, 2.35);

    let snapshot = handle.snapshot();
    handle.rebuild(grid("new", 80), &config).unwrap();

    let old = snapshot.k_nearest(&center, 100, 5.0, |_| true).unwrap();
    assert_eq!(old.len(), 50);
    assert!(old.iter().all(|p| p.id().starts_with("old")));

    let new = handle.snapshot().k_nearest(&center, 100, 5.0, |_| true).unwrap();
    assert_eq!(new.len(), 80);
    assert!(new.iter().all(|p| p.id().starts_with("new")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_queries_never_see_partial_index() {
    let config = IndexConfig::default().with_leaf_capacity(4);
    let handle = Arc::new(IndexHandle::new(
        SpatialIndex::build(grid("a", 100), &config).unwrap(),
    ));
    let nearby = NearbyService::new(Arc::clone(&handle), QueryConfig::default().with_k(200));

    let mut readers = Vec::new();
    for _ in 0..8 {
        let nearby = nearby.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                let ids = nearby.nearby(48.85, 2.35).unwrap();
                // Each rebuild swaps between two complete point sets
                let prefix = &ids[0][..1];
                assert!(ids.len() == 100 || ids.len() == 60, "got {}", ids.len());
                assert!(ids.iter().all(|id| id.starts_with(prefix)));
                tokio::task::yield_now().await;
            }
        }));
    }

    let writer = {
        let handle = Arc::clone(&handle);
        tokio::task::spawn_blocking(move || {
            for i in 0..40 {
                let points = if i % 2 == 0 { grid("b", 60) } else { grid("a", 100) };
                handle.rebuild(points, &config).unwrap();
                std::thread::sleep(Duration::from_millis(1));
            }
        })
    };

    for reader in readers {
        reader.await.unwrap();
    }
    writer.await.unwrap();
    assert_eq!(handle.generation(), 40);
}
