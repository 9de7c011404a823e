use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geostay::compute::spatial::knn_linear;
use geostay::prelude::*;

fn hotels(n: usize) -> Vec<GeoPoint> {
    (0..n)
        .map(|i| {
            let lat = 52.30 + (i % 317) as f64 * 0.0004;
            let lon = 4.80 + (i / 317) as f64 * 0.0007;
            GeoPoint::new(format!("hotel:{}", i), lat, lon)
        })
        .collect()
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [1_000, 10_000, 100_000] {
        let points = hotels(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &points, |b, points| {
            b.iter(|| {
                SpatialIndex::build(black_box(points.clone()), &IndexConfig::default()).unwrap()
            })
        });
    }

    group.finish();
}

fn benchmark_knn(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn");
    let center = GeoPoint::anonymous(52.37, 4.89);

    for size in [1_000, 10_000, 100_000] {
        let points = hotels(size);
        let index = SpatialIndex::build(points.clone(), &IndexConfig::default()).unwrap();

        group.bench_with_input(BenchmarkId::new("index", size), &index, |b, index| {
            b.iter(|| {
                index
                    .k_nearest(black_box(&center), 5, 10.0, |_| true)
                    .unwrap()
            })
        });

        group.bench_with_input(BenchmarkId::new("linear", size), &points, |b, points| {
            b.iter(|| knn_linear(black_box(&center), points, 5, 10.0))
        });
    }

    group.finish();
}

fn benchmark_nearby_service(c: &mut Criterion) {
    let handle = IndexBuilder::new().points(hotels(50_000)).build_handle().unwrap();
    let service = NearbyService::new(std::sync::Arc::new(handle), QueryConfig::default());

    c.bench_function("nearby_service", |b| {
        b.iter(|| service.nearby(black_box(52.37), black_box(4.89)).unwrap())
    });
}

criterion_group!(benches, benchmark_build, benchmark_knn, benchmark_nearby_service);
criterion_main!(benches);
