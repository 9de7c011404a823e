use geostay::prelude::*;
use geostay::{FaultKind, Upstream, dataset};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Pricing stub that has rates for a fixed set of hotels.
struct FixedRates(Vec<&'static str>);

impl RateLookup for FixedRates {
    async fn rates(
        &self,
        hotel_ids: Vec<String>,
        in_date: &str,
        out_date: &str,
    ) -> Result<Vec<RatePlan>> {
        Ok(hotel_ids
            .iter()
            .filter(|id| self.0.contains(&id.as_str()))
            .map(|id| RatePlan::new(id.as_str(), in_date, out_date))
            .collect())
    }
}

struct DownRates;

impl RateLookup for DownRates {
    async fn rates(&self, _hotel_ids: Vec<String>, _in: &str, _out: &str) -> Result<Vec<RatePlan>> {
        Err(GeoStayError::upstream(Upstream::Rate, "connection refused"))
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dataset_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"hotelId": "H1", "lat": 52.0, "lon": 4.9}},
            {{"hotelId": "H2", "lat": 52.1, "lon": 4.8}},
            {{"hotelId": "H3", "lat": 40.0, "lon": -73.0}}
        ]"#
    )
    .unwrap();
    file
}

fn nearby_from_file(file: &NamedTempFile, query: QueryConfig) -> NearbyService {
    let handle = IndexBuilder::new().load_file(file.path()).unwrap().build_handle().unwrap();
    NearbyService::new(Arc::new(handle), query)
}

#[test]
fn test_nearby_hotels_from_dataset() {
    init_logging();
    let file = dataset_file();
    assert_eq!(dataset::load_points(file.path()).unwrap().len(), 3);

    let nearby = nearby_from_file(&file, QueryConfig::default().with_k(2));
    let ids = nearby.nearby(52.05, 4.85).unwrap();
    assert_eq!(ids.len(), 2);
    assert!(!ids.contains(&"H3".to_string()));

    let center = GeoPoint::anonymous(52.05, 4.85);
    let d1 = center.haversine_distance_km(&GeoPoint::new("H1", 52.0, 4.9));
    let d2 = center.haversine_distance_km(&GeoPoint::new("H2", 52.1, 4.8));
    // Equal distances would resolve by id, so H1 wins a tie
    let expected = if d2 < d1 { vec!["H2", "H1"] } else { vec!["H1", "H2"] };
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_search_end_to_end_in_process() {
    init_logging();
    let file = dataset_file();
    let nearby = nearby_from_file(&file, QueryConfig::default());
    let rates = FixedRates(vec!["H1", "H3"]);
    let search = SearchService::new(nearby, rates, UpstreamConfig::default());

    let ids = search.search(52.05, 4.85, "2015-04-09", "2015-04-10").await.unwrap();
    assert_eq!(ids, vec!["H1"]);
}

#[tokio::test]
async fn test_search_out_of_range_fails_before_lookups() {
    init_logging();
    let file = dataset_file();
    let nearby = nearby_from_file(&file, QueryConfig::default());
    let search = SearchService::new(nearby, DownRates, UpstreamConfig::default());

    let err = search.search(100.0, 4.85, "2015-04-09", "2015-04-10").await.unwrap_err();
    assert_eq!(err.kind(), FaultKind::InvalidArgument);
}

#[tokio::test]
async fn test_pricing_outage_returns_no_ids() {
    init_logging();
    let file = dataset_file();
    let nearby = nearby_from_file(&file, QueryConfig::default());
    let search = SearchService::new(nearby, DownRates, UpstreamConfig::default());

    let result = search.search(52.05, 4.85, "2015-04-09", "2015-04-10").await;
    let err = result.unwrap_err();
    assert_eq!(err.kind(), FaultKind::UpstreamUnavailable);
    assert!(err.to_string().contains("rate"));
}
