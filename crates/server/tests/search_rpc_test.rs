use futures::prelude::*;
use geostay::{IndexBuilder, NearbyService, QueryConfig, SearchService, UpstreamConfig};
use geostay_client::SearchClient;
use geostay_server::{RateRpc, RemoteGeo, RemoteRate, run_geo_server, run_search_server};
use geostay_types::{Fault, FaultKind, GeoPoint, RatePlan};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tarpc::context;
use tarpc::server::{self, Channel};
use tarpc::tokio_serde::formats::Json;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

/// Pricing service stand-in.
#[derive(Clone)]
struct StubRate {
    priced: Arc<Vec<&'static str>>,
    fault: Option<Fault>,
    delay: Option<Duration>,
}

impl StubRate {
    fn pricing(priced: Vec<&'static str>) -> Self {
        Self {
            priced: Arc::new(priced),
            fault: None,
            delay: None,
        }
    }
}

impl RateRpc for StubRate {
    async fn get_rates(
        self,
        _: context::Context,
        hotel_ids: Vec<String>,
        in_date: String,
        out_date: String,
    ) -> Result<Vec<RatePlan>, Fault> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        Ok(hotel_ids
            .into_iter()
            .filter(|id| self.priced.contains(&id.as_str()))
            .map(|id| RatePlan::new(id, in_date.clone(), out_date.clone()))
            .collect())
    }
}

async fn start_rate_server(rate: StubRate) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let bound_addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let server = rate.clone();
            tokio::spawn(async move {
                let framed = Framed::new(socket, LengthDelimitedCodec::new());
                let transport = tarpc::serde_transport::new(framed, Json::default());

                server::BaseChannel::with_defaults(transport)
                    .execute(server.serve())
                    .for_each(|response| async move {
                        tokio::spawn(response);
                    })
                    .await;
            });
        }
    });

    Ok(bound_addr)
}

async fn start_geo_server() -> anyhow::Result<SocketAddr> {
    let handle = IndexBuilder::new()
        .points(vec![
            GeoPoint::new("H1", 52.0, 4.9),
            GeoPoint::new("H2", 52.1, 4.8),
            GeoPoint::new("H3", 40.0, -73.0),
            GeoPoint::new("H4", 52.06, 4.86),
        ])
        .build_handle()?;
    let nearby = NearbyService::new(Arc::new(handle), QueryConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let bound_addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = run_geo_server(listener, nearby, futures::future::pending()).await;
    });
    Ok(bound_addr)
}

async fn start_search_server(
    geo_addr: SocketAddr,
    rate_addr: SocketAddr,
    upstream: UpstreamConfig,
) -> anyhow::Result<SocketAddr> {
    tokio::time::sleep(Duration::from_millis(100)).await;
    let geo = RemoteGeo::connect(geo_addr, upstream.geo_timeout()).await?;
    let rate = RemoteRate::connect(rate_addr, upstream.rate_timeout()).await?;
    let search = Arc::new(SearchService::new(geo, rate, upstream));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let bound_addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = run_search_server(listener, search, futures::future::pending()).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    Ok(bound_addr)
}

#[tokio::test]
async fn test_search_end_to_end() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let geo_addr = start_geo_server().await?;
    let rate_addr = start_rate_server(StubRate::pricing(vec!["H2", "H1", "H3"])).await?;
    let addr = start_search_server(geo_addr, rate_addr, UpstreamConfig::default()).await?;

    let client = SearchClient::connect(addr).await?;
    let ids = client.search(52.06, 4.86, "2015-04-09", "2015-04-10").await?;

    // H4 is nearest but has no rates; H3 is priced but too far away.
    // H2 (~5.9 km) comes before H1 (~7.2 km) whatever order pricing uses.
    assert_eq!(ids, vec!["H2", "H1"]);

    Ok(())
}

#[tokio::test]
async fn test_search_rejects_bad_dates() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let geo_addr = start_geo_server().await?;
    let rate_addr = start_rate_server(StubRate::pricing(vec!["H1"])).await?;
    let addr = start_search_server(geo_addr, rate_addr, UpstreamConfig::default()).await?;

    let client = SearchClient::connect(addr).await?;
    for (in_date, out_date) in [("2015-04-10", "2015-04-09"), ("09/04/2015", "2015-04-10")] {
        let err = client.search(52.0, 4.9, in_date, out_date).await.unwrap_err();
        assert_eq!(err.fault_kind(), Some(FaultKind::InvalidArgument));
    }

    Ok(())
}

#[tokio::test]
async fn test_search_rejects_bad_coordinates() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let geo_addr = start_geo_server().await?;
    let rate_addr = start_rate_server(StubRate::pricing(vec!["H1"])).await?;
    let addr = start_search_server(geo_addr, rate_addr, UpstreamConfig::default()).await?;

    let client = SearchClient::connect(addr).await?;
    let err = client
        .search(95.0, 4.9, "2015-04-09", "2015-04-10")
        .await
        .unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::InvalidArgument));

    Ok(())
}

#[tokio::test]
async fn test_pricing_fault_is_upstream_unavailable() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let geo_addr = start_geo_server().await?;
    let rate = StubRate {
        fault: Some(Fault::internal("rate database unreachable")),
        ..StubRate::pricing(vec!["H1"])
    };
    let rate_addr = start_rate_server(rate).await?;
    let addr = start_search_server(geo_addr, rate_addr, UpstreamConfig::default()).await?;

    let client = SearchClient::connect(addr).await?;
    let err = client
        .search(52.0, 4.9, "2015-04-09", "2015-04-10")
        .await
        .unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::UpstreamUnavailable));

    Ok(())
}

#[tokio::test]
async fn test_slow_pricing_times_out() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let geo_addr = start_geo_server().await?;
    let rate = StubRate {
        delay: Some(Duration::from_secs(5)),
        ..StubRate::pricing(vec!["H1"])
    };
    let rate_addr = start_rate_server(rate).await?;
    let upstream = UpstreamConfig::default()
        .with_timeouts(Duration::from_secs(1), Duration::from_millis(200));
    let addr = start_search_server(geo_addr, rate_addr, upstream).await?;

    let client = SearchClient::connect(addr).await?;
    let started = std::time::Instant::now();
    let err = client
        .search(52.0, 4.9, "2015-04-09", "2015-04-10")
        .await
        .unwrap_err();

    assert_eq!(err.fault_kind(), Some(FaultKind::UpstreamUnavailable));
    assert!(started.elapsed() < Duration::from_secs(3));

    Ok(())
}

#[tokio::test]
async fn test_pricing_down_is_upstream_unavailable() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let geo_addr = start_geo_server().await?;

    // Rate server accepts the connection, then goes away
    let rate_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let rate_addr = rate_listener.local_addr()?;
    tokio::spawn(async move {
        if let Ok((socket, _)) = rate_listener.accept().await {
            drop(socket);
        }
    });

    let addr = start_search_server(geo_addr, rate_addr, UpstreamConfig::default()).await?;
    let client = SearchClient::connect(addr).await?;
    let err = client
        .search(52.0, 4.9, "2015-04-09", "2015-04-10")
        .await
        .unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::UpstreamUnavailable));

    Ok(())
}
