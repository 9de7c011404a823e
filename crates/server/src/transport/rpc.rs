//! tarpc transport for the geo and search services

use futures::prelude::*;
use geostay::NearbyService;
use std::sync::Arc;
use tarpc::server::{self, Channel};
use tarpc::tokio_serde::formats::Json;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use crate::handler::{GeoHandler, RemoteSearch, SearchHandler};
use crate::protocol::{GeoRpc, SearchRpc};

use tokio_util::codec::{Framed, LengthDelimitedCodec};

/// Spawn a task serving one connection with a framed JSON transport.
/// Expanded per handler type so each response future is `Send`.
macro_rules! serve_connection {
    ($handler:expr, $socket:expr) => {{
        let server = $handler;
        let socket = $socket;
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
    }};
}

/// Accept connections until `shutdown` resolves, handing each to `serve`.
async fn accept_loop<F>(
    name: &str,
    listener: TcpListener,
    mut shutdown: impl Future<Output = ()> + Unpin + Send + 'static,
    mut serve: F,
) -> anyhow::Result<()>
where
    F: FnMut(TcpStream),
{
    info!("{} RPC server listening on {}", name, listener.local_addr()?);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((socket, peer)) => {
                        debug!("{} connection from {}", name, peer);
                        serve(socket);
                    }
                    Err(e) => {
                        error!("Accept error: {}", e);
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received, stopping {} server...", name);
                break;
            }
        }
    }

    Ok(())
}

/// Run the geo RPC server
pub async fn run_geo_server(
    listener: TcpListener,
    nearby: NearbyService,
    shutdown: impl Future<Output = ()> + Unpin + Send + 'static,
) -> anyhow::Result<()> {
    let handler = GeoHandler::new(nearby);

    accept_loop("Geo", listener, shutdown, move |socket| {
        serve_connection!(handler.clone(), socket);
    })
    .await
}

/// Run the search RPC server
pub async fn run_search_server(
    listener: TcpListener,
    search: Arc<RemoteSearch>,
    shutdown: impl Future<Output = ()> + Unpin + Send + 'static,
) -> anyhow::Result<()> {
    let handler = SearchHandler::new(search);

    accept_loop("Search", listener, shutdown, move |socket| {
        serve_connection!(handler.clone(), socket);
    })
    .await
}
