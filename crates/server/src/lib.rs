//! geostay server
//!
//! RPC front ends for the geostay core.
//!
//! # Services
//!
//! - **Geo**: nearest hotel ids for a coordinate, from an in-memory index
//!   that can be reloaded from its dataset on an interval
//! - **Search**: nearest hotels with rates for a stay, composed from a geo
//!   service and a rate service reached over RPC
//!
//! # Example
//!
//! ```ignore
//! use geostay_server::run_geo_server;
//!
//! run_geo_server(listener, nearby, shutdown).await?;
//! ```

pub mod handler;
pub mod protocol;
pub mod refresh;
pub mod transport;
pub mod upstream;

// Re-export protocol types for client usage
pub use protocol::{
    GeoRpc, GeoRpcClient, RateRpc, RateRpcClient, SearchRpc, SearchRpcClient,
};

pub use handler::RemoteSearch;
pub use transport::rpc::{run_geo_server, run_search_server};
pub use upstream::{RemoteGeo, RemoteRate};
