//! geostay client
//!
//! Native Rust client for the geostay geo and search services.
//!
//! # Example
//!
//! ```ignore
//! use geostay_client::SearchClient;
//!
//! let client = SearchClient::connect(addr).await?;
//! let hotels = client.search(37.7867, -122.4112, "2015-04-09", "2015-04-10").await?;
//! ```

pub mod transport;

pub use transport::rpc::{ClientError, GeoClient, Result, SearchClient};
