//! Transport layer for the geostay client
//!
//! tarpc over TCP with JSON payloads, matching the server.

pub mod rpc;
