//! Transport layer for the geostay services
//!
//! tarpc over length-delimited TCP frames with JSON payloads.

pub mod rpc;
