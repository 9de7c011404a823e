//! Spatial indexing, distance computations, and input validation.

pub mod spatial;
pub mod validation;
