//! Configuration for the spatial index, nearby queries, and upstream calls.
//!
//! Every field has a default, so an empty JSON object `{}` is a valid
//! configuration. Unknown fields are rejected.
use serde::de::Error;
use std::time::Duration;

/// Service configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Defaults applied to nearby queries
    #[serde(default)]
    pub query: QueryConfig,

    /// Partitioning parameters for index builds
    #[serde(default)]
    pub index: IndexConfig,

    /// Timeouts for calls to the geo and rate services
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Default result count and search radius for nearby queries.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    #[serde(default = "QueryConfig::default_k")]
    pub k: usize,

    #[serde(default = "QueryConfig::default_max_distance_km")]
    pub max_distance_km: f64,
}

impl QueryConfig {
    const fn default_k() -> usize {
        5
    }

    const fn default_max_distance_km() -> f64 {
        10.0
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = km;
        self
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            k: Self::default_k(),
            max_distance_km: Self::default_max_distance_km(),
        }
    }
}

/// Geohash partitioning parameters.
///
/// Points are bucketed by a `base_precision` geohash prefix. Buckets holding
/// more than `leaf_capacity` points are split one geohash character at a time,
/// never beyond `max_precision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    #[serde(default = "IndexConfig::default_base_precision")]
    pub base_precision: usize,

    #[serde(default = "IndexConfig::default_max_precision")]
    pub max_precision: usize,

    #[serde(default = "IndexConfig::default_leaf_capacity")]
    pub leaf_capacity: usize,
}

impl IndexConfig {
    const fn default_base_precision() -> usize {
        4
    }

    const fn default_max_precision() -> usize {
        9
    }

    const fn default_leaf_capacity() -> usize {
        64
    }

    pub fn with_base_precision(mut self, precision: usize) -> Self {
        self.base_precision = precision;
        self
    }

    pub fn with_max_precision(mut self, precision: usize) -> Self {
        self.max_precision = precision;
        self
    }

    pub fn with_leaf_capacity(mut self, capacity: usize) -> Self {
        self.leaf_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=12).contains(&self.base_precision) {
            return Err(format!(
                "Base precision must be between 1 and 12, got: {}",
                self.base_precision
            ));
        }

        if self.max_precision < self.base_precision || self.max_precision > 12 {
            return Err(format!(
                "Max precision must be between {} and 12, got: {}",
                self.base_precision, self.max_precision
            ));
        }

        if self.leaf_capacity == 0 {
            return Err("Leaf capacity must be greater than zero".to_string());
        }

        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_precision: Self::default_base_precision(),
            max_precision: Self::default_max_precision(),
            leaf_capacity: Self::default_leaf_capacity(),
        }
    }
}

/// Per-call timeouts for the two dependencies of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    #[serde(default = "UpstreamConfig::default_timeout_ms")]
    pub geo_timeout_ms: u64,

    #[serde(default = "UpstreamConfig::default_timeout_ms")]
    pub rate_timeout_ms: u64,
}

impl UpstreamConfig {
    const fn default_timeout_ms() -> u64 {
        1000
    }

    pub fn geo_timeout(&self) -> Duration {
        Duration::from_millis(self.geo_timeout_ms)
    }

    pub fn rate_timeout(&self) -> Duration {
        Duration::from_millis(self.rate_timeout_ms)
    }

    pub fn with_timeouts(mut self, geo: Duration, rate: Duration) -> Self {
        self.geo_timeout_ms = geo.as_millis() as u64;
        self.rate_timeout_ms = rate.as_millis() as u64;
        self
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geo_timeout_ms: Self::default_timeout_ms(),
            rate_timeout_ms: Self::default_timeout_ms(),
        }
    }
}

impl Config {
    pub fn with_query(mut self, query: QueryConfig) -> Self {
        self.query = query;
        self
    }

    pub fn with_index(mut self, index: IndexConfig) -> Self {
        self.index = index;
        self
    }

    pub fn with_upstream(mut self, upstream: UpstreamConfig) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.query.k == 0 {
            return Err("Default k must be greater than zero".to_string());
        }

        if !self.query.max_distance_km.is_finite() || self.query.max_distance_km <= 0.0 {
            return Err(format!(
                "Default max distance must be positive and finite, got: {}",
                self.query.max_distance_km
            ));
        }

        self.index.validate()?;

        if self.upstream.geo_timeout_ms == 0 || self.upstream.rate_timeout_ms == 0 {
            return Err("Upstream timeouts must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query: QueryConfig::default(),
            index: IndexConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}
