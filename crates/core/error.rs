//! Error types for geostay.

use geostay_types::{Fault, FaultKind};
use thiserror::Error;

/// Remote dependency a search depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    Geo,
    Rate,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geo => f.write_str("geo"),
            Self::Rate => f.write_str("rate"),
        }
    }
}

#[derive(Error, Debug)]
pub enum GeoStayError {
    /// Rejected dataset or index configuration at build time.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Rejected query argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{service} service unavailable: {message}")]
    UpstreamUnavailable { service: Upstream, message: String },
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeoStayError>;

impl GeoStayError {
    pub fn upstream(service: Upstream, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            service,
            message: message.into(),
        }
    }

    /// The fault category reported to callers.
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::InvalidArgument(_) => FaultKind::InvalidArgument,
            Self::UpstreamUnavailable { .. } => FaultKind::UpstreamUnavailable,
            Self::InvalidInput(_) | Self::Internal(_) | Self::Io(_) | Self::Json(_) => {
                FaultKind::Internal
            }
        }
    }

    /// Rebuild an error from a fault returned by `service`, keeping its kind.
    pub fn from_fault(service: Upstream, fault: Fault) -> Self {
        match fault.kind {
            FaultKind::InvalidArgument => Self::InvalidArgument(fault.message),
            FaultKind::UpstreamUnavailable => Self::upstream(service, fault.message),
            FaultKind::Internal => Self::Internal(format!("{service} service: {}", fault.message)),
        }
    }
}

impl From<GeoStayError> for Fault {
    fn from(err: GeoStayError) -> Self {
        Fault::new(err.kind(), err.to_string())
    }
}

impl From<&GeoStayError> for Fault {
    fn from(err: &GeoStayError) -> Self {
        Fault::new(err.kind(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            GeoStayError::InvalidArgument("k".into()).kind(),
            FaultKind::InvalidArgument
        );
        assert_eq!(
            GeoStayError::upstream(Upstream::Rate, "timeout").kind(),
            FaultKind::UpstreamUnavailable
        );
        assert_eq!(
            GeoStayError::InvalidInput("dup".into()).kind(),
            FaultKind::Internal
        );
    }

    #[test]
    fn test_fault_round_trip_keeps_kind() {
        let fault: Fault = GeoStayError::InvalidArgument("latitude".into()).into();
        let err = GeoStayError::from_fault(Upstream::Geo, fault);
        assert!(matches!(err, GeoStayError::InvalidArgument(_)));

        let fault = Fault::upstream_unavailable("db down");
        let err = GeoStayError::from_fault(Upstream::Rate, fault);
        assert!(matches!(
            err,
            GeoStayError::UpstreamUnavailable {
                service: Upstream::Rate,
                ..
            }
        ));
    }

    #[test]
    fn test_upstream_message_names_service() {
        let err = GeoStayError::upstream(Upstream::Geo, "connection refused");
        assert_eq!(
            err.to_string(),
            "geo service unavailable: connection refused"
        );
    }
}
