//! Errors raised while injecting a context into request headers.

use std::collections::TryReserveError;

use http::header::{InvalidHeaderName, InvalidHeaderValue, MaxSizeReached};

/// Reason why a context could not be injected.
///
/// None of these errors is fatal to the request being proxied, the worst outcome is a request
/// forwarded with missing or incomplete trace headers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No memory for a pending header.
    #[error("failed to allocate header: {0}")]
    Allocation(#[from] TryReserveError),
    /// The key emitted by the tracer is not a valid header name.
    #[error("failed to allocate header key: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),
    /// The value emitted by the tracer is not a valid header value.
    #[error("failed to allocate header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
    /// The tracer reported a failure while serializing the context.
    #[error("tracer failed to serialize the context")]
    Serialization,
    /// The header map cannot hold more entries.
    #[error("failed to insert header: {0}")]
    MaxSizeReached(#[from] MaxSizeReached),
    /// The header list is full.
    #[error("failed to insert header: list is limited to {0} entries")]
    HeaderLimit(usize),
}

impl Error {
    /// Returns `true` if the error happened while collecting the headers, before any of them
    /// reached the request.
    pub fn is_carrier_error(&self) -> bool {
        matches!(
            self,
            Error::Allocation(_)
                | Error::InvalidHeaderName(_)
                | Error::InvalidHeaderValue(_)
                | Error::Serialization
        )
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderName;

    use super::*;

    #[test]
    fn carrier_errors_are_told_apart_from_merge_errors() {
        let err = Error::from(HeaderName::from_bytes(b"bad key").unwrap_err());
        assert!(err.is_carrier_error());
        assert!(Error::Serialization.is_carrier_error());
        assert!(!Error::HeaderLimit(4).is_carrier_error());
    }

    #[test]
    fn header_limit_message() {
        assert_eq!(
            Error::HeaderLimit(4).to_string(),
            "failed to insert header: list is limited to 4 entries"
        );
    }
}
