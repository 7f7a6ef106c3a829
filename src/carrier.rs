//! Implementation of the carrier collecting the headers emitted by a tracer.

use http::{HeaderName, HeaderValue};

use crate::Error;

/// Header emitted by the tracer, waiting to be merged into the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingHeader {
    /// Lower-cased header name.
    pub name: HeaderName,
    pub value: HeaderValue,
}

impl PendingHeader {
    /// Normalizes the key and copies both key and value.
    pub fn new(key: &str, value: &str) -> Result<Self, Error> {
        let name = HeaderName::from_bytes(key.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        Ok(Self { name, value })
    }
}

/// [`Injector`] collecting the headers emitted by a tracer.
///
/// The first failing [`set`] is remembered and every later call is ignored, the collected headers
/// are only handed over by [`finish`] if all of them were accepted.
///
/// [`Injector`]: opentelemetry::propagation::Injector
/// [`set`]: opentelemetry::propagation::Injector::set
/// [`finish`]: HeaderCarrier::finish
#[derive(Debug)]
pub struct HeaderCarrier {
    pending: Vec<PendingHeader>,
    outcome: Result<(), Error>,
}

impl Default for HeaderCarrier {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderCarrier {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            outcome: Ok(()),
        }
    }

    /// Returns `true` if no header has been rejected so far.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Headers collected so far, in the order they were emitted.
    pub fn pending(&self) -> &[PendingHeader] {
        &self.pending
    }

    /// Consumes the carrier, returning the collected headers or the first error.
    pub fn finish(self) -> Result<Vec<PendingHeader>, Error> {
        self.outcome.map(|()| self.pending)
    }

    fn try_push(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.pending.try_reserve(1)?;
        self.pending.push(PendingHeader::new(key, value)?);
        Ok(())
    }
}

impl opentelemetry::propagation::Injector for HeaderCarrier {
    fn set(&mut self, key: &str, value: String) {
        if self.outcome.is_err() {
            return;
        }
        if let Err(err) = self.try_push(key, &value) {
            tracing::error!(key, error = %err, "failed to collect tracing header");
            self.outcome = Err(err);
        }
    }
}
