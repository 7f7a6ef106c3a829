//! OpenTelemetry context propagation for HTTP proxies.
//!
//! This crate injects a tracing context into the headers of a request before it is forwarded
//! upstream. The context is serialized by a [`Tracer`] into a [`HeaderCarrier`], then the
//! collected headers are merged into the request: a header already present with the same name,
//! regardless of its case, gets its value replaced in place, the other ones are appended.
//!
//! Injection is best effort: [`inject_context`] never fails, errors are reported through
//! [`tracing`] events. Use [`try_inject_context`] to handle them.
//!
//! ```
//! use http::Request;
//! use opentelemetry::Context;
//! use tower_otel_propagate::{inject_context, GlobalPropagator};
//!
//! let mut request = Request::builder()
//!     .uri("http://upstream/")
//!     .body(())
//!     .unwrap();
//! inject_context(&GlobalPropagator, &mut request, &Context::current());
//! ```
//!
//! With the `layer` feature (enabled by default) the same injection is available as a
//! [`Layer`] for the [`Service`] sending the requests upstream, see [`InjectLayer`].
//!
//! [`Layer`]: tower_layer::Layer
//! [`Service`]: tower_service::Service

pub use self::{
    carrier::{HeaderCarrier, PendingHeader},
    error::Error,
    headers::{HeaderEntry, HeaderList, HeaderTable},
    inject::{inject_context, try_inject_context},
    merge::merge_headers,
    tracer::{CarrierFormat, GlobalPropagator, Propagator, Tracer},
};

#[cfg(feature = "layer")]
#[doc(inline)]
pub use self::layer::{Inject, InjectLayer};

mod carrier;
mod error;
mod headers;
mod inject;
#[cfg(feature = "layer")]
mod layer;
mod merge;
mod tracer;
