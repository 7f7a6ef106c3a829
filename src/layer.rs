//! Middleware that injects the current context into outgoing HTTP requests.

use std::task::{Context, Poll};

use http::Request;
use tower_layer::Layer;
use tower_service::Service;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::{inject_context, GlobalPropagator, Tracer};

/// [`Layer`] that injects the context of the current [`Span`] into the headers of the requests
/// sent by a [`Service`].
///
/// Headers already present with the same name are overwritten, the other ones are appended.
#[derive(Clone, Debug, Default)]
pub struct InjectLayer<T = GlobalPropagator> {
    tracer: T,
}

impl InjectLayer {
    /// Contexts are serialized by the global propagator.
    pub fn new() -> Self {
        Self {
            tracer: GlobalPropagator,
        }
    }
}

impl<T> InjectLayer<T> {
    /// Serialize contexts with the given [`Tracer`].
    pub fn with_tracer<U>(self, tracer: U) -> InjectLayer<U> {
        InjectLayer { tracer }
    }
}

impl<S, T: Clone> Layer<S> for InjectLayer<T> {
    type Service = Inject<S, T>;

    fn layer(&self, inner: S) -> Self::Service {
        Inject {
            inner,
            tracer: self.tracer.clone(),
        }
    }
}

/// Middleware that injects the context of the current [`Span`] into outgoing requests.
#[derive(Clone, Debug)]
pub struct Inject<S, T = GlobalPropagator> {
    inner: S,
    tracer: T,
}

impl<S, T, ReqBody> Service<Request<ReqBody>> for Inject<S, T>
where
    S: Service<Request<ReqBody>>,
    T: Tracer,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let context = Span::current().context();
        inject_context(&self.tracer, &mut req, &context);
        self.inner.call(req)
    }
}
