//! Injection of a context into the headers of a request.

use opentelemetry::{trace::TraceContextExt, Context};

use crate::{merge_headers, CarrierFormat, Error, HeaderCarrier, HeaderTable, Tracer};

/// Injects `cx` into `headers`, reporting the first failure.
///
/// Headers are only modified once the tracer has serialized the whole context: if any header
/// emitted by the tracer is rejected, `headers` is left untouched.
pub fn try_inject_context<T, H>(tracer: &T, headers: &mut H, cx: &Context) -> Result<(), Error>
where
    T: Tracer + ?Sized,
    H: HeaderTable + ?Sized,
{
    let span = cx.span();
    let span_context = span.span_context();
    tracing::debug!(
        trace_id = %span_context.trace_id(),
        span_id = %span_context.span_id(),
        "injecting span context"
    );

    let mut carrier = HeaderCarrier::new();
    let injected = tracer.inject(cx, CarrierFormat::HttpHeaders, &mut carrier);
    let pending = carrier.finish()?;
    if !injected {
        return Err(Error::Serialization);
    }

    merge_headers(headers, pending)
}

/// Injects `cx` into `headers`.
///
/// Tracing is best effort: a failure is logged and leaves the request as it is, or with part of
/// the tracing headers if they could not all be appended.
pub fn inject_context<T, H>(tracer: &T, headers: &mut H, cx: &Context)
where
    T: Tracer + ?Sized,
    H: HeaderTable + ?Sized,
{
    if let Err(err) = try_inject_context(tracer, headers, cx) {
        tracing::error!(error = %err, "failed to inject span context");
    }
}
