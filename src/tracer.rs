//! Serialization of a context into a carrier.

use std::sync::Arc;

use opentelemetry::{
    propagation::{Injector, TextMapPropagator},
    Context,
};

/// Encoding used to serialize a context into a carrier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CarrierFormat {
    /// The carrier is a set of HTTP headers.
    #[default]
    HttpHeaders,
    /// The carrier is a generic text map.
    TextMap,
}

/// Serializes a [`Context`] into a carrier.
///
/// Returns `false` if the context could not be serialized, the carrier may have received part of
/// the fields.
pub trait Tracer {
    fn inject(&self, cx: &Context, format: CarrierFormat, carrier: &mut dyn Injector) -> bool;
}

impl<T: Tracer + ?Sized> Tracer for &T {
    fn inject(&self, cx: &Context, format: CarrierFormat, carrier: &mut dyn Injector) -> bool {
        (**self).inject(cx, format, carrier)
    }
}

impl<T: Tracer + ?Sized> Tracer for Arc<T> {
    fn inject(&self, cx: &Context, format: CarrierFormat, carrier: &mut dyn Injector) -> bool {
        (**self).inject(cx, format, carrier)
    }
}

/// [`Tracer`] backed by a [`TextMapPropagator`].
///
/// Both carrier formats are handled the same way, propagators only know about text maps.
#[derive(Clone, Debug)]
pub struct Propagator<P>(pub P);

impl<P: TextMapPropagator> Tracer for Propagator<P> {
    fn inject(&self, cx: &Context, _format: CarrierFormat, carrier: &mut dyn Injector) -> bool {
        self.0.inject_context(cx, carrier);
        true
    }
}

/// [`Tracer`] backed by the global [`TextMapPropagator`].
///
/// See [`opentelemetry::global::set_text_map_propagator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalPropagator;

impl Tracer for GlobalPropagator {
    fn inject(&self, cx: &Context, _format: CarrierFormat, carrier: &mut dyn Injector) -> bool {
        opentelemetry::global::get_text_map_propagator(|propagator| {
            propagator.inject_context(cx, carrier);
        });
        true
    }
}
