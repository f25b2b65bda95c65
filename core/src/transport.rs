//! The HTTP transport seam.
//!
//! # Design
//! The core never opens sockets itself. It builds an `HttpRequest` and hands
//! it to whatever `HttpTransport` the scenario context was constructed with.
//! Transports must keep two failure shapes apart: a client/server error that
//! still carries a full response (`TransportError::BadResponse`) and a
//! failure that produced no response at all. The executor relies on that
//! distinction to decide what is test data and what aborts the step.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes requests built by the core.
pub trait HttpTransport {
    /// Root endpoint that relative step URLs are resolved against.
    fn base_url(&self) -> &str;

    /// Send `request` and return the response.
    ///
    /// Responses with a 4xx/5xx status should be returned as
    /// `Err(TransportError::BadResponse(..))`; a transport that returns them
    /// as `Ok` is also accepted.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn base_url(&self) -> &str {
        (**self).base_url()
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn base_url(&self) -> &str {
        (**self).base_url()
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}
