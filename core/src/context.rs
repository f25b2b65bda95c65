//! Per-scenario state behind the REST API step definitions.
//!
//! # Design
//! One `RestApiContext` per scenario. Header steps accumulate into a
//! `HeaderStore`; a send step drains it into a request, dispatches it, and
//! replaces the captured exchange. Assertion and print steps read that
//! exchange. Everything is synchronous and owned by the scenario, so there is
//! no locking: `&mut self` on the send path is what guarantees a request never
//! mixes headers from two header-setting phases.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, instrument};

use crate::assertions;
use crate::config::RestApiConfig;
use crate::error::StepError;
use crate::executor::{self, Exchange};
use crate::headers::HeaderStore;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::inspection::ContentInspector;
use crate::request;
use crate::transport::HttpTransport;

const AUTHORIZATION: &str = "Authorization";

pub struct RestApiContext<T> {
    transport: T,
    headers: HeaderStore,
    exchange: Option<Exchange>,
    inspector: Option<Box<dyn ContentInspector + Send>>,
    enable_content_inspection: bool,
}

impl<T: HttpTransport> RestApiContext<T> {
    pub fn new(transport: T, enable_content_inspection: bool) -> Self {
        Self {
            transport,
            headers: HeaderStore::new(),
            exchange: None,
            inspector: None,
            enable_content_inspection,
        }
    }

    pub fn from_config(transport: T, config: &RestApiConfig) -> Self {
        Self::new(transport, config.enable_content_inspection)
    }

    /// Attach the collaborator that receives every response body.
    pub fn set_content_inspector(&mut self, inspector: impl ContentInspector + Send + 'static) {
        self.inspector = Some(Box::new(inspector));
    }

    pub fn content_inspection_enabled(&self) -> bool {
        self.enable_content_inspection
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Headers
    // -----------------------------------------------------------------------

    pub fn set_header(&mut self, name: &str, value: &str) {
        debug!(name, value, "set request header");
        self.headers.set(name, value);
    }

    pub fn add_header(&mut self, name: &str, value: &str) {
        debug!(name, value, "add request header");
        self.headers.add(name, value);
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.remove(name);
    }

    /// Replace any `Authorization` header with HTTP Basic credentials.
    pub fn set_basic_auth(&mut self, username: &str, password: &str) {
        self.headers.remove(AUTHORIZATION);
        let credentials = STANDARD.encode(format!("{username}:{password}"));
        self.headers.add(AUTHORIZATION, &format!("Basic {credentials}"));
    }

    /// Headers that will be sent with the next request.
    pub fn pending_headers(&self) -> &HeaderStore {
        &self.headers
    }

    // -----------------------------------------------------------------------
    // Sending
    // -----------------------------------------------------------------------

    pub fn send_request(&mut self, method: &str, url: &str) -> Result<&HttpResponse, StepError> {
        self.dispatch(HttpMethod::from(method), url, None)
    }

    pub fn send_request_with_body(
        &mut self,
        method: &str,
        url: &str,
        body: impl Into<Vec<u8>>,
    ) -> Result<&HttpResponse, StepError> {
        self.dispatch(HttpMethod::from(method), url, Some(body.into()))
    }

    /// Build, send, capture, then forward the body for inspection.
    ///
    /// A transport failure leaves the previous exchange in place. An
    /// inspection failure happens after capture, so the exchange is kept.
    #[instrument(skip(self, body))]
    fn dispatch(
        &mut self,
        method: HttpMethod,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<&HttpResponse, StepError> {
        let request = request::build_request(
            self.transport.base_url(),
            method,
            url,
            &mut self.headers,
            body,
        );
        let exchange = executor::execute(&self.transport, request)?;
        let exchange = self.exchange.insert(exchange);

        if self.enable_content_inspection {
            if let Some(inspector) = self.inspector.as_mut() {
                inspector.write_raw_content(&exchange.response.body)?;
            }
        }
        Ok(&exchange.response)
    }

    // -----------------------------------------------------------------------
    // Captured exchange
    // -----------------------------------------------------------------------

    pub fn last_exchange(&self) -> Option<&Exchange> {
        self.exchange.as_ref()
    }

    pub fn last_request(&self) -> Option<&HttpRequest> {
        self.exchange.as_ref().map(|e| &e.request)
    }

    pub fn last_response(&self) -> Option<&HttpResponse> {
        self.exchange.as_ref().map(|e| &e.response)
    }

    fn require_response(&self) -> Result<&HttpResponse, StepError> {
        self.last_response().ok_or(StepError::NoExchange)
    }

    pub fn assert_status_code(&self, expected: u16) -> Result<(), StepError> {
        assertions::assert_status_code(self.require_response()?, expected)?;
        Ok(())
    }

    pub fn assert_response_header(&self, name: &str, expected: &str) -> Result<(), StepError> {
        assertions::assert_header(self.require_response()?, name, expected)?;
        Ok(())
    }

    /// `METHOD URL :` followed by the raw response headers and body.
    pub fn format_last_exchange(&self) -> Result<String, StepError> {
        let exchange = self.exchange.as_ref().ok_or(StepError::NoExchange)?;
        Ok(format!(
            "{} {} :\n{}{}\n",
            exchange.request.method,
            exchange.request.url,
            exchange.response.raw_headers(),
            exchange.response.body_text()
        ))
    }

    /// Write the last exchange to stdout and return what was written.
    pub fn print_last_exchange(&self) -> Result<String, StepError> {
        let report = self.format_last_exchange()?;
        print!("{report}");
        Ok(report)
    }
}

impl<T> std::fmt::Debug for RestApiContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApiContext")
            .field("headers", &self.headers)
            .field("exchange", &self.exchange)
            .field("has_inspector", &self.inspector.is_some())
            .field("enable_content_inspection", &self.enable_content_inspection)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::headers::HeaderValue;

    struct Echo;

    impl HttpTransport for Echo {
        fn base_url(&self) -> &str {
            "http://api.test/"
        }

        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse {
                status: 200,
                headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
                body: request.url.clone().into_bytes(),
            })
        }
    }

    #[test]
    fn basic_auth_replaces_existing_authorization() {
        let mut ctx = RestApiContext::new(Echo, false);
        ctx.add_header("Authorization", "Bearer old");
        ctx.add_header("Authorization", "Bearer older");
        ctx.set_basic_auth("alice", "secret");
        assert_eq!(
            ctx.pending_headers().get("Authorization"),
            Some(&HeaderValue::Single("Basic YWxpY2U6c2VjcmV0".to_string()))
        );
    }

    #[test]
    fn assertions_before_any_request_fail() {
        let ctx = RestApiContext::new(Echo, false);
        assert!(matches!(ctx.assert_status_code(200), Err(StepError::NoExchange)));
        assert!(matches!(ctx.format_last_exchange(), Err(StepError::NoExchange)));
        assert!(ctx.last_request().is_none());
    }

    #[test]
    fn base_url_comes_from_the_transport() {
        let mut ctx = RestApiContext::new(Echo, false);
        assert_eq!(ctx.transport().base_url(), "http://api.test/");
        ctx.send_request("GET", "health").unwrap();
        assert!(ctx.last_request().unwrap().url.starts_with("http://api.test/"));
    }

    #[test]
    fn format_last_exchange_matches_print_layout() {
        let mut ctx = RestApiContext::new(Echo, false);
        ctx.send_request("GET", "/users").unwrap();
        assert_eq!(
            ctx.format_last_exchange().unwrap(),
            "GET http://api.test/users :\nHTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhttp://api.test/users\n"
        );
    }

    #[test]
    fn send_returns_captured_response() {
        let mut ctx = RestApiContext::new(Echo, true);
        let status = ctx.send_request("DELETE", "users/7").unwrap().status;
        assert_eq!(status, 200);
        assert_eq!(ctx.last_request().unwrap().method, HttpMethod::Delete);
        ctx.assert_response_header("content-type", "text/plain").unwrap();
    }
}
