//! `HttpTransport` backed by a blocking `ureq` agent.

use std::time::Duration;

use tracing::debug;
use ureq::http;

use crate::config::RestApiConfig;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::HttpTransport;

/// Blocking transport that reports 4xx/5xx as `TransportError::BadResponse`.
///
/// The agent is configured with `http_status_as_error(false)` so error
/// responses come back with their headers and body intact; the status is
/// classified here instead. Non-standard verbs (`PURGE`, `LINK`) are let
/// through to the server.
#[derive(Clone)]
pub struct UreqTransport {
    base_url: String,
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(base_url: &str) -> Self {
        Self::build(base_url, None)
    }

    pub fn from_config(config: &RestApiConfig) -> Self {
        Self::build(&config.base_url, config.timeout())
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self {
            base_url: base_url.to_string(),
            agent,
        }
    }
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport for UreqTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            for v in value.values() {
                builder = builder.header(name.as_str(), v);
            }
        }

        let result = match &request.body {
            Some(body) => builder
                .body(body.as_slice())
                .map_err(invalid_request)
                .and_then(|req| self.agent.run(req).map_err(map_ureq_error)),
            None => builder
                .body(())
                .map_err(invalid_request)
                .and_then(|req| self.agent.run(req).map_err(map_ureq_error)),
        };
        let mut response = result?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(map_ureq_error)?;
        debug!(status, bytes = body.len(), "ureq response received");

        let response = HttpResponse {
            status,
            headers,
            body,
        };
        if response.is_client_or_server_error() {
            return Err(TransportError::BadResponse(response));
        }
        Ok(response)
    }
}

fn invalid_request(e: http::Error) -> TransportError {
    TransportError::Unreachable(format!("invalid request: {e}"))
}

fn map_ureq_error(e: ureq::Error) -> TransportError {
    match e {
        ureq::Error::Timeout(_) => TransportError::Timeout(e.to_string()),
        _ => TransportError::Unreachable(e.to_string()),
    }
}
