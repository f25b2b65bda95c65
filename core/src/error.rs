//! Error types for the step orchestration core.
//!
//! # Design
//! A 4xx/5xx answer is data, not a failure, so it never appears in
//! `StepError`: the transport reports it as `TransportError::BadResponse` and
//! the executor turns it back into a normal exchange. Everything that does
//! reach the step layer is a real failure of the current step.

use thiserror::Error;

use crate::http::HttpResponse;

/// Errors reported by an `HttpTransport`.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a client or server error status. The
    /// response is complete and can be asserted on.
    #[error("HTTP {} response", .0.status)]
    BadResponse(HttpResponse),

    /// No response was obtained: connection refused, DNS failure, TLS or
    /// protocol error.
    #[error("transport failure: {0}")]
    Unreachable(String),

    /// The transport gave up waiting for a response.
    #[error("request timed out: {0}")]
    Timeout(String),
}

/// Raised by a content inspector when the body cannot be inspected.
#[derive(Debug, Error)]
pub enum InspectionError {
    #[error("response body is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// An assertion step found a different value than expected.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{subject}: expected {expected}, got {actual}")]
pub struct AssertionMismatch {
    pub subject: String,
    pub expected: String,
    pub actual: String,
}

/// Failures surfaced to the step layer.
#[derive(Debug, Error)]
pub enum StepError {
    /// The request never produced a response. Fatal for the scenario.
    #[error(transparent)]
    Transport(TransportError),

    /// Content inspection rejected the response body.
    #[error(transparent)]
    Inspection(#[from] InspectionError),

    /// An assertion did not hold.
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionMismatch),

    /// An assertion or print step ran before any request was sent.
    #[error("no request has been sent yet")]
    NoExchange,
}

/// Errors loading `RestApiConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
}
