//! Request/response orchestration for REST API scenario steps.
//!
//! # Overview
//! A BDD runner maps steps like `I send a GET request to "/users/42"` or
//! `the response status code should be 200` onto a `RestApiContext`. The
//! context accumulates headers, builds and sends the request through an
//! injected `HttpTransport`, captures the exchange, and optionally forwards
//! the body to a `ContentInspector` such as `JsonStorage`.
//!
//! # Design
//! - The transport is a trait; `UreqTransport` (feature `ureq`, on by
//!   default) is the stock implementation and tests substitute fakes.
//! - 4xx/5xx responses are captured as data. Only failures without a
//!   response abort the step.
//! - Headers reset after every built request.
//! - No logging subscriber is installed here; `tracing` events go wherever
//!   the host runner sends them.

pub mod assertions;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod headers;
pub mod http;
pub mod inspection;
pub mod request;
pub mod transport;
#[cfg(feature = "ureq")]
pub mod ureq_transport;

pub use config::RestApiConfig;
pub use context::RestApiContext;
pub use error::{AssertionMismatch, ConfigError, InspectionError, StepError, TransportError};
pub use executor::Exchange;
pub use headers::{HeaderStore, HeaderValue, Headers};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use inspection::{ContentInspector, JsonStorage};
pub use request::resolve_url;
pub use transport::HttpTransport;
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;
