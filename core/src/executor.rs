//! Dispatching a built request and classifying the outcome.
//!
//! # Design
//! REST scenarios routinely assert on 404s and 500s, so a client or server
//! error that arrives with a full response is folded back into a normal
//! `Exchange`. Only failures that produced no response at all reach the step
//! layer, as `StepError::Transport`.

use tracing::{error, info, warn};

use crate::error::{StepError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::HttpTransport;

/// A request paired with the response it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub request: HttpRequest,
    pub response: HttpResponse,
}

/// Send `request` through `transport`. No retries.
pub fn execute<T: HttpTransport + ?Sized>(
    transport: &T,
    request: HttpRequest,
) -> Result<Exchange, StepError> {
    let response = match transport.send(&request) {
        Ok(response) => response,
        Err(TransportError::BadResponse(response)) => {
            warn!(
                method = %request.method,
                url = %request.url,
                status = response.status,
                "tolerating HTTP error response"
            );
            response
        }
        Err(e) => {
            error!(method = %request.method, url = %request.url, error = %e, "request failed");
            return Err(StepError::Transport(e));
        }
    };
    info!(
        method = %request.method,
        url = %request.url,
        status = response.status,
        "exchange captured"
    );
    Ok(Exchange { request, response })
}
