//! Turning a step's method, URL and body into an `HttpRequest`.

use tracing::debug;

use crate::headers::HeaderStore;
use crate::http::{HttpMethod, HttpRequest};

/// Resolve a step URL against the transport's base URL.
///
/// URLs containing `://` are absolute and returned unchanged. Anything else is
/// joined to `base_url` with exactly one `/`, whatever slashes either side
/// already carries.
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if has_host(url) {
        return url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

fn has_host(url: &str) -> bool {
    url.contains("://")
}

/// Build a request, draining `headers` into it.
///
/// The store is empty afterwards even if the request is never sent.
pub fn build_request(
    base_url: &str,
    method: HttpMethod,
    url: &str,
    headers: &mut HeaderStore,
    body: Option<Vec<u8>>,
) -> HttpRequest {
    let url = resolve_url(base_url, url);
    let headers = headers.snapshot_and_clear();
    debug!(%method, %url, headers = headers.len(), "built request");
    HttpRequest {
        method,
        url,
        headers,
        body,
    }
}
