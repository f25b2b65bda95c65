//! HTTP request and response types exchanged with the transport.
//!
//! # Design
//! Requests and responses are plain data. The core builds an `HttpRequest`
//! and hands it to an `HttpTransport`, which performs the actual I/O and
//! returns an `HttpResponse`. Keeping the types transport-agnostic lets the
//! scenario tests swap the network for an in-memory fake.
//!
//! Bodies are raw bytes: step bodies are passed through untouched and
//! response bodies are forwarded verbatim to content inspection.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::headers::Headers;

/// HTTP method for a request.
///
/// Step definitions accept any upper-case verb, so anything outside the
/// common set is carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Other(m) => m,
        }
    }
}

impl FromStr for HttpMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            other => HttpMethod::Other(other.to_string()),
        })
    }
}

impl From<&str> for HttpMethod {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(m) => m,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready for the transport.
///
/// Built by `RestApiContext`; `url` is always absolute and `headers` is the
/// header snapshot taken at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

/// A response returned by the transport, including 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First value of the header called `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Status line and header lines as they appeared on the wire, terminated
    /// by the blank line that separates them from the body.
    pub fn raw_headers(&self) -> String {
        let mut raw = match self.reason_phrase() {
            Some(reason) => format!("HTTP/1.1 {} {reason}\r\n", self.status),
            None => format!("HTTP/1.1 {}\r\n", self.status),
        };
        for (name, value) in &self.headers {
            raw.push_str(&format!("{name}: {value}\r\n"));
        }
        raw.push_str("\r\n");
        raw
    }

    /// Canonical reason for the status code, `None` for unregistered codes.
    pub fn reason_phrase(&self) -> Option<&'static str> {
        ::http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_client_or_server_error(&self) -> bool {
        self.status >= 400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("X-Request-Id".to_string(), "abc".to_string()),
            ],
            body: br#"{"id":42}"#.to_vec(),
        }
    }

    #[test]
    fn method_parses_known_and_custom_verbs() {
        assert_eq!(HttpMethod::from("GET"), HttpMethod::Get);
        assert_eq!(HttpMethod::from("PATCH"), HttpMethod::Patch);
        assert_eq!(
            HttpMethod::from("PURGE"),
            HttpMethod::Other("PURGE".to_string())
        );
        assert_eq!(HttpMethod::from("PURGE").as_str(), "PURGE");
    }

    #[test]
    fn raw_headers_include_status_line_and_blank_line() {
        assert_eq!(
            response().raw_headers(),
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nX-Request-Id: abc\r\n\r\n"
        );
    }

    #[test]
    fn status_line_carries_reason_phrase() {
        let mut r = response();
        r.status = 404;
        r.headers.clear();
        assert_eq!(r.raw_headers(), "HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn unregistered_status_has_bare_status_line() {
        let mut r = response();
        r.status = 599;
        r.headers.clear();
        assert_eq!(r.reason_phrase(), None);
        assert_eq!(r.raw_headers(), "HTTP/1.1 599\r\n\r\n");
    }

    #[test]
    fn header_lookup_ignores_case() {
        assert_eq!(response().header("content-type"), Some("application/json"));
        assert_eq!(response().header("X-Missing"), None);
    }

    #[test]
    fn body_text_is_lossy() {
        let mut r = response();
        r.body = vec![b'o', b'k', 0xff];
        assert_eq!(r.body_text(), "ok\u{fffd}");
    }
}
