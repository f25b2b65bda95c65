//! Checks run by "Then the response ..." steps against a captured response.

use crate::error::AssertionMismatch;
use crate::http::HttpResponse;

pub fn assert_status_code(response: &HttpResponse, expected: u16) -> Result<(), AssertionMismatch> {
    assert_equal("response status code", expected, response.status)
}

/// Compare the first value of header `name` (case-insensitive) to `expected`.
pub fn assert_header(
    response: &HttpResponse,
    name: &str,
    expected: &str,
) -> Result<(), AssertionMismatch> {
    match response.header(name) {
        Some(actual) => assert_equal(&format!("response header {name:?}"), expected, actual),
        None => Err(AssertionMismatch {
            subject: format!("response header {name:?}"),
            expected: format!("{expected:?}"),
            actual: "no such header".to_string(),
        }),
    }
}

fn assert_equal<T: PartialEq + std::fmt::Debug>(
    subject: &str,
    expected: T,
    actual: T,
) -> Result<(), AssertionMismatch> {
    if expected == actual {
        return Ok(());
    }
    Err(AssertionMismatch {
        subject: subject.to_string(),
        expected: format!("{expected:?}"),
        actual: format!("{actual:?}"),
    })
}
