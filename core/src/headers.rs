//! Request headers accumulated between scenario steps.
//!
//! # Design
//! Steps such as "I set X header equal to Y" mutate a `HeaderStore` that lives
//! on the scenario context. The store is drained into the next request when it
//! is built, so every request only sees the headers set since the previous
//! one. Names are kept exactly as given (case-sensitive) and in insertion
//! order, which keeps the snapshot deterministic for tests and for the wire.

use indexmap::IndexMap;

/// Value(s) recorded for one header name.
///
/// Repeated `add` calls on the same name promote a `Single` value to `Multi`,
/// which the transport sends as repeated header lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Single(String),
    Multi(Vec<String>),
}

impl HeaderValue {
    /// Iterate over the individual values in order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            HeaderValue::Single(v) => std::slice::from_ref(v),
            HeaderValue::Multi(vs) => vs,
        };
        slice.iter().map(String::as_str)
    }

    fn push(&mut self, value: String) {
        match self {
            HeaderValue::Single(first) => {
                let first = std::mem::take(first);
                *self = HeaderValue::Multi(vec![first, value]);
            }
            HeaderValue::Multi(vs) => vs.push(value),
        }
    }
}

/// Ordered header mapping carried by a built request.
pub type Headers = IndexMap<String, HeaderValue>;

/// Mutable header accumulator, emptied every time a request is built.
#[derive(Debug, Clone, Default)]
pub struct HeaderStore {
    headers: Headers,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `name` with `value`.
    pub fn set(&mut self, name: &str, value: &str) {
        self.remove(name);
        self.add(name, value);
    }

    /// Append `value` to `name`, promoting to a multi-valued header if needed.
    pub fn add(&mut self, name: &str, value: &str) {
        match self.headers.get_mut(name) {
            Some(existing) => existing.push(value.to_string()),
            None => {
                self.headers
                    .insert(name.to_string(), HeaderValue::Single(value.to_string()));
            }
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.headers.shift_remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Take the accumulated headers, leaving the store empty.
    pub fn snapshot_and_clear(&mut self) -> Headers {
        std::mem::take(&mut self.headers)
    }
}
