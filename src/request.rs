//! Incoming HTTP request type.
//!
//! A [`Request`] is an owned, fully-buffered view of one incoming request.
//! Its [`Classification`] is computed exactly once, at construction — the
//! pre-handler point — and read again by the composer and the redirect
//! operation without recomputation.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method};

use crate::classify::{self, Classification, RenderMode};

/// An incoming HTTP request.
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
    classification: Classification,
}

impl Request {
    /// Builds a request from its parts. `target` is the request target as it
    /// appears on the wire — path plus optional query (`/orders?page=2`).
    ///
    /// Public so the pipeline can be driven without a socket: embedders and
    /// tests construct requests and feed them to
    /// [`App::handle`](crate::App::handle) directly.
    pub fn new(method: Method, target: &str, headers: HeaderMap, body: Bytes) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (target.to_owned(), None),
        };
        let classification = classify::classify(&method, &path, &headers);
        Self {
            method,
            path,
            query,
            headers,
            body,
            params: HashMap::new(),
            classification,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw query string, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive header lookup. Values that are not valid UTF-8 read
    /// as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/orders/{id}`, `req.param("id")` on `/orders/42` returns
    /// `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a query parameter, percent-decoded. The first occurrence wins.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == name).then(|| percent_decode(value))
        })
    }

    /// The classifier result for this request, computed at construction.
    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn mode(&self) -> RenderMode {
        self.classification.mode
    }

    /// True when the request carries the partial-update marker.
    pub fn is_partial(&self) -> bool {
        self.classification.is_partial
    }

    /// True when the request carries the history-restore marker.
    pub fn is_history_restore(&self) -> bool {
        self.classification.is_history_restore
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }
}

/// Minimal percent-decoding for query parameter values. Invalid escapes pass
/// through literally; `+` reads as a space.
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                out.push(hex_digit(bytes[i + 1]) << 4 | hex_digit(bytes[i + 2]));
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => 0,
    }
}
