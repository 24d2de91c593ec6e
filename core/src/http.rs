//! HTTP exchange described as plain data.
//!
//! # Design
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. A `Transport` performs the round-trip in
//! between, which keeps request building and response parsing deterministic
//! and testable with canned responses. The API is read-only, so every
//! request is a GET.

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// `body` is best-effort: a transport that cannot read the body hands over
/// an empty string rather than failing the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
