//! HTTP transport seam.
//!
//! Client-side (hydrate): `GlooTransport` issues real `fetch` calls via
//! `gloo-net`. Tests substitute a scripted transport.
//!
//! ERROR HANDLING
//! ==============
//! A transport only fails for transport reasons. Non-OK statuses come back
//! as a normal `HttpReply`; the gateway decides what counts as failure.

#![allow(async_fn_in_trait)]

use super::types::Method;
use crate::error::AjaxError;

/// Header marking requests as AJAX for the server's controllers.
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: &str) -> Self {
        Self { method: Method::Get, url: url.to_owned(), headers: Vec::new(), body: None }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `Err(Status)` unless the status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns `AjaxError::Status` for non-2xx replies.
    pub fn require_ok(self) -> Result<Self, AjaxError> {
        if self.ok() { Ok(self) } else { Err(AjaxError::Status { status: self.status, status_text: self.status_text }) }
    }
}

pub trait Transport {
    /// Perform `request` and read the whole body as text.
    ///
    /// # Errors
    ///
    /// Returns `AjaxError::Transport` when no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, AjaxError>;
}

/// Browser `fetch` via `gloo-net`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, AjaxError> {
        use gloo_net::http::RequestBuilder;

        let method = match request.method {
            Method::Get => gloo_net::http::Method::GET,
            Method::Head => gloo_net::http::Method::HEAD,
            Method::Post => gloo_net::http::Method::POST,
            Method::Put => gloo_net::http::Method::PUT,
            Method::Patch => gloo_net::http::Method::PATCH,
            Method::Delete => gloo_net::http::Method::DELETE,
        };
        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| AjaxError::Transport(e.to_string()))?;
        let resp = built.send().await.map_err(|e| AjaxError::Transport(e.to_string()))?;
        let status = resp.status();
        let status_text = resp.status_text();
        let body = resp.text().await.map_err(|e| AjaxError::Transport(e.to_string()))?;
        Ok(HttpReply { status, status_text, body })
    }
}
