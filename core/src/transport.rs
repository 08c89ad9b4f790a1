//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `PinotClient` only knows how to build requests and classify responses; the
//! round-trip itself goes through the `Transport` trait. `UreqTransport` is the
//! blocking default. Tests swap in transports that record requests or replay
//! canned responses.

use std::time::Duration;

use crate::error::{PinotError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs exactly one HTTP round-trip per call.
///
/// Implementations must return every received response as `Ok`, whatever its
/// status; only failures to obtain a response are errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        // Status codes are classified by the client, not by ureq.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Some(crate::config::DEFAULT_TIMEOUT))
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.url();
        let body = request.body.as_deref();

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(&url), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&url), &request.headers).call(),
            HttpMethod::Post => send_body(with_headers(self.agent.post(&url), &request.headers), body),
            HttpMethod::Put => send_body(with_headers(self.agent.put(&url), &request.headers), body),
        };
        let mut response = result.map_err(|e| PinotError::Transport(Box::new(e)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        // Segment and ideal-state listings of large tables exceed ureq's
        // default 10 MiB read limit.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| PinotError::Body {
                status,
                source: Box::new(e),
            })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&str>,
) -> std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
