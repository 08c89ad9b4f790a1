//! Request pipeline shared by every controller operation.
//!
//! # Design
//! `PinotClient` is immutable after construction. Each operation goes through
//! the same three steps: `build_request` turns a method, path, query and
//! optional JSON body into an `HttpRequest`; the configured `Transport`
//! performs exactly one round-trip; `parse_response` classifies the
//! `HttpResponse` by status code. Nothing is retried or cached.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{PinotError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Synchronous client for the Pinot controller REST API.
///
/// Cheap to clone and safe to share between threads; every call blocks the
/// calling thread until the controller answers or the transport gives up.
#[derive(Clone)]
pub struct PinotClient {
    base_url: String,
    auth_token: Option<String>,
    logger: Option<tracing::Dispatch>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for PinotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinotClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.auth_token.is_some())
            .finish_non_exhaustive()
    }
}

impl PinotClient {
    /// Create a client that talks to the controller over `ureq`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the controller URL is not an http(s) URL.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(UreqTransport::new(config.timeout));
        Self::with_transport(config, transport)
    }

    /// Create a client that sends its requests through `transport`.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let url = config.controller_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PinotError::InvalidConfig(format!(
                "controller URL must start with http:// or https://, got: {url}"
            )));
        }
        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.filter(|token| !token.is_empty()),
            logger: config.logger,
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request for `method` on `path` (relative to the base URL).
    ///
    /// `body` must already be JSON; it is sent as-is.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> HttpRequest {
        let path = path.strip_prefix('/').unwrap_or(path);
        let mut headers = Vec::new();
        if let Some(token) = &self.auth_token {
            headers.push(("Authorization".to_string(), format!("Basic {token}")));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            path: format!("{}/{path}", self.base_url),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            headers,
            body,
        }
    }

    /// Decode a 2xx body as JSON into `T`; anything else becomes `Status`.
    pub fn parse_response<T: DeserializeOwned>(&self, response: &HttpResponse) -> Result<T> {
        check_status(response)?;
        serde_json::from_slice(&response.body).map_err(PinotError::Decode)
    }

    /// Return a 2xx body verbatim; anything else becomes `Status`.
    ///
    /// # Errors
    /// Returns `InvalidResponse` if a 2xx body is not UTF-8.
    pub fn parse_text_response(&self, response: &HttpResponse) -> Result<String> {
        check_status(response)?;
        String::from_utf8(response.body.clone())
            .map_err(|e| PinotError::InvalidResponse(format!("response body is not UTF-8: {e}")))
    }

    /// Run one request through the transport and decode the JSON reply.
    pub fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<T> {
        let request = self.build_request(method, path, query, body);
        let response = self.send(&request)?;
        self.parse_response(&response)
    }

    /// Like `execute`, for endpoints that answer with plain text.
    pub fn execute_text(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<String> {
        let request = self.build_request(method, path, query, None);
        let response = self.send(&request)?;
        self.parse_text_response(&response)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(HttpMethod::Get, path, &[], None)
    }

    pub(crate) fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.execute(HttpMethod::Post, path, &[], Some(to_json(body)?))
    }

    pub(crate) fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.execute(HttpMethod::Put, path, &[], Some(to_json(body)?))
    }

    pub(crate) fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(HttpMethod::Delete, path, &[], None)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.in_logger_scope(|| {
            let url = request.url();
            debug!(method = %request.method, %url, "sending controller request");
            match self.transport.send(request) {
                Ok(response) => {
                    debug!(
                        method = %request.method,
                        %url,
                        status = response.status,
                        "controller responded"
                    );
                    Ok(response)
                }
                Err(error) => {
                    debug!(method = %request.method, %url, %error, "controller request failed");
                    Err(error)
                }
            }
        })
    }

    fn in_logger_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.logger {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

/// Percent-encode a caller-supplied value for use as one path segment.
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

pub(crate) fn to_json<B: Serialize>(body: &B) -> Result<String> {
    serde_json::to_string(body).map_err(PinotError::Encode)
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(PinotError::Status {
        status: response.status,
        body: response.text().into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Replays one canned response and remembers every request it saw.
    struct Replay {
        response: Mutex<Option<Result<HttpResponse>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Replay {
        fn new(response: Result<HttpResponse>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(response)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for Replay {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
            self.seen.lock().unwrap().push(request.clone());
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("transport called more than once")
        }
    }

    fn client() -> PinotClient {
        PinotClient::new(ClientConfig::new("http://localhost:9000").with_auth_token("YWRtaW46YWRtaW4K"))
            .unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn rejects_non_http_urls() {
        let err = PinotClient::new(ClientConfig::new("localhost:9000")).unwrap_err();
        assert!(matches!(err, PinotError::InvalidConfig(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PinotClient::new(ClientConfig::new("http://localhost:9000/")).unwrap();
        let req = client.build_request(HttpMethod::Get, "/tables", &[], None);
        assert_eq!(req.path, "http://localhost:9000/tables");
        let req = client.build_request(HttpMethod::Get, "tables", &[], None);
        assert_eq!(req.path, "http://localhost:9000/tables");
    }

    #[test]
    fn build_attaches_basic_auth_and_json_content_type() {
        let req = client().build_request(
            HttpMethod::Post,
            "/users",
            &[],
            Some(r#"{"username":"test"}"#.to_string()),
        );
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers,
            vec![
                ("Authorization".to_string(), "Basic YWRtaW46YWRtaW4K".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ]
        );
        assert_eq!(req.body.as_deref(), Some(r#"{"username":"test"}"#));
    }

    #[test]
    fn build_without_token_or_body_has_no_headers() {
        let client = PinotClient::new(ClientConfig::new("http://localhost:9000")).unwrap();
        let req = client.build_request(HttpMethod::Get, "/tenants", &[("type", "SERVER")], None);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
        assert_eq!(req.url(), "http://localhost:9000/tenants?type=SERVER");
    }

    #[test]
    fn parse_success_decodes_json() {
        let info: BTreeMap<String, String> = client()
            .parse_response(&response(200, r#"{"clusterName": "PinotCluster"}"#))
            .unwrap();
        assert_eq!(info["clusterName"], "PinotCluster");
    }

    #[test]
    fn parse_non_2xx_keeps_raw_body() {
        let body = "{\"code\": 400,\"error\": \"Name is null\"}\n";
        let err = client()
            .parse_response::<serde_json::Value>(&response(400, body))
            .unwrap_err();
        match err {
            PinotError::Status { status, body: got } => {
                assert_eq!(status, 400);
                assert_eq!(got, body);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn parse_malformed_2xx_is_decode_error() {
        let err = client()
            .parse_response::<BTreeMap<String, String>>(&response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, PinotError::Decode(_)));
    }

    #[test]
    fn parse_text_returns_body_verbatim() {
        let text = client().parse_text_response(&response(200, "OK")).unwrap();
        assert_eq!(text, "OK");
        let err = client().parse_text_response(&response(503, "down")).unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn execute_sends_exactly_one_request() {
        let transport = Replay::new(Ok(response(200, r#"{"status": "done"}"#)));
        let client = PinotClient::with_transport(
            ClientConfig::new("http://localhost:9000"),
            transport.clone(),
        )
        .unwrap();
        let out: BTreeMap<String, String> = client
            .execute(HttpMethod::Delete, "/tables/airlineStats", &[], None)
            .unwrap();
        assert_eq!(out["status"], "done");

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Delete);
        assert_eq!(seen[0].path, "http://localhost:9000/tables/airlineStats");
    }

    #[test]
    fn execute_does_not_retry_on_server_error() {
        let transport = Replay::new(Ok(response(500, "boom")));
        let client = PinotClient::with_transport(
            ClientConfig::new("http://localhost:9000"),
            transport.clone(),
        )
        .unwrap();
        let err = client
            .execute::<serde_json::Value>(HttpMethod::Get, "/tables", &[], None)
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(transport.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn execute_surfaces_transport_errors() {
        let failure = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let transport = Replay::new(Err(PinotError::Transport(Box::new(failure))));
        let client = PinotClient::with_transport(
            ClientConfig::new("http://localhost:9000"),
            transport,
        )
        .unwrap();
        let err = client
            .execute::<serde_json::Value>(HttpMethod::Get, "/tables", &[], None)
            .unwrap_err();
        assert!(matches!(err, PinotError::Transport(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn segment_escapes_reserved_characters() {
        assert_eq!(segment("Minion_172.19.0.2_9514"), "Minion_172.19.0.2_9514");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn parse_non_utf8_error_body_keeps_status() {
        let resp = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: vec![0xff, 0xfe, b'x'],
        };
        match client().parse_response::<serde_json::Value>(&resp).unwrap_err() {
            PinotError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "\u{FFFD}\u{FFFD}x");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn parse_non_utf8_success_body_is_decode_error() {
        let resp = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: vec![b'"', 0xff, b'"'],
        };
        let err = client().parse_response::<String>(&resp).unwrap_err();
        assert!(matches!(err, PinotError::Decode(_)), "{err:?}");
        let err = client().parse_text_response(&resp).unwrap_err();
        assert!(matches!(err, PinotError::InvalidResponse(_)), "{err:?}");
    }
}
