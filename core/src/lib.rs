//! Typed, synchronous client for the Apache Pinot controller REST API.
//!
//! # Overview
//! `PinotClient` exposes one method per controller endpoint (schemas, tables,
//! segments, instances, tenants, users, cluster config, health). Each method
//! builds exactly one request, sends it through a `Transport` and decodes the
//! reply into a model from [`model`].
//!
//! # Design
//! - `PinotClient` is immutable once built and can be shared across threads.
//! - Request construction (`build_request`) and response classification
//!   (`parse_response`) are pure; the network round-trip lives behind the
//!   `Transport` trait, with a blocking `ureq` implementation by default.
//! - Failures are split into transport, status and decode errors. Nothing is
//!   retried or cached; callers own that policy.
//!
//! ```no_run
//! use pinot_client::{ClientConfig, PinotClient};
//!
//! # fn main() -> Result<(), pinot_client::PinotError> {
//! let client = PinotClient::new(
//!     ClientConfig::new("http://localhost:9000").with_auth_token("YWRtaW46dmVyeXNlY3JldA"),
//! )?;
//! for table in client.get_tables()?.tables {
//!     println!("{table}");
//! }
//! # Ok(())
//! # }
//! ```

mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod transport;

pub use client::PinotClient;
pub use config::ClientConfig;
pub use error::{PinotError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
