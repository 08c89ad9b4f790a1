//! Controller endpoints, one module per resource.
//!
//! Every method here is a single call through `PinotClient::execute` with a
//! fixed verb, path template and response type. Names interpolated into paths
//! are percent-encoded.

mod cluster;
mod health;
mod instances;
mod schemas;
mod segments;
mod tables;
mod tenants;
mod users;
