//! Controller health checks. Both endpoints answer with plain text.

use crate::client::PinotClient;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::model::HealthCheckResponse;

impl PinotClient {
    /// `GET /health`; a healthy controller answers `OK`.
    pub fn check_controller_health(&self) -> Result<HealthCheckResponse> {
        let response = self.execute_text(HttpMethod::Get, "/health", &[])?;
        Ok(HealthCheckResponse { response })
    }

    /// `GET /pinot-controller/admin`; a healthy controller answers `GOOD`.
    pub fn check_controller_admin_health(&self) -> Result<HealthCheckResponse> {
        let response = self.execute_text(HttpMethod::Get, "/pinot-controller/admin", &[])?;
        Ok(HealthCheckResponse { response })
    }
}
