//! Tenant operations.

use crate::client::{segment, PinotClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::model::{StatusResponse, Tenant, TenantMetadata, TenantRole, TenantsResponse};

impl PinotClient {
    pub fn get_tenants(&self) -> Result<TenantsResponse> {
        self.get("/tenants")
    }

    pub fn get_tenant_metadata(&self, tenant_name: &str) -> Result<TenantMetadata> {
        self.get(&format!("/tenants/{}/metadata", segment(tenant_name)))
    }

    pub fn create_tenant(&self, tenant: &Tenant) -> Result<StatusResponse> {
        self.post("/tenants", tenant)
    }

    /// Resize an existing tenant; the tenant is named inside the payload.
    pub fn update_tenant(&self, tenant: &Tenant) -> Result<StatusResponse> {
        self.put("/tenants", tenant)
    }

    pub fn delete_tenant(&self, tenant_name: &str, role: TenantRole) -> Result<StatusResponse> {
        self.execute(
            HttpMethod::Delete,
            &format!("/tenants/{}", segment(tenant_name)),
            &[("type", role.as_str())],
            None,
        )
    }
}
