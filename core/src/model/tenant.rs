use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TenantRole {
    Broker,
    Server,
}

impl TenantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantRole::Broker => "BROKER",
            TenantRole::Server => "SERVER",
        }
    }
}

impl fmt::Display for TenantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for creating or updating a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub tenant_role: TenantRole,
    pub tenant_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_instances: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_instances: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime_instances: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantsResponse {
    #[serde(rename = "SERVER_TENANTS", default)]
    pub server_tenants: Vec<String>,
    #[serde(rename = "BROKER_TENANTS", default)]
    pub broker_tenants: Vec<String>,
}

/// Response of `GET /tenants/{name}/metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantMetadata {
    #[serde(rename = "tenantName")]
    pub tenant_name: String,
    #[serde(rename = "ServerInstances", default)]
    pub server_instances: Vec<String>,
    #[serde(rename = "BrokerInstances", default)]
    pub broker_instances: Vec<String>,
    #[serde(rename = "OfflineServerInstances", default)]
    pub offline_server_instances: Vec<String>,
    #[serde(rename = "RealtimeServerInstances", default)]
    pub realtime_server_instances: Vec<String>,
}
