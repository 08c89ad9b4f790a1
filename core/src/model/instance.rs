use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Instance registration payload for `POST /instances`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub host: String,
    pub port: u16,
    /// `BROKER`, `SERVER`, `CONTROLLER` or `MINION`.
    #[serde(rename = "type")]
    pub instance_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pools: Option<BTreeMap<String, i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_service_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_mailbox_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries_disabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancesResponse {
    pub instances: Vec<String>,
}

/// Response of `GET /instances/{name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDetails {
    pub instance_name: String,
    pub host_name: String,
    #[serde(default)]
    pub enabled: bool,
    /// Reported as a string by the controller.
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pools: Option<BTreeMap<String, i32>>,
    #[serde(default = "unset_port")]
    pub grpc_port: i32,
    #[serde(default = "unset_port")]
    pub admin_port: i32,
    #[serde(default = "unset_port")]
    pub query_service_port: i32,
    #[serde(default = "unset_port")]
    pub query_mailbox_port: i32,
    #[serde(default)]
    pub system_resource_info: Option<BTreeMap<String, String>>,
}

fn unset_port() -> i32 {
    -1
}
