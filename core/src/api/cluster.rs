//! Cluster-wide operations.

use crate::client::{segment, PinotClient};
use crate::error::Result;
use crate::model::{ClusterConfigs, ClusterInfo, StatusResponse};

impl PinotClient {
    pub fn get_cluster_info(&self) -> Result<ClusterInfo> {
        self.get("/cluster/info")
    }

    pub fn get_cluster_configs(&self) -> Result<ClusterConfigs> {
        self.get("/cluster/configs")
    }

    /// Set the given keys; keys not present in `configs` are left unchanged.
    pub fn update_cluster_configs(&self, configs: &ClusterConfigs) -> Result<StatusResponse> {
        self.post("/cluster/configs", configs)
    }

    pub fn delete_cluster_config(&self, config_name: &str) -> Result<StatusResponse> {
        self.delete(&format!("/cluster/configs/{}", segment(config_name)))
    }
}
