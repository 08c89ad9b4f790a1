//! Instance operations.

use crate::client::{segment, PinotClient};
use crate::error::Result;
use crate::model::{Instance, InstanceDetails, InstancesResponse, StatusResponse};

impl PinotClient {
    pub fn get_instances(&self) -> Result<InstancesResponse> {
        self.get("/instances")
    }

    /// Details of one instance, e.g. `Server_172.19.0.7_8098`.
    pub fn get_instance(&self, instance_name: &str) -> Result<InstanceDetails> {
        self.get(&instance_path(instance_name))
    }

    /// Register an instance. The controller names it
    /// `<Type>_<host>_<port>`.
    pub fn create_instance(&self, instance: &Instance) -> Result<StatusResponse> {
        self.post("/instances", instance)
    }

    pub fn update_instance(
        &self,
        instance_name: &str,
        instance: &Instance,
    ) -> Result<StatusResponse> {
        self.put(&instance_path(instance_name), instance)
    }

    pub fn delete_instance(&self, instance_name: &str) -> Result<StatusResponse> {
        self.delete(&instance_path(instance_name))
    }
}

fn instance_path(instance_name: &str) -> String {
    format!("/instances/{}", segment(instance_name))
}
