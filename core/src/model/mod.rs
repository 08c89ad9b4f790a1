//! Data-transfer types mirroring the controller's JSON documents.
//!
//! # Design
//! These types carry no behavior beyond small lookup helpers. Field names
//! follow the controller's camelCase JSON; optional fields are skipped when
//! absent so request bodies only contain what the caller set. Responses keyed
//! by segment, table or server names are kept as maps, since the keys are data.

mod cluster;
mod instance;
mod schema;
mod segment;
mod table;
mod tenant;
mod user;

use serde::{Deserialize, Serialize};

pub use cluster::{ClusterConfigs, ClusterInfo};
pub use instance::{Instance, InstanceDetails, InstancesResponse};
pub use schema::{
    DataTypeInfo, FieldSpec, FieldSpecsResponse, FieldTypeInfo, Schema, ValidateSchemaResponse,
};
pub use segment::{SegmentMetadata, SegmentTiersResponse, SegmentZkMetadata, SegmentsResponse};
pub use table::{
    FieldConfig, FilterConfig, GetTableResponse, SegmentAssignment, SegmentSize,
    ServerSegmentSize, Table, TableExternalView, TableIdealState, TableIndexConfig,
    TableIndexesResponse, TableIngestionConfig, TableInstances, TableInstancesResponse,
    TableMetadata, TableMetadataResponse, TableSegmentsConfig, TableSegmentsSize,
    TableSizeResponse, TableState, TableStateResponse, TableStats, TableTenant, TableType,
    TablesResponse, TierConfig, TransformConfig,
};
pub use tenant::{Tenant, TenantMetadata, TenantRole, TenantsResponse};
pub use user::{User, UsersResponse};

pub(crate) use user::user_key;

/// Acknowledgement returned by most mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Body of the plain-text health endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub response: String,
}
