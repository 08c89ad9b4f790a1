use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TableType {
    #[default]
    Offline,
    Realtime,
}

impl TableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableType::Offline => "OFFLINE",
            TableType::Realtime => "REALTIME",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target of `change_table_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableState {
    Enable,
    Disable,
    Drop,
}

impl TableState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableState::Enable => "enable",
            TableState::Disable => "disable",
            TableState::Drop => "drop",
        }
    }
}

/// Table configuration as accepted by `POST /tables`.
///
/// Sections this crate does not model (routing, upsert, query, ...) are kept
/// in `extra` so a table read from the controller can be written back
/// without losing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table_name: String,
    pub table_type: TableType,
    #[serde(default)]
    pub segments_config: TableSegmentsConfig,
    #[serde(default)]
    pub tenants: TableTenant,
    #[serde(default)]
    pub table_index_config: TableIndexConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TableMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_config_list: Vec<FieldConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_config: Option<TableIngestionConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tier_configs: Vec<TierConfig>,
    #[serde(default)]
    pub is_dim_table: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Table {
    /// Name with the type suffix, e.g. `airlineStats_OFFLINE`.
    pub fn name_with_type(&self) -> String {
        let suffix = format!("_{}", self.table_type);
        if self.table_name.ends_with(&suffix) {
            self.table_name.clone()
        } else {
            format!("{}{suffix}", self.table_name)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSegmentsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas_per_partition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_time_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_time_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_segments_retention_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_assignment_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_push_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimize_data_movement: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableTenant {
    #[serde(default)]
    pub broker: String,
    #[serde(default)]
    pub server: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableIndexConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inverted_index_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorted_column: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bloom_filter_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub range_index_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub no_dictionary_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_heap_dictionary_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub var_length_dictionary_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub json_index_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_inverted_index_during_segment_generation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_default_star_tree: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_dynamic_star_tree_creation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_metrics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_handling_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimize_dictionary: Option<bool>,
    /// Stream settings of realtime tables, e.g. `stream.kafka.topic.name`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stream_configs: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    #[serde(default)]
    pub custom_configs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexes: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableIngestionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_time_value_check: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform_configs: Vec<TransformConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_config: Option<FilterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_on_error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_time_value_check: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_ingestion_config: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_ingestion_config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    pub column_name: String,
    pub transform_function: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub filter_function: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierConfig {
    pub name: String,
    pub segment_selector_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_age: Option<String>,
    pub storage_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

/// Response of `GET /tables/{name}`: one config per existing table type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetTableResponse {
    #[serde(rename = "OFFLINE", default, skip_serializing_if = "Option::is_none")]
    pub offline: Option<Table>,
    #[serde(rename = "REALTIME", default, skip_serializing_if = "Option::is_none")]
    pub realtime: Option<Table>,
}

impl GetTableResponse {
    pub fn get(&self, table_type: TableType) -> Option<&Table> {
        match table_type {
            TableType::Offline => self.offline.as_ref(),
            TableType::Realtime => self.realtime.as_ref(),
        }
    }
}

/// Segment-to-server assignment: segment name -> server instance -> state.
pub type SegmentAssignment = BTreeMap<String, BTreeMap<String, String>>;

/// Response of `GET /tables/{name}/externalview`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableExternalView {
    #[serde(rename = "OFFLINE", default)]
    pub offline: Option<SegmentAssignment>,
    #[serde(rename = "REALTIME", default)]
    pub realtime: Option<SegmentAssignment>,
}

/// Response of `GET /tables/{name}/idealstate`; same shape as the external view.
pub type TableIdealState = TableExternalView;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableIndexesResponse {
    #[serde(default)]
    pub total_online_segments: i64,
    /// Column -> index type -> number of segments carrying that index.
    #[serde(default)]
    pub column_to_indexes_count: BTreeMap<String, BTreeMap<String, i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInstancesResponse {
    pub table_name: String,
    #[serde(default)]
    pub brokers: Vec<TableInstances>,
    #[serde(rename = "server", default)]
    pub servers: Vec<TableInstances>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInstances {
    pub table_type: String,
    #[serde(default)]
    pub instances: Vec<String>,
}

/// Response of `GET /tables/{name}/metadata`, aggregated over segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadataResponse {
    pub table_name: String,
    #[serde(default)]
    pub disk_size_in_bytes: i64,
    #[serde(default)]
    pub num_segments: i64,
    #[serde(default)]
    pub num_rows: i64,
    #[serde(default)]
    pub column_length_map: BTreeMap<String, f64>,
    #[serde(default)]
    pub column_cardinality_map: BTreeMap<String, f64>,
    #[serde(default)]
    pub max_num_multi_values_map: BTreeMap<String, f64>,
    #[serde(default)]
    pub column_index_size_map: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub upsert_partition_to_server_primary_key_count_map: BTreeMap<String, BTreeMap<String, i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSizeResponse {
    pub table_name: String,
    #[serde(default)]
    pub reported_size_in_bytes: i64,
    #[serde(default)]
    pub estimated_size_in_bytes: i64,
    #[serde(default)]
    pub reported_size_per_replica_in_bytes: i64,
    #[serde(default)]
    pub offline_segments: Option<TableSegmentsSize>,
    #[serde(default)]
    pub realtime_segments: Option<TableSegmentsSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSegmentsSize {
    #[serde(default)]
    pub reported_size_in_bytes: i64,
    #[serde(default)]
    pub estimated_size_in_bytes: i64,
    #[serde(default)]
    pub missing_segments: i64,
    #[serde(default)]
    pub reported_size_per_replica_in_bytes: i64,
    #[serde(default)]
    pub segments: BTreeMap<String, SegmentSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSize {
    #[serde(default)]
    pub reported_size_in_bytes: i64,
    #[serde(default)]
    pub estimated_size_in_bytes: i64,
    #[serde(default)]
    pub max_reported_size_per_replica_in_bytes: i64,
    /// Server instance -> size of the segment on that server.
    #[serde(default)]
    pub server_info: BTreeMap<String, ServerSegmentSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSegmentSize {
    pub segment_name: String,
    #[serde(default)]
    pub disk_size_in_bytes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStateResponse {
    pub state: String,
}

/// One entry of `GET /tables/{name}/stats`, keyed by table type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStats {
    #[serde(default)]
    pub creation_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sections_survive_a_round_trip() {
        let raw = serde_json::json!({
            "tableName": "airlineStats_OFFLINE",
            "tableType": "OFFLINE",
            "segmentsConfig": {"timeColumnName": "DaysSinceEpoch", "replication": "1"},
            "tenants": {"broker": "DefaultTenant", "server": "DefaultTenant"},
            "tableIndexConfig": {"loadMode": "MMAP", "starTreeIndexConfigs": []},
            "routing": {"instanceSelectorType": "balanced"},
            "isDimTable": false
        });
        let table: Table = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(table.table_type, TableType::Offline);
        assert_eq!(table.segments_config.replication.as_deref(), Some("1"));
        assert!(table.extra.contains_key("routing"));
        assert!(table.table_index_config.extra.contains_key("starTreeIndexConfigs"));
        assert_eq!(serde_json::to_value(&table).unwrap(), raw);
    }

    #[test]
    fn name_with_type_appends_suffix_once() {
        let mut table = Table {
            table_name: "airlineStats".to_string(),
            ..Default::default()
        };
        assert_eq!(table.name_with_type(), "airlineStats_OFFLINE");
        table.table_name = "airlineStats_OFFLINE".to_string();
        assert_eq!(table.name_with_type(), "airlineStats_OFFLINE");
        table.table_type = TableType::Realtime;
        assert_eq!(table.name_with_type(), "airlineStats_OFFLINE_REALTIME");
    }

    #[test]
    fn get_table_response_by_type() {
        let raw = r#"{"REALTIME": {"tableName": "events_REALTIME", "tableType": "REALTIME"}}"#;
        let resp: GetTableResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.get(TableType::Offline).is_none());
        assert_eq!(
            resp.get(TableType::Realtime).unwrap().table_name,
            "events_REALTIME"
        );
    }

    #[test]
    fn external_view_keeps_segment_keys() {
        let raw = r#"{
            "OFFLINE": {"billing_OFFLINE_0": {"Server_172.19.0.7_8098": "ONLINE"}},
            "REALTIME": null
        }"#;
        let view: TableExternalView = serde_json::from_str(raw).unwrap();
        let offline = view.offline.unwrap();
        assert_eq!(offline["billing_OFFLINE_0"]["Server_172.19.0.7_8098"], "ONLINE");
        assert!(view.realtime.is_none());
    }

    #[test]
    fn instances_response_reads_server_key() {
        let raw = r#"{
            "tableName": "airlineStats",
            "brokers": [{"tableType": "offline", "instances": ["Broker_a_8099"]}],
            "server": [{"tableType": "offline", "instances": ["Server_b_8098"]}]
        }"#;
        let resp: TableInstancesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.brokers[0].instances, vec!["Broker_a_8099"]);
        assert_eq!(resp.servers[0].instances, vec!["Server_b_8098"]);
    }

    #[test]
    fn table_state_strings() {
        assert_eq!(TableState::Disable.as_str(), "disable");
        assert_eq!(TableType::Realtime.to_string(), "REALTIME");
    }
}
