use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::table::TableType;

/// Response of `GET /segments/{table}`.
///
/// The controller groups segment names by table type, one map per type:
/// `[{"OFFLINE": ["seg1", "seg2"]}, {"REALTIME": ["seg3"]}]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentsResponse(pub Vec<BTreeMap<String, Vec<String>>>);

impl SegmentsResponse {
    /// Segment names of one table type; empty when the type is absent.
    pub fn segments_of(&self, table_type: TableType) -> &[String] {
        self.0
            .iter()
            .find_map(|by_type| by_type.get(table_type.as_str()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// One entry of `GET /segments/{table}/metadata`, keyed by segment name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMetadata {
    pub segment_name: String,
    #[serde(default)]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub crc: Option<i64>,
    #[serde(default)]
    pub creation_time_millis: Option<i64>,
    #[serde(default)]
    pub creation_time_readable: Option<String>,
    #[serde(default)]
    pub time_column: Option<String>,
    #[serde(default)]
    pub time_unit: Option<String>,
    #[serde(default)]
    pub time_granularity_sec: Option<i64>,
    #[serde(default)]
    pub start_time_millis: Option<i64>,
    #[serde(default)]
    pub start_time_readable: Option<String>,
    #[serde(default)]
    pub end_time_millis: Option<i64>,
    #[serde(default)]
    pub end_time_readable: Option<String>,
    #[serde(default)]
    pub segment_version: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub total_docs: Option<i64>,
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
    #[serde(default)]
    pub columns: Vec<serde_json::Value>,
    #[serde(default)]
    pub indexes: BTreeMap<String, BTreeMap<String, String>>,
}

/// One entry of `GET /segments/{table}/zkmetadata`, keyed by segment name.
///
/// ZooKeeper reports every value as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentZkMetadata {
    #[serde(rename = "segment.crc", default)]
    pub crc: Option<String>,
    #[serde(rename = "segment.creation.time", default)]
    pub creation_time: Option<String>,
    #[serde(rename = "segment.start.time", default)]
    pub start_time: Option<String>,
    #[serde(rename = "segment.end.time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "segment.time.unit", default)]
    pub time_unit: Option<String>,
    #[serde(rename = "segment.index.version", default)]
    pub index_version: Option<String>,
    #[serde(rename = "segment.push.time", default)]
    pub push_time: Option<String>,
    #[serde(rename = "segment.size.in.bytes", default)]
    pub size_in_bytes: Option<String>,
    #[serde(rename = "segment.total.docs", default)]
    pub total_docs: Option<String>,
    #[serde(rename = "segment.download.url", default)]
    pub download_url: Option<String>,
    #[serde(rename = "segment.tier", default)]
    pub tier: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentTiersResponse {
    pub table_name: String,
    /// Segment name -> tier source (`targetTier`, server names) -> tier.
    #[serde(default)]
    pub segment_tiers: BTreeMap<String, BTreeMap<String, String>>,
}
