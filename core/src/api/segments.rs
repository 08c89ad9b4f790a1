//! Segment operations.
//!
//! Endpoints that act on a specific table type (reset, ZK time interval)
//! expect the name with its type suffix, e.g. `airlineStats_OFFLINE`.

use std::collections::BTreeMap;

use crate::client::{segment, PinotClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::model::{
    SegmentMetadata, SegmentTiersResponse, SegmentZkMetadata, SegmentsResponse, StatusResponse,
    TableType,
};

impl PinotClient {
    pub fn get_segments(&self, table_name: &str) -> Result<SegmentsResponse> {
        self.get(&segments_path(table_name, ""))
    }

    /// Metadata of every segment, keyed by segment name.
    pub fn get_segment_metadata(
        &self,
        table_name: &str,
    ) -> Result<BTreeMap<String, SegmentMetadata>> {
        self.get(&segments_path(table_name, "/metadata"))
    }

    /// CRC of every segment, keyed by segment name.
    pub fn get_segment_crc(&self, table_name: &str) -> Result<BTreeMap<String, String>> {
        self.get(&segments_path(table_name, "/crc"))
    }

    pub fn get_segment_zk_metadata(
        &self,
        table_name: &str,
    ) -> Result<BTreeMap<String, SegmentZkMetadata>> {
        self.get(&segments_path(table_name, "/zkmetadata"))
    }

    pub fn get_segment_tiers(
        &self,
        table_name: &str,
        table_type: TableType,
    ) -> Result<SegmentTiersResponse> {
        self.execute(
            HttpMethod::Get,
            &segments_path(table_name, "/tiers"),
            &[("type", table_type.as_str())],
            None,
        )
    }

    pub fn delete_segment(&self, table_name: &str, segment_name: &str) -> Result<StatusResponse> {
        self.delete(&segment_path(table_name, segment_name, ""))
    }

    pub fn reload_table_segments(&self, table_name: &str) -> Result<StatusResponse> {
        self.post_empty(&segments_path(table_name, "/reload"))
    }

    pub fn reload_segment(&self, table_name: &str, segment_name: &str) -> Result<StatusResponse> {
        self.post_empty(&segment_path(table_name, segment_name, "/reload"))
    }

    pub fn reset_table_segments(&self, table_name_with_type: &str) -> Result<StatusResponse> {
        self.post_empty(&segments_path(table_name_with_type, "/reset"))
    }

    pub fn reset_table_segment(
        &self,
        table_name_with_type: &str,
        segment_name: &str,
    ) -> Result<StatusResponse> {
        self.post_empty(&segment_path(table_name_with_type, segment_name, "/reset"))
    }

    /// Recompute the start/end times stored in ZooKeeper for every segment.
    pub fn update_segment_zk_time_interval(
        &self,
        table_name_with_type: &str,
    ) -> Result<StatusResponse> {
        self.post_empty(&segments_path(table_name_with_type, "/updateZKTimeInterval"))
    }

    fn post_empty(&self, path: &str) -> Result<StatusResponse> {
        self.execute(HttpMethod::Post, path, &[], None)
    }
}

fn segments_path(table_name: &str, suffix: &str) -> String {
    format!("/segments/{}{suffix}", segment(table_name))
}

fn segment_path(table_name: &str, segment_name: &str, suffix: &str) -> String {
    format!(
        "/segments/{}/{}{suffix}",
        segment(table_name),
        segment(segment_name)
    )
}
