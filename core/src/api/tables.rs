//! Table operations.

use std::collections::BTreeMap;

use crate::client::{segment, PinotClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::model::{
    GetTableResponse, Schema, StatusResponse, Table, TableExternalView, TableIdealState,
    TableIndexesResponse, TableInstancesResponse, TableMetadataResponse, TableSizeResponse,
    TableState, TableStateResponse, TableStats, TableType, TablesResponse,
};

impl PinotClient {
    pub fn get_tables(&self) -> Result<TablesResponse> {
        self.get("/tables")
    }

    /// Configs of the table, one per existing type.
    pub fn get_table(&self, table_name: &str) -> Result<GetTableResponse> {
        self.get(&table_path(table_name, ""))
    }

    pub fn create_table(&self, table: &Table) -> Result<StatusResponse> {
        self.post("/tables", table)
    }

    pub fn update_table(&self, table_name: &str, table: &Table) -> Result<StatusResponse> {
        self.put(&table_path(table_name, ""), table)
    }

    /// Delete every type of the table.
    pub fn delete_table(&self, table_name: &str) -> Result<StatusResponse> {
        self.delete(&table_path(table_name, ""))
    }

    /// Segment states currently reported by the servers.
    pub fn get_table_external_view(&self, table_name: &str) -> Result<TableExternalView> {
        self.get(&table_path(table_name, "/externalview"))
    }

    /// Segment states the controller is steering towards.
    pub fn get_table_ideal_state(&self, table_name: &str) -> Result<TableIdealState> {
        self.get(&table_path(table_name, "/idealstate"))
    }

    pub fn get_table_indexes(&self, table_name: &str) -> Result<TableIndexesResponse> {
        self.get(&table_path(table_name, "/indexes"))
    }

    pub fn get_table_instances(&self, table_name: &str) -> Result<TableInstancesResponse> {
        self.get(&table_path(table_name, "/instances"))
    }

    pub fn get_table_live_brokers(&self, table_name: &str) -> Result<Vec<String>> {
        self.get(&table_path(table_name, "/livebrokers"))
    }

    /// Live brokers for every table, keyed by table name with type.
    pub fn get_all_table_live_brokers(&self) -> Result<BTreeMap<String, Vec<String>>> {
        self.get("/tables/livebrokers")
    }

    pub fn get_table_metadata(&self, table_name: &str) -> Result<TableMetadataResponse> {
        self.get(&table_path(table_name, "/metadata"))
    }

    pub fn get_table_schema(&self, table_name: &str) -> Result<Schema> {
        self.get(&table_path(table_name, "/schema"))
    }

    pub fn get_table_size(&self, table_name: &str) -> Result<TableSizeResponse> {
        self.get(&table_path(table_name, "/size"))
    }

    pub fn get_table_state(
        &self,
        table_name: &str,
        table_type: TableType,
    ) -> Result<TableStateResponse> {
        self.execute(
            HttpMethod::Get,
            &table_path(table_name, "/state"),
            &[("type", table_type.as_str())],
            None,
        )
    }

    /// Enable, disable or drop one type of the table.
    pub fn change_table_state(
        &self,
        table_name: &str,
        table_type: TableType,
        state: TableState,
    ) -> Result<StatusResponse> {
        self.execute(
            HttpMethod::Put,
            &table_path(table_name, "/state"),
            &[("type", table_type.as_str()), ("state", state.as_str())],
            None,
        )
    }

    /// Creation time per table type.
    pub fn get_table_stats(&self, table_name: &str) -> Result<BTreeMap<String, TableStats>> {
        self.get(&table_path(table_name, "/stats"))
    }

    pub fn rebuild_broker_resource_from_helix_tags(
        &self,
        table_name_with_type: &str,
    ) -> Result<StatusResponse> {
        self.execute(
            HttpMethod::Post,
            &table_path(table_name_with_type, "/rebuildBrokerResourceFromHelixTags"),
            &[],
            None,
        )
    }
}

fn table_path(table_name: &str, suffix: &str) -> String {
    format!("/tables/{}{suffix}", segment(table_name))
}
