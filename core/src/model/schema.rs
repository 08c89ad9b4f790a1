use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A Pinot schema: the column definitions a table is built on.
///
/// Sections not modelled here (`complexFieldSpecs`, `timeFieldSpec`, `tags`,
/// ...) are kept in `extra`, so fetching a schema and updating it does not
/// drop columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub schema_name: String,
    #[serde(default)]
    pub dimension_field_specs: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metric_field_specs: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date_time_field_specs: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_key_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_column_based_null_handling: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Schema {
    /// Every column name declared by the schema, dimensions first.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.dimension_field_specs
            .iter()
            .chain(&self.metric_field_specs)
            .chain(&self.date_time_field_specs)
            .map(|spec| spec.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_null: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_value_field: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_null_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_function: Option<String>,
    /// Date-time columns only, e.g. `1:MILLISECONDS:EPOCH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Date-time columns only, e.g. `1:MILLISECONDS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
}

/// Outcome of `POST /schemas/validate`.
///
/// A rejected schema is a successful call with `ok == false`; the
/// controller's explanation is kept in `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateSchemaResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

/// Response of `GET /schemas/fieldSpec`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpecsResponse {
    #[serde(default)]
    pub field_types: BTreeMap<String, FieldTypeInfo>,
    #[serde(default)]
    pub data_types: BTreeMap<String, DataTypeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTypeInfo {
    /// Data type name to its defaults, e.g. `{"INT": {"nullDefault": ...}}`.
    #[serde(default)]
    pub allowed_data_types: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTypeInfo {
    #[serde(default)]
    pub stored_type: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub numeric: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted() {
        let schema = Schema {
            schema_name: "ethereum_mainnet_block_headers".to_string(),
            dimension_field_specs: vec![FieldSpec {
                name: "number".to_string(),
                data_type: "LONG".to_string(),
                not_null: Some(false),
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "schemaName": "ethereum_mainnet_block_headers",
                "dimensionFieldSpecs": [
                    {"name": "number", "dataType": "LONG", "notNull": false}
                ]
            })
        );
    }

    #[test]
    fn unknown_sections_survive_a_round_trip() {
        let raw = serde_json::json!({
            "schemaName": "s",
            "dimensionFieldSpecs": [{"name": "a", "dataType": "INT"}],
            "complexFieldSpecs": [
                {"name": "m", "dataType": "MAP", "fieldType": "COMPLEX",
                 "childFieldSpecs": {"key": {"name": "key", "dataType": "STRING"}}}
            ],
            "timeFieldSpec": {
                "incomingGranularitySpec": {"name": "ts", "dataType": "LONG", "timeType": "MILLISECONDS"}
            },
            "tags": ["hot"]
        });
        let schema: Schema = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(schema.column_names().collect::<Vec<_>>(), ["a"]);
        assert!(schema.extra.contains_key("complexFieldSpecs"));
        assert!(schema.extra.contains_key("timeFieldSpec"));
        assert_eq!(serde_json::to_value(&schema).unwrap(), raw);
    }

    #[test]
    fn decodes_controller_schema() {
        let raw = r#"{
            "schemaName": "airlineStats",
            "dimensionFieldSpecs": [
                {"name": "Carrier", "dataType": "STRING", "singleValueField": true}
            ],
            "metricFieldSpecs": [{"name": "ArrDelay", "dataType": "INT"}],
            "dateTimeFieldSpecs": [
                {"name": "DaysSinceEpoch", "dataType": "INT",
                 "format": "1:DAYS:EPOCH", "granularity": "1:DAYS"}
            ]
        }"#;
        let schema: Schema = serde_json::from_str(raw).unwrap();
        assert_eq!(schema.schema_name, "airlineStats");
        assert_eq!(
            schema.column_names().collect::<Vec<_>>(),
            vec!["Carrier", "ArrDelay", "DaysSinceEpoch"]
        );
        assert_eq!(
            schema.date_time_field_specs[0].format.as_deref(),
            Some("1:DAYS:EPOCH")
        );
    }

    #[test]
    fn decodes_field_specs() {
        let raw = r#"{
            "fieldTypes": {"METRIC": {"allowedDataTypes": {"INT": {"nullDefault": 0}}}},
            "dataTypes": {"INT": {"storedType": "INT", "size": 4, "sortable": true, "numeric": true}}
        }"#;
        let specs: FieldSpecsResponse = serde_json::from_str(raw).unwrap();
        assert!(specs.field_types["METRIC"].allowed_data_types.contains_key("INT"));
        assert_eq!(specs.data_types["INT"].size, 4);
    }
}
