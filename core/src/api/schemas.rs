//! Schema operations.

use serde::Deserialize;

use crate::client::{segment, PinotClient};
use crate::error::{PinotError, Result};
use crate::http::HttpMethod;
use crate::model::{FieldSpecsResponse, Schema, StatusResponse, ValidateSchemaResponse};

/// Just enough of a schema document to route an update.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaName {
    schema_name: String,
}

impl PinotClient {
    /// Names of all schemas known to the controller.
    pub fn get_schemas(&self) -> Result<Vec<String>> {
        self.get("/schemas")
    }

    pub fn get_schema(&self, schema_name: &str) -> Result<Schema> {
        self.get(&format!("/schemas/{}", segment(schema_name)))
    }

    /// Validate `schema`, then upload it.
    ///
    /// # Errors
    /// Returns `SchemaValidation` without uploading if the controller rejects
    /// the schema during validation.
    pub fn create_schema(&self, schema: &Schema) -> Result<StatusResponse> {
        let validation = self.validate_schema(schema)?;
        if !validation.ok {
            return Err(PinotError::SchemaValidation(validation.error));
        }
        self.post("/schemas", schema)
    }

    /// Upload a schema that is already JSON-encoded. The bytes are sent as-is.
    pub fn create_schema_from_bytes(&self, schema: &[u8]) -> Result<StatusResponse> {
        let body = json_body(schema)?;
        self.execute(HttpMethod::Post, "/schemas", &[], Some(body))
    }

    pub fn update_schema(&self, schema: &Schema) -> Result<StatusResponse> {
        self.put(&format!("/schemas/{}", segment(&schema.schema_name)), schema)
    }

    /// Replace a schema from JSON bytes; the target is the document's
    /// `schemaName`.
    pub fn update_schema_from_bytes(&self, schema: &[u8]) -> Result<StatusResponse> {
        let SchemaName { schema_name } =
            serde_json::from_slice(schema).map_err(PinotError::Encode)?;
        let body = json_body(schema)?;
        self.execute(
            HttpMethod::Put,
            &format!("/schemas/{}", segment(&schema_name)),
            &[],
            Some(body),
        )
    }

    pub fn delete_schema(&self, schema_name: &str) -> Result<StatusResponse> {
        self.delete(&format!("/schemas/{}", segment(schema_name)))
    }

    /// Ask the controller whether `schema` would be accepted.
    ///
    /// A client error from the controller (other than 401/403) means the
    /// schema is invalid and is reported as `ok == false` with the
    /// controller's message, not as an `Err`.
    pub fn validate_schema(&self, schema: &Schema) -> Result<ValidateSchemaResponse> {
        match self.post::<_, serde_json::Value>("/schemas/validate", schema) {
            Ok(_) => Ok(ValidateSchemaResponse {
                ok: true,
                error: String::new(),
            }),
            Err(PinotError::Status { status, body })
                if (400..500).contains(&status) && status != 401 && status != 403 =>
            {
                Ok(ValidateSchemaResponse {
                    ok: false,
                    error: body,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Field types and data types the controller accepts in schemas.
    pub fn get_schema_field_specs(&self) -> Result<FieldSpecsResponse> {
        self.get("/schemas/fieldSpec")
    }
}

/// Check that caller-supplied bytes are JSON and turn them into a body.
fn json_body(bytes: &[u8]) -> Result<String> {
    serde_json::from_slice::<serde::de::IgnoredAny>(bytes).map_err(PinotError::Encode)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
