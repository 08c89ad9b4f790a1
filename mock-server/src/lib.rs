//! In-process stand-in for a Pinot controller.
//!
//! Users, instances, tenants and cluster settings answer with fixed bodies;
//! schemas and tables are kept in memory so create/read/update/delete cycles
//! behave like the real controller. Everything except the health endpoints
//! requires `Authorization: Basic YWRtaW46YWRtaW4K`.

use std::{
    collections::{BTreeMap, HashMap},
    net::SocketAddr,
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Token every authenticated route expects (`admin:admin\n`, base64).
pub const AUTH_TOKEN: &str = "YWRtaW46YWRtaW4K";

pub const INSTANCE_NAME: &str = "Minion_172.19.0.2_9514";

const USERS: &str = r#"{"users": {"test_BROKER": {"username": "test","password": "$2a$10$3KYPvIy4fBM3CWfdKSc54u/BOn1rPlgb7u4P66s4upqAct30C/q6a","component": "BROKER","role": "ADMIN","usernameWithComponent": "test_BROKER"}}}"#;
const INSTANCES: &str = r#"{"instances": ["Minion_172.19.0.2_9514","Server_172.19.0.7_8098","Broker_cdba1ba98e74_8099","Controller_8684b6757488_9000"]}"#;
const INSTANCE: &str = r#"{"instanceName": "Minion_172.19.0.2_9514","hostName": "172.19.0.2","enabled": true,"port": "9514","tags": ["minion_untagged"],"pools": null,"grpcPort": -1,"adminPort": -1,"queryServicePort": -1,"queryMailboxPort": -1,"systemResourceInfo": null}"#;
const CLUSTER_INFO: &str = r#"{"clusterName": "PinotCluster"}"#;
const CLUSTER_CONFIGS: &str = r#"{"allowParticipantAutoJoin": "true","enable.case.insensitive": "true","pinot.broker.enable.query.limit.override": "false","default.hyperloglog.log2m": "8"}"#;
const TENANTS: &str = r#"{"SERVER_TENANTS": ["DefaultTenant"],"BROKER_TENANTS": ["DefaultTenant"]}"#;
const NAME_IS_NULL: &str = r#"{"code": 400,"error": "Name is null"}"#;

#[derive(Default)]
pub struct Store {
    schemas: HashMap<String, Value>,
    /// Raw table name -> table type -> config.
    tables: HashMap<String, BTreeMap<String, Value>>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::default();
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route(
            "/users/{username}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/instances", get(get_instances).post(create_instance))
        .route(
            "/instances/{name}",
            get(get_instance).put(update_instance).delete(delete_instance),
        )
        .route("/tenants", get(get_tenants).post(create_tenant))
        .route("/tenants/{name}", delete(delete_tenant))
        .route("/cluster/info", get(|| async { json_body(CLUSTER_INFO) }))
        .route(
            "/cluster/configs",
            get(|| async { json_body(CLUSTER_CONFIGS) }).post(update_cluster_configs),
        )
        .route("/cluster/configs/{key}", delete(delete_cluster_config))
        .route("/schemas", get(list_schemas).post(create_schema))
        .route("/schemas/validate", post(validate_schema))
        .route(
            "/schemas/{name}",
            get(get_schema).put(update_schema).delete(delete_schema),
        )
        .route("/tables", get(list_tables).post(create_table))
        .route(
            "/tables/{name}",
            get(get_table).put(update_table).delete(delete_table),
        )
        .route("/segments/{table}", get(get_segments))
        .route_layer(middleware::from_fn(require_auth))
        .route("/health", get(|| async { "OK" }))
        .route("/pinot-controller/admin", get(|| async { "GOOD" }))
        .with_state(db)
}

/// Startup message: where to point a client and which token it needs.
pub fn banner(addr: SocketAddr) -> String {
    format!(
        "mock Pinot controller on http://{addr}\n\
         export PINOT_CONTROLLER_URL=http://{addr} PINOT_AUTH_TOKEN={AUTH_TOKEN}\n\
         /health and /pinot-controller/admin need no token"
    )
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_auth(request: Request, next: Next) -> Response {
    let expected = format!("Basic {AUTH_TOKEN}");
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == expected.as_bytes());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }
    next.run(request).await
}

/// A JSON response whose body is sent exactly as given.
fn json_body(body: impl Into<String>) -> Response {
    json_with_status(StatusCode::OK, body)
}

fn json_with_status(status: StatusCode, body: impl Into<String>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body.into(),
    )
        .into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    let body = json!({"code": status.as_u16(), "error": message});
    json_with_status(status, body.to_string())
}

fn status(message: String) -> Response {
    (StatusCode::OK, Json(json!({ "status": message }))).into_response()
}

// --- users ---

#[derive(Deserialize)]
struct ComponentQuery {
    component: Option<String>,
}

async fn get_users() -> Response {
    json_body(USERS)
}

async fn get_user(Path(username): Path<String>, Query(query): Query<ComponentQuery>) -> Response {
    match query.component.as_deref() {
        Some("BROKER") => {
            let key = format!("{username}_BROKER");
            let user = json!({
                "username": username,
                "password": "$2a$10$3KYPvIy4fBM3CWfdKSc54u/BOn1rPlgb7u4P66s4upqAct30C/q6a",
                "component": "BROKER",
                "role": "ADMIN",
                "usernameWithComponent": key,
            });
            Json(BTreeMap::from([(key, user)])).into_response()
        }
        _ => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn create_user(Json(user): Json<Value>) -> Response {
    let username = user["username"].as_str().unwrap_or_default();
    let component = user["component"].as_str().unwrap_or_default();
    if username.is_empty() || component.is_empty() {
        return json_with_status(StatusCode::BAD_REQUEST, NAME_IS_NULL);
    }
    status(format!(
        "User {username}_{component} has been successfully added!"
    ))
}

async fn update_user(
    Path(username): Path<String>,
    Query(query): Query<ComponentQuery>,
    Json(_user): Json<Value>,
) -> Response {
    match query.component.as_deref() {
        Some("BROKER") => status(format!("User config update for {username}_BROKER")),
        _ => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn delete_user(Path(username): Path<String>, Query(query): Query<ComponentQuery>) -> Response {
    match query.component.as_deref() {
        Some("BROKER") => status(format!(
            "User: {username}_BROKER has been successfully deleted"
        )),
        None | Some("") => json_with_status(StatusCode::BAD_REQUEST, NAME_IS_NULL),
        Some(_) => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

// --- instances ---

#[derive(Deserialize)]
struct InstanceBody {
    host: String,
    port: u16,
    #[serde(rename = "type")]
    instance_type: String,
}

async fn get_instances() -> Response {
    json_body(INSTANCES)
}

async fn get_instance(Path(name): Path<String>) -> Response {
    if name == INSTANCE_NAME {
        json_body(INSTANCE)
    } else {
        error(StatusCode::NOT_FOUND, &format!("Instance {name} not found"))
    }
}

/// Instances are named `<Type>_<host>_<port>`, e.g. `Broker_localhost_1234`.
fn instance_name(instance: &InstanceBody) -> String {
    let kind = instance.instance_type.to_ascii_lowercase();
    let mut chars = kind.chars();
    let kind = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };
    format!("{kind}_{}_{}", instance.host, instance.port)
}

async fn create_instance(Json(instance): Json<InstanceBody>) -> Response {
    status(format!("Added instance: {}", instance_name(&instance)))
}

async fn update_instance(Path(name): Path<String>, Json(_instance): Json<InstanceBody>) -> Response {
    status(format!("Updated instance config for instance: {name}"))
}

async fn delete_instance(Path(name): Path<String>) -> Response {
    status(format!("Successfully dropped instance: {name}"))
}

// --- tenants and cluster ---

async fn get_tenants() -> Response {
    json_body(TENANTS)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantBody {
    tenant_role: String,
    tenant_name: String,
}

async fn create_tenant(Json(tenant): Json<TenantBody>) -> Response {
    status(format!(
        "Successfully created {} tenant {}",
        tenant.tenant_role, tenant.tenant_name
    ))
}

#[derive(Deserialize)]
struct TenantTypeQuery {
    #[serde(rename = "type")]
    role: Option<String>,
}

async fn delete_tenant(Path(name): Path<String>, Query(query): Query<TenantTypeQuery>) -> Response {
    match query.role {
        Some(role) => status(format!("Successfully deleted {role} tenant {name}")),
        None => error(StatusCode::BAD_REQUEST, "Tenant type is required"),
    }
}

async fn update_cluster_configs(Json(_configs): Json<BTreeMap<String, String>>) -> Response {
    status("Updated cluster config.".to_string())
}

async fn delete_cluster_config(Path(key): Path<String>) -> Response {
    status(format!("Deleted cluster config: {key}"))
}

// --- schemas ---

fn schema_name(schema: &Value) -> Option<String> {
    schema["schemaName"]
        .as_str()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

async fn list_schemas(State(db): State<Db>) -> Json<Vec<String>> {
    let store = db.read().await;
    let mut names: Vec<String> = store.schemas.keys().cloned().collect();
    names.sort();
    Json(names)
}

async fn validate_schema(Json(schema): Json<Value>) -> Response {
    if schema_name(&schema).is_none() {
        return error(
            StatusCode::BAD_REQUEST,
            "Invalid schema. Reason: schemaName is missing",
        );
    }
    Json(schema).into_response()
}

async fn create_schema(State(db): State<Db>, Json(schema): Json<Value>) -> Response {
    let Some(name) = schema_name(&schema) else {
        return error(
            StatusCode::BAD_REQUEST,
            "Invalid schema. Reason: schemaName is missing",
        );
    };
    let mut store = db.write().await;
    if store.schemas.contains_key(&name) {
        return error(
            StatusCode::CONFLICT,
            &format!("Schema {name} already exists"),
        );
    }
    store.schemas.insert(name.clone(), schema);
    Json(json!({"unrecognizedProperties": {}, "status": format!("{name} successfully added")}))
        .into_response()
}

async fn get_schema(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let store = db.read().await;
    match store.schemas.get(&name) {
        Some(schema) => Json(schema.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, &format!("Schema {name} not found")),
    }
}

async fn update_schema(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(schema): Json<Value>,
) -> Response {
    let mut store = db.write().await;
    match store.schemas.get_mut(&name) {
        Some(stored) => {
            *stored = schema;
            Json(json!({"unrecognizedProperties": {}, "status": format!("{name} successfully added")}))
                .into_response()
        }
        None => error(StatusCode::NOT_FOUND, &format!("Schema {name} not found")),
    }
}

async fn delete_schema(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let mut store = db.write().await;
    match store.schemas.remove(&name) {
        Some(_) => status(format!("Schema {name} deleted")),
        None => error(StatusCode::NOT_FOUND, &format!("Schema {name} not found")),
    }
}

// --- tables ---

fn raw_table_name(name: &str) -> &str {
    name.strip_suffix("_OFFLINE")
        .or_else(|| name.strip_suffix("_REALTIME"))
        .unwrap_or(name)
}

async fn list_tables(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let mut names: Vec<&String> = store.tables.keys().collect();
    names.sort();
    Json(json!({ "tables": names }))
}

async fn create_table(State(db): State<Db>, Json(mut table): Json<Value>) -> Response {
    let (Some(name), Some(table_type)) = (
        table["tableName"].as_str().map(str::to_string),
        table["tableType"].as_str().map(str::to_string),
    ) else {
        return error(
            StatusCode::BAD_REQUEST,
            "Invalid table config: tableName and tableType are required",
        );
    };
    let raw = raw_table_name(&name).to_string();
    let name_with_type = format!("{raw}_{table_type}");

    let mut store = db.write().await;
    if !store.schemas.contains_key(&raw) {
        return error(
            StatusCode::BAD_REQUEST,
            &format!("Invalid table config for table {name_with_type}: Schema {raw} not found"),
        );
    }
    let types = store.tables.entry(raw).or_default();
    if types.contains_key(&table_type) {
        return error(
            StatusCode::CONFLICT,
            &format!("Table {name_with_type} already exists"),
        );
    }
    table["tableName"] = Value::String(name_with_type.clone());
    types.insert(table_type, table);
    Json(json!({"unrecognizedProperties": {}, "status": format!("Table {name_with_type} successfully added")}))
        .into_response()
}

async fn get_table(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let store = db.read().await;
    match store.tables.get(raw_table_name(&name)) {
        Some(types) => Json(json!(types)).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            &format!("Table {name} does not exist"),
        ),
    }
}

async fn update_table(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(mut table): Json<Value>,
) -> Response {
    let Some(table_type) = table["tableType"].as_str().map(str::to_string) else {
        return error(
            StatusCode::BAD_REQUEST,
            "Invalid table config: tableType is required",
        );
    };
    let raw = raw_table_name(&name).to_string();
    let mut store = db.write().await;
    match store
        .tables
        .get_mut(&raw)
        .and_then(|types| types.get_mut(&table_type))
    {
        Some(stored) => {
            let name_with_type = format!("{raw}_{table_type}");
            table["tableName"] = Value::String(name_with_type.clone());
            *stored = table;
            status(format!(
                "Table config updated for {name_with_type}"
            ))
        }
        None => error(
            StatusCode::NOT_FOUND,
            &format!("Table {raw}_{table_type} does not exist"),
        ),
    }
}

async fn delete_table(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let mut store = db.write().await;
    let raw = raw_table_name(&name).to_string();
    match store.tables.remove(&raw) {
        Some(types) => {
            let deleted: Vec<String> = types.keys().map(|t| format!("{raw}_{t}")).collect();
            status(format!("Tables: {deleted:?} deleted"))
        }
        None => error(
            StatusCode::NOT_FOUND,
            &format!("Table {name} does not exist"),
        ),
    }
}

// --- segments ---

/// Tables created here never receive data, so every type lists no segments.
async fn get_segments(State(db): State<Db>, Path(table): Path<String>) -> Response {
    let store = db.read().await;
    match store.tables.get(raw_table_name(&table)) {
        Some(types) => {
            let grouped: Vec<BTreeMap<&String, Vec<String>>> = types
                .keys()
                .map(|table_type| BTreeMap::from([(table_type, Vec::new())]))
                .collect();
            Json(grouped).into_response()
        }
        None => error(
            StatusCode::NOT_FOUND,
            &format!("Table {table} does not exist"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_bodies_are_valid_json() {
        for body in [
            USERS,
            INSTANCES,
            INSTANCE,
            CLUSTER_INFO,
            CLUSTER_CONFIGS,
            TENANTS,
            NAME_IS_NULL,
        ] {
            assert!(serde_json::from_str::<Value>(body).is_ok(), "{body}");
        }
    }

    #[test]
    fn banner_names_url_and_token() {
        let banner = banner("127.0.0.1:9000".parse().unwrap());
        assert!(banner.contains("PINOT_CONTROLLER_URL=http://127.0.0.1:9000"));
        assert!(banner.contains(&format!("PINOT_AUTH_TOKEN={AUTH_TOKEN}")));
    }

    #[test]
    fn instance_names_follow_controller_convention() {
        let instance = InstanceBody {
            host: "localhost".to_string(),
            port: 1234,
            instance_type: "BROKER".to_string(),
        };
        assert_eq!(instance_name(&instance), "Broker_localhost_1234");
    }

    #[test]
    fn raw_table_name_strips_type_suffix() {
        assert_eq!(raw_table_name("airlineStats_OFFLINE"), "airlineStats");
        assert_eq!(raw_table_name("events_REALTIME"), "events");
        assert_eq!(raw_table_name("airlineStats"), "airlineStats");
    }
}
