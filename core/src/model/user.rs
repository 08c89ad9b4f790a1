use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A controller user. Usernames are unique per component, so the controller
/// keys users as `<username>_<COMPONENT>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// `BROKER`, `CONTROLLER` or `SERVER`.
    pub component: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_with_component: Option<String>,
}

impl User {
    pub fn key(&self) -> String {
        user_key(&self.username, &self.component)
    }
}

pub(crate) fn user_key(username: &str, component: &str) -> String {
    format!("{username}_{component}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: BTreeMap<String, User>,
}
