//! User operations.
//!
//! The controller identifies a user by name and component together; the
//! component travels as the `component` query parameter.

use std::collections::BTreeMap;

use crate::client::{segment, PinotClient};
use crate::error::{PinotError, Result};
use crate::http::HttpMethod;
use crate::model::{user_key, StatusResponse, User, UsersResponse};

impl PinotClient {
    /// All users, keyed by `<username>_<COMPONENT>`.
    pub fn get_users(&self) -> Result<UsersResponse> {
        self.get("/users")
    }

    /// # Errors
    /// Returns `InvalidResponse` if the controller's answer has no entry for
    /// `<username>_<component>`.
    pub fn get_user(&self, username: &str, component: &str) -> Result<User> {
        let mut users: BTreeMap<String, User> = self.execute(
            HttpMethod::Get,
            &user_path(username),
            &[("component", component)],
            None,
        )?;
        let key = user_key(username, component);
        users
            .remove(&key)
            .ok_or_else(|| PinotError::InvalidResponse(format!("no user entry for {key}")))
    }

    pub fn create_user(&self, user: &User) -> Result<StatusResponse> {
        self.post("/users", user)
    }

    /// Replace a user. Set `password_changed` when `user.password` holds a
    /// new plain-text password rather than the stored hash.
    pub fn update_user(
        &self,
        username: &str,
        component: &str,
        password_changed: bool,
        user: &User,
    ) -> Result<StatusResponse> {
        let body = crate::client::to_json(user)?;
        let password_changed = if password_changed { "true" } else { "false" };
        self.execute(
            HttpMethod::Put,
            &user_path(username),
            &[("component", component), ("passwordChanged", password_changed)],
            Some(body),
        )
    }

    /// Delete a user. An empty `component` is not sent, and the controller
    /// rejects the call.
    pub fn delete_user(&self, username: &str, component: &str) -> Result<StatusResponse> {
        let mut query = Vec::new();
        if !component.is_empty() {
            query.push(("component", component));
        }
        self.execute(HttpMethod::Delete, &user_path(username), &query, None)
    }
}

fn user_path(username: &str) -> String {
    format!("/users/{}", segment(username))
}
