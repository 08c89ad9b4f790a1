use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    pub cluster_name: String,
}

/// Cluster-wide configuration, a flat map of config key to string value.
///
/// Read from `GET /cluster/configs` and written with `POST /cluster/configs`;
/// keys missing from an update are left unchanged by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterConfigs(pub BTreeMap<String, String>);

impl ClusterConfigs {
    pub const ALLOW_PARTICIPANT_AUTO_JOIN: &'static str = "allowParticipantAutoJoin";
    pub const ENABLE_CASE_INSENSITIVE: &'static str = "enable.case.insensitive";
    pub const DEFAULT_HYPERLOGLOG_LOG2M: &'static str = "default.hyperloglog.log2m";
    pub const BROKER_ENABLE_QUERY_LIMIT_OVERRIDE: &'static str =
        "pinot.broker.enable.query.limit.override";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn allow_participant_auto_join(&self) -> Option<&str> {
        self.get(Self::ALLOW_PARTICIPANT_AUTO_JOIN)
    }

    pub fn enable_case_insensitive(&self) -> Option<&str> {
        self.get(Self::ENABLE_CASE_INSENSITIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_data() {
        let raw = r#"{"allowParticipantAutoJoin": "true","enable.case.insensitive": "true","pinot.broker.enable.query.limit.override": "false","default.hyperloglog.log2m": "8"}"#;
        let configs: ClusterConfigs = serde_json::from_str(raw).unwrap();
        assert_eq!(configs.allow_participant_auto_join(), Some("true"));
        assert_eq!(configs.get(ClusterConfigs::DEFAULT_HYPERLOGLOG_LOG2M), Some("8"));
        assert_eq!(configs.0.len(), 4);
    }

    #[test]
    fn update_body_is_a_flat_object() {
        let update = ClusterConfigs::new().with(ClusterConfigs::ALLOW_PARTICIPANT_AUTO_JOIN, "false");
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"allowParticipantAutoJoin":"false"}"#
        );
    }
}
