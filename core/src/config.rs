//! Connection settings for `PinotClient`.

use std::time::Duration;

/// Controller URL used when nothing else is configured.
pub const DEFAULT_CONTROLLER_URL: &str = "http://localhost:9000";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variables consulted by `ClientConfig::from_env`, in order.
pub const CONTROLLER_URL_ENV_VARS: [&str; 2] = ["PINOT_URL", "PINOT_CONTROLLER_URL"];
pub const AUTH_TOKEN_ENV_VARS: [&str; 2] = ["PINOT_AUTH", "PINOT_AUTH_TOKEN"];

/// Settings a `PinotClient` is built from.
///
/// The token is sent verbatim as `Authorization: Basic <token>`; it is
/// typically the base64 encoding of `user:password`, but the client never
/// encodes or inspects it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the controller, e.g. `http://localhost:9000`.
    pub controller_url: String,
    /// Basic-auth token. `None` sends unauthenticated requests.
    pub auth_token: Option<String>,
    /// Transport-level timeout for a whole request. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Subscriber that receives the client's events. `None` uses the
    /// process-wide default subscriber.
    pub logger: Option<tracing::Dispatch>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            controller_url: DEFAULT_CONTROLLER_URL.to_string(),
            auth_token: None,
            timeout: Some(DEFAULT_TIMEOUT),
            logger: None,
        }
    }
}

impl ClientConfig {
    pub fn new(controller_url: impl Into<String>) -> Self {
        Self::default().with_controller_url(controller_url)
    }

    /// Defaults overridden by `PINOT_URL`/`PINOT_CONTROLLER_URL` and
    /// `PINOT_AUTH`/`PINOT_AUTH_TOKEN`.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .find(|value| !value.is_empty())
        };
        let mut config = Self::default();
        if let Some(url) = first_set(&CONTROLLER_URL_ENV_VARS) {
            config.controller_url = url;
        }
        config.auth_token = first_set(&AUTH_TOKEN_ENV_VARS);
        config
    }

    #[must_use]
    pub fn with_controller_url(mut self, controller_url: impl Into<String>) -> Self {
        self.controller_url = controller_url.into();
        self
    }

    /// Set the Basic-auth token. An empty token means no authentication.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.auth_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_logger(mut self, logger: tracing::Dispatch) -> Self {
        self.logger = Some(logger);
        self
    }
}
