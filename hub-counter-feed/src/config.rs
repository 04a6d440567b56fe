//! Client configuration: credentials and endpoints.
//!
//! Values can be built directly or loaded from `HUB_COUNTER_*` environment
//! variables.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::feed_api::StatusPolicy;

/// Default login endpoint.
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://api.amazon.com/auth/o2/token";

/// Default OAuth grant type.
pub const DEFAULT_GRANT_TYPE: &str = "client_credentials";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const CLIENT_ID_VAR: &str = "HUB_COUNTER_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "HUB_COUNTER_CLIENT_SECRET";
pub const SCOPE_VAR: &str = "HUB_COUNTER_SCOPE";
pub const GRANT_TYPE_VAR: &str = "HUB_COUNTER_GRANT_TYPE";
pub const API_ENDPOINT_VAR: &str = "HUB_COUNTER_API_ENDPOINT";
pub const AUTH_ENDPOINT_VAR: &str = "HUB_COUNTER_AUTH_ENDPOINT";
pub const TIMEOUT_SECS_VAR: &str = "HUB_COUNTER_TIMEOUT_SECS";
pub const STRICT_STATUS_VAR: &str = "HUB_COUNTER_STRICT_STATUS";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },

    /// An endpoint URL is empty
    #[error("{0} cannot be empty")]
    EmptyEndpoint(&'static str),
}

/// OAuth client credentials.
///
/// The secret is only exposed when building the login request; `Debug`
/// output redacts it.
#[derive(Debug)]
pub struct Credentials {
    client_id: String,
    client_secret: SecretString,
    grant_type: String,
    scope: String,
}

impl Credentials {
    /// Create credentials with the default grant type.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            grant_type: DEFAULT_GRANT_TYPE.to_string(),
            scope: scope.into(),
        }
    }

    /// Set a non-default grant type.
    pub fn with_grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = grant_type.into();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn grant_type(&self) -> &str {
        &self.grant_type
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Login payload for the auth endpoint.
    pub(crate) fn login_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
            grant_type: &self.grant_type,
            scope: &self.scope,
        }
    }
}

/// Body of the login request. Deliberately not `Debug`.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
    scope: &'a str,
}

/// Configuration for the feed client.
#[derive(Debug)]
pub struct FeedApiConfig {
    pub credentials: Credentials,
    /// Base URL of the feed API
    pub api_endpoint: String,
    /// Login URL (defaults to the production auth endpoint)
    pub auth_endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Handling of unexpected HTTP statuses
    pub status_policy: StatusPolicy,
}

impl FeedApiConfig {
    /// Create a new config for the given API endpoint.
    pub fn new(credentials: Credentials, api_endpoint: impl Into<String>) -> Self {
        Self {
            credentials,
            api_endpoint: api_endpoint.into(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            status_policy: StatusPolicy::default(),
        }
    }

    /// Set a custom auth endpoint (for testing).
    pub fn with_auth_endpoint(mut self, url: impl Into<String>) -> Self {
        self.auth_endpoint = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Load the config from `HUB_COUNTER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the config using `lookup` to read each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let mut credentials = Credentials::new(
            required(CLIENT_ID_VAR)?,
            required(CLIENT_SECRET_VAR)?,
            required(SCOPE_VAR)?,
        );
        if let Some(grant_type) = lookup(GRANT_TYPE_VAR) {
            credentials = credentials.with_grant_type(grant_type);
        }

        let mut config = Self::new(credentials, required(API_ENDPOINT_VAR)?);

        if let Some(url) = lookup(AUTH_ENDPOINT_VAR) {
            config = config.with_auth_endpoint(url);
        }

        if let Some(secs) = lookup(TIMEOUT_SECS_VAR) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::Invalid {
                    name: TIMEOUT_SECS_VAR,
                    message: e.to_string(),
                })?;
            config = config.with_timeout(secs);
        }

        if let Some(strict) = lookup(STRICT_STATUS_VAR) {
            let policy = match strict.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => StatusPolicy::Strict,
                "" | "0" | "false" | "no" => StatusPolicy::Lenient,
                other => {
                    return Err(ConfigError::Invalid {
                        name: STRICT_STATUS_VAR,
                        message: format!("expected true or false, got {other:?}"),
                    });
                }
            };
            config = config.with_status_policy(policy);
        }

        Ok(config)
    }
}
