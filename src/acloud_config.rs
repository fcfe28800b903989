//! Client configuration.
//!
//! All configuration can be loaded from environment variables (and a local
//! `.env` file), so the client is usable without code changes.

use std::env;

use crate::acloud_error::AcloudError;

/// Public API used when `ACLOUD_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.avisi.cloud";

/// User agent sent with every request. A configured agent is prefixed to it.
pub const DEFAULT_USER_AGENT: &str = "acloud-client-rs";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Configuration for the Avisi Cloud client.
#[derive(Clone, Debug)]
pub struct AcloudClientConfig {
    /// Base URL of the public API, without trailing slash.
    /// Env: `ACLOUD_URL` (default: "<https://api.avisi.cloud>")
    pub api_url: String,

    /// Personal access token sent as `Authorization: Token <pat>`.
    /// Env: `ACLOUD_PAT` (required by `from_env`)
    pub personal_access_token: Option<String>,

    /// Effective user agent.
    /// Env: `ACLOUD_USER_AGENT` (optional, becomes "<agent> (acloud-client-rs)")
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    /// Env: `ACLOUD_HTTP_TIMEOUT_MS` (default: 15000)
    pub timeout_ms: u64,

    /// Maximum number of transport retries performed by the request executor.
    /// Env: `ACLOUD_HTTP_RETRY_MAX` (default: 0)
    pub retry_max: u32,

    /// Initial backoff between executor retries in milliseconds.
    /// Env: `ACLOUD_HTTP_RETRY_BACKOFF_MS` (default: 250)
    pub retry_backoff_ms: u64,
}

impl AcloudClientConfig {
    /// Build a configuration for the given API URL with default settings and no token.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_url(&api_url.into()),
            personal_access_token: None,
            user_agent: effective_user_agent(None),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_max: 0,
            retry_backoff_ms: 250,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// In local dev, this will also attempt to load `.env` from the current directory.
    /// If `.env` is missing, it does not fail.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, AcloudError> {
        let _ = dotenvy::dotenv();

        let api_url = env::var("ACLOUD_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_url: normalize_url(&api_url),
            personal_access_token: Some(must_env("ACLOUD_PAT")?),
            user_agent: effective_user_agent(env::var("ACLOUD_USER_AGENT").ok().as_deref()),
            timeout_ms: parse_u64_env("ACLOUD_HTTP_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
            retry_max: parse_u32_env("ACLOUD_HTTP_RETRY_MAX", 0)?,
            retry_backoff_ms: parse_u64_env("ACLOUD_HTTP_RETRY_BACKOFF_MS", 250)?,
        })
    }

    /// Set the personal access token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.personal_access_token = Some(token.into());
        self
    }

    /// Set a custom user agent; the library agent is appended to it.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = effective_user_agent(Some(user_agent));
        self
    }

    /// Build an absolute URL for an API path such as `/api/v1/memberships`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Combine a caller-supplied agent with the library agent.
#[must_use]
pub fn effective_user_agent(custom: Option<&str>) -> String {
    match custom.map(str::trim) {
        Some(agent) if !agent.is_empty() => format!("{agent} ({DEFAULT_USER_AGENT})"),
        _ => DEFAULT_USER_AGENT.to_string(),
    }
}

fn normalize_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn must_env(key: &'static str) -> Result<String, AcloudError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(AcloudError::MissingEnv(key))
}

fn parse_u64_env(key: &'static str, default: u64) -> Result<u64, AcloudError> {
    env::var(key).map_or_else(
        |_| Ok(default),
        |v| {
            v.trim().parse::<u64>().map_err(|_| AcloudError::InvalidEnv {
                key,
                value: v,
                reason: "expected an unsigned integer",
            })
        },
    )
}

fn parse_u32_env(key: &'static str, default: u32) -> Result<u32, AcloudError> {
    env::var(key).map_or_else(
        |_| Ok(default),
        |v| {
            v.trim().parse::<u32>().map_err(|_| AcloudError::InvalidEnv {
                key,
                value: v,
                reason: "expected an unsigned integer",
            })
        },
    )
}
