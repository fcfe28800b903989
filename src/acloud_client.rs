//! Avisi Cloud HTTP client.
//!
//! Unique responsibility: execute single requests against the platform API and
//! classify their outcome.
//!
//! API conventions:
//! - Base URL: <https://api.avisi.cloud> (configurable)
//! - Header: Authorization: Token <personal access token>
//! - Non-2xx responses carry a JSON body `{"message": "..."}`
//!
//! Pagination and fan-out are built on top of this client in
//! `acloud_paging` and `acloud_fanout`.

use std::{fmt, sync::Arc, time::Duration};

use reqwest::{
    Method, RequestBuilder, StatusCode,
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{acloud_config::AcloudClientConfig, acloud_error::AcloudError};

/// Hook invoked before every request to attach credentials.
pub trait Authenticator: Send + Sync {
    /// Decorate an outgoing request.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials cannot be attached.
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, AcloudError>;
}

/// Authenticates with a personal access token using the `Token` scheme.
pub struct PersonalAccessTokenAuthenticator {
    token: String,
}

impl PersonalAccessTokenAuthenticator {
    /// Create an authenticator for the given token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for PersonalAccessTokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonalAccessTokenAuthenticator")
            .field("token", &"<omitted>")
            .finish()
    }
}

impl Authenticator for PersonalAccessTokenAuthenticator {
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, AcloudError> {
        Ok(request.header(header::AUTHORIZATION, format!("Token {}", self.token)))
    }
}

/// Client for the Avisi Cloud API.
pub struct AcloudClient {
    cfg: AcloudClientConfig,
    http: reqwest::Client,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl AcloudClient {
    /// Create a new client. A personal access token in the configuration is
    /// installed as the authenticator.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(cfg: AcloudClientConfig) -> Result<Self, AcloudError> {
        let authenticator = cfg
            .personal_access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| Arc::new(PersonalAccessTokenAuthenticator::new(t)) as Arc<dyn Authenticator>);

        Self::build(cfg, authenticator)
    }

    /// Create a new client with a custom authentication hook.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_authenticator(
        cfg: AcloudClientConfig,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self, AcloudError> {
        Self::build(cfg, Some(authenticator))
    }

    fn build(
        cfg: AcloudClientConfig,
        authenticator: Option<Arc<dyn Authenticator>>,
    ) -> Result<Self, AcloudError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(cfg.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            cfg,
            http,
            authenticator,
        })
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub const fn config(&self) -> &AcloudClientConfig {
        &self.cfg
    }

    /// Execute a single request against `{api_url}{path}`.
    ///
    /// The response is returned unclassified; see [`classify_response`].
    /// Transport failures and transient statuses are retried only when
    /// `retry_max` is non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the authenticator fails or the request cannot be sent.
    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, AcloudError> {
        let url = self.cfg.url_for(path);
        let mut attempt: u32 = 0;
        let mut backoff = Duration::from_millis(self.cfg.retry_backoff_ms);

        loop {
            attempt = attempt.saturating_add(1);

            let mut request = self.http.request(method.clone(), &url);
            if let Some(body) = body {
                request = request.json(body);
            }
            if let Some(authenticator) = &self.authenticator {
                request = authenticator.authenticate(request)?;
            }

            debug!(%method, %url, attempt, "sending request");

            match request.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if attempt <= self.cfg.retry_max && is_retryable_status(status) {
                        warn!(%url, %status, attempt, "retrying after transient status");
                        tokio::time::sleep(backoff).await;
                        backoff = next_backoff(backoff);
                        continue;
                    }
                    return Ok(resp);
                }
                Err(e) => {
                    if attempt <= self.cfg.retry_max && is_retryable_reqwest(&e) {
                        warn!(%url, error = %e, attempt, "retrying after transport error");
                        tokio::time::sleep(backoff).await;
                        backoff = next_backoff(backoff);
                        continue;
                    }
                    return Err(AcloudError::Http(e));
                }
            }
        }
    }

    /// GET `path`, classify the response and return the body text.
    ///
    /// # Errors
    ///
    /// Returns a transport error or a classified API error.
    pub async fn get_text(&self, path: &str) -> Result<String, AcloudError> {
        let resp = self.execute::<()>(Method::GET, path, None).await?;
        read_classified(resp).await
    }

    /// GET `path` and decode the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns a transport error, a classified API error, or a decode error.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AcloudError> {
        let body = self.get_text(path).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Error payload returned by the API for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: String,
}

/// Convert a response status and body into a uniform error.
///
/// Non-2xx statuses produce [`AcloudError::Api`] carrying the payload's
/// `message`, or the raw body when no message can be decoded.
/// A body that decodes as JSON but has no non-empty `message` is also
/// reported raw, rather than as an empty message.
///
/// # Errors
///
/// Returns [`AcloudError::Api`] for any non-success status.
pub fn classify_response(status: StatusCode, body: &str) -> Result<(), AcloudError> {
    if status.is_success() {
        return Ok(());
    }

    let message = serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|p| p.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    Err(AcloudError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Read the body of a response and classify it.
///
/// # Errors
///
/// Returns a transport error if the body cannot be read, or a classified API error.
pub async fn read_classified(resp: reqwest::Response) -> Result<String, AcloudError> {
    let status = resp.status();
    let body = resp.text().await?;
    classify_response(status, &body)?;
    Ok(body)
}

#[inline]
const fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status.as_u16(),
        408 | 409 | 425 | 429 | 500 | 502 | 503 | 504
    )
}

#[inline]
fn is_retryable_reqwest(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_request()
}

#[inline]
fn next_backoff(current: Duration) -> Duration {
    let next = current.saturating_mul(2);
    next.min(Duration::from_secs(10))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_status_classifies_ok() {
        assert!(classify_response(StatusCode::OK, r#"{"message":"ok"}"#).is_ok());
        assert!(classify_response(StatusCode::NO_CONTENT, "").is_ok());
    }

    #[test]
    fn error_payload_message_is_used() {
        let err = classify_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"boom"}"#)
            .unwrap_err();
        match err {
            AcloudError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn undecodable_body_falls_back_to_raw_text() {
        let err = classify_response(StatusCode::BAD_GATEWAY, "upstream unavailable").unwrap_err();
        assert_eq!(err.to_string(), "502: upstream unavailable");

        let err = classify_response(StatusCode::NOT_FOUND, r#"{"error":"nope"}"#).unwrap_err();
        assert_eq!(err.to_string(), r#"404: {"error":"nope"}"#);
    }

    #[test]
    fn json_without_message_is_reported_raw() {
        let err = classify_response(StatusCode::CONFLICT, r#"{"message":""}"#).unwrap_err();
        assert_eq!(err.to_string(), r#"409: {"message":""}"#);
    }

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(next_backoff(Duration::from_millis(250)), Duration::from_millis(500));
        assert_eq!(next_backoff(Duration::from_secs(8)), Duration::from_secs(10));
    }

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
    }

    #[test]
    fn token_is_not_debug_printed() {
        let auth = PersonalAccessTokenAuthenticator::new("secret-token");
        assert!(!format!("{auth:?}").contains("secret-token"));
    }
}
