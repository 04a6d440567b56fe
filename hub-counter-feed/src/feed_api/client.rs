//! Feed API client.
//!
//! Provides async methods for submitting feeds and querying feeds and their
//! documents. Every call builds its own URL and performs one round trip;
//! tokens are never cached.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, Credentials, FeedApiConfig};
use crate::entities::{AccessPointsFeedRequest, Feed, FeedType, FeedsResponse, OutputDocument};

use super::endpoints;
use super::error::FeedApiError;
use super::transport::Transport;

const AUTH_TOKEN_PREFIX: &str = "Bearer ";

/// Number of body characters kept in decode errors.
const DECODE_BODY_LIMIT: usize = 500;

/// Bearer token returned by the auth endpoint.
///
/// Opaque and without local expiry tracking. `Debug` output is redacted.
#[derive(Clone)]
pub struct AccessToken(Arc<SecretString>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(Arc::new(SecretString::from(token.into())))
    }

    /// Returns the raw token.
    pub fn secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Authorization header value for this token.
    fn bearer(&self) -> String {
        format!("{AUTH_TOKEN_PREFIX}{}", self.secret())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Auth endpoint response; only the token is read.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Feed creation response.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedFeed {
    feed_id: String,
}

/// Feed API client.
///
/// Holds only configuration and the HTTP transport, so it is cheap to clone
/// and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct FeedClient {
    credentials: Arc<Credentials>,
    api_endpoint: String,
    auth_endpoint: String,
    transport: Transport,
}

impl FeedClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FeedApiConfig) -> Result<Self, FeedApiError> {
        if config.api_endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint("api endpoint").into());
        }
        if config.auth_endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint("auth endpoint").into());
        }

        let transport = Transport::new(
            Duration::from_secs(config.timeout_secs),
            config.status_policy,
        )?;

        Ok(Self {
            credentials: Arc::new(config.credentials),
            api_endpoint: config.api_endpoint,
            auth_endpoint: config.auth_endpoint,
            transport,
        })
    }

    /// Base URL of the feed API.
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn auth_endpoint(&self) -> &str {
        &self.auth_endpoint
    }

    /// Log in with the configured credentials and return a fresh token.
    ///
    /// Call this as often as needed; the client does not track expiry.
    pub async fn get_access_token(&self) -> Result<AccessToken, FeedApiError> {
        let body = serde_json::to_string(&self.credentials.login_request())
            .map_err(FeedApiError::Encode)?;

        debug!("logging in");

        let response = self
            .transport
            .post_json(&self.auth_endpoint, body, None)
            .await?;

        // The body may hold the token, so it is not kept in the error
        let token: TokenResponse =
            serde_json::from_str(&response).map_err(|e| FeedApiError::Decode {
                message: e.to_string(),
                body: None,
            })?;

        Ok(AccessToken::new(token.access_token))
    }

    /// Get one page of the feeds this client has submitted.
    ///
    /// # Arguments
    ///
    /// * `next_offset` - Cursor from the previous page
    /// * `page_size` - Results per page (server default 50, max 100)
    /// * `token` - Token from [`FeedClient::get_access_token`]
    pub async fn get_feeds(
        &self,
        next_offset: Option<&str>,
        page_size: Option<u32>,
        token: &AccessToken,
    ) -> Result<FeedsResponse, FeedApiError> {
        let url = endpoints::feeds(&self.api_endpoint, next_offset, page_size);

        debug!(?next_offset, ?page_size, "getting client feeds");

        let response = self.transport.get_json(&url, Some(&token.bearer())).await?;
        decode(&response)
    }

    /// Get every feed, following `nextOffset` page by page.
    ///
    /// Stops when the server sends no cursor, an empty one, or any cursor
    /// already followed, so a cycle of cursors ends after one lap.
    pub async fn get_all_feeds(
        &self,
        page_size: Option<u32>,
        token: &AccessToken,
    ) -> Result<Vec<Feed>, FeedApiError> {
        let mut feeds = Vec::new();
        let mut seen = HashSet::new();
        let mut next_offset: Option<String> = None;

        loop {
            let page = self
                .get_feeds(next_offset.as_deref(), page_size, token)
                .await?;
            feeds.extend(page.feeds);

            match page.next_offset {
                Some(offset) if !offset.is_empty() && seen.insert(offset.clone()) => {
                    next_offset = Some(offset);
                }
                Some(offset) if !offset.is_empty() => {
                    warn!(next_offset = %offset, "feed cursor repeated, stopping");
                    break;
                }
                _ => break,
            }
        }

        Ok(feeds)
    }

    /// Get a feed by id.
    pub async fn get_feed_by_id(
        &self,
        feed_id: &str,
        token: &AccessToken,
    ) -> Result<Feed, FeedApiError> {
        let url = endpoints::feed_by_id(&self.api_endpoint, feed_id);

        debug!(feed_id, "getting client feed by id");

        let response = self.transport.get_json(&url, Some(&token.bearer())).await?;
        decode(&response)
    }

    /// Get a feed's output document (per-access-point outcome).
    ///
    /// Input and output documents share one URL and carry no discriminator;
    /// the caller must know `document_id` names an output document. See
    /// [`FeedClient::get_input_document`].
    pub async fn get_output_document(
        &self,
        feed_id: &str,
        document_id: &str,
        token: &AccessToken,
    ) -> Result<OutputDocument, FeedApiError> {
        let url = endpoints::document(&self.api_endpoint, feed_id, document_id);

        debug!(feed_id, document_id, "getting feed output document");

        let response = self.transport.get_json(&url, Some(&token.bearer())).await?;
        decode(&response)
    }

    /// Get a feed's input document (the submitted access points).
    ///
    /// Same URL as [`FeedClient::get_output_document`]; the caller must know
    /// `document_id` names an input document.
    pub async fn get_input_document(
        &self,
        feed_id: &str,
        document_id: &str,
        token: &AccessToken,
    ) -> Result<AccessPointsFeedRequest, FeedApiError> {
        let url = endpoints::document(&self.api_endpoint, feed_id, document_id);

        debug!(feed_id, document_id, "getting feed input document");

        let response = self.transport.get_json(&url, Some(&token.bearer())).await?;
        decode(&response)
    }

    /// Submit access points as a new feed and return its id.
    ///
    /// Each call creates a distinct feed.
    pub async fn post_feed(
        &self,
        request: &AccessPointsFeedRequest,
        feed_type: FeedType,
        token: &AccessToken,
    ) -> Result<String, FeedApiError> {
        let url = endpoints::post_feed(&self.api_endpoint, feed_type);
        let body = request.to_json().map_err(FeedApiError::Encode)?;

        debug!(%feed_type, access_points = request.len(), "creating feed");

        let response = self
            .transport
            .post_json(&url, body, Some(&token.bearer()))
            .await?;
        let created: CreatedFeed = decode(&response)?;

        info!(feed_id = %created.feed_id, "created feed");

        Ok(created.feed_id)
    }
}

/// Decode a response body, keeping a prefix of it for diagnostics.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FeedApiError> {
    serde_json::from_str(body).map_err(|e| FeedApiError::Decode {
        message: e.to_string(),
        body: Some(body.chars().take(DECODE_BODY_LIMIT).collect()),
    })
}
