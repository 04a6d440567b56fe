//! JSON-over-HTTP transport.
//!
//! Sends GET/POST requests with JSON headers and returns the raw response
//! text. Decoding is left to the caller.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use super::error::TransportError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Number of body characters kept in status errors.
const ERROR_BODY_LIMIT: usize = 500;

/// How responses outside the expected status set are treated.
///
/// POST expects 200 or 201; GET expects 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Error statuses (4xx/5xx) fail. Any other unexpected status is logged
    /// and its body returned as-is, so an error document on e.g. a 202
    /// surfaces later as a decode failure.
    #[default]
    Lenient,
    /// Every unexpected status fails.
    Strict,
}

/// HTTP transport for the feed API.
///
/// Holds no per-call state; each request is self-contained.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    status_policy: StatusPolicy,
}

impl Transport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration, status_policy: StatusPolicy) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            status_policy,
        })
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// POST a JSON body and return the response text.
    ///
    /// `authorization` is the full header value (e.g. "Bearer ..."); the
    /// header is omitted when `None`.
    pub async fn post_json(
        &self,
        url: &str,
        body: String,
        authorization: Option<&str>,
    ) -> Result<String, TransportError> {
        debug!(url, "sending HTTP POST request");

        let response = self
            .http
            .post(url)
            .headers(json_headers(authorization)?)
            .body(body)
            .send()
            .await?;

        self.read_body("POST", url, response, &[StatusCode::OK, StatusCode::CREATED])
            .await
    }

    /// GET a URL and return the response text.
    pub async fn get_json(
        &self,
        url: &str,
        authorization: Option<&str>,
    ) -> Result<String, TransportError> {
        debug!(url, "sending HTTP GET request");

        let response = self
            .http
            .get(url)
            .headers(json_headers(authorization)?)
            .send()
            .await?;

        self.read_body("GET", url, response, &[StatusCode::OK]).await
    }

    async fn read_body(
        &self,
        method: &'static str,
        url: &str,
        response: reqwest::Response,
        expected: &[StatusCode],
    ) -> Result<String, TransportError> {
        let status = response.status();

        if expected.contains(&status) {
            return Ok(response.text().await?);
        }

        let is_error = status.is_client_error() || status.is_server_error();
        if is_error || self.status_policy == StatusPolicy::Strict {
            warn!(method, url, status = status.as_u16(), "bad HTTP status");
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(method, url, error = %e, "failed to read error response body");
                String::new()
            });
            return Err(TransportError::Status {
                method,
                url: url.to_string(),
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        warn!(
            method,
            url,
            status = status.as_u16(),
            "unexpected HTTP status, returning body as-is"
        );
        Ok(response.text().await?)
    }
}

fn json_headers(authorization: Option<&str>) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

    if let Some(value) = authorization {
        let mut value = HeaderValue::from_str(value)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
