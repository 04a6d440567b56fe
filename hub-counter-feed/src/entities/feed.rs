//! Server-side feed shapes and the feed type.
//!
//! These types map directly to the feed API JSON responses. They use
//! `Option` liberally because the server omits fields rather than sending
//! null values, and keep unrecognised fields in `extra` so nothing the
//! server reports is lost.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of access points a feed carries.
///
/// The wire codes are fixed by the API and differ from the variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedType {
    /// Locations of a third-party managed network.
    #[serde(rename = "3P")]
    ThirdPartyFeed,
    /// Counter pick-up locations.
    #[serde(rename = "STORE_FEED")]
    StoreFeed,
}

impl FeedType {
    /// Returns the code used in the `feedType` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            FeedType::ThirdPartyFeed => "3P",
            FeedType::StoreFeed => "STORE_FEED",
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown feed type code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feed type {0:?} (expected 3P or STORE_FEED)")]
pub struct UnknownFeedType(String);

impl FromStr for FeedType {
    type Err = UnknownFeedType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3P" => Ok(FeedType::ThirdPartyFeed),
            "STORE_FEED" => Ok(FeedType::StoreFeed),
            other => Err(UnknownFeedType(other.to_string())),
        }
    }
}

/// A submitted feed and its processing status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    /// Server-assigned feed id.
    pub feed_id: String,

    /// Processing status, e.g. "IN_PROGRESS", "DONE".
    pub status: String,

    /// Wire code of the feed type ("3P" or "STORE_FEED").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,

    /// Document holding the submitted access points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_document_id: Option<String>,

    /// Document holding the per-access-point outcome, once processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_document_id: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Feed {
    /// The feed type, if the server sent a recognised code.
    pub fn feed_type(&self) -> Option<FeedType> {
        self.feed_type.as_deref().and_then(|code| code.parse().ok())
    }
}

/// One page of the client's feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedsResponse {
    #[serde(default)]
    pub feeds: Vec<Feed>,

    /// Cursor for the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<String>,
}

/// Error reported for one access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Processing outcome of one access point in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPointOutcome {
    pub access_point_id: String,
    pub status: String,
    #[serde(default)]
    pub errors: Vec<OutcomeError>,
}

impl AccessPointOutcome {
    pub fn is_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Per-record processing outcome of a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub results: Vec<AccessPointOutcome>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl OutputDocument {
    /// Outcomes that carry at least one error.
    pub fn failures(&self) -> impl Iterator<Item = &AccessPointOutcome> {
        self.results.iter().filter(|outcome| outcome.is_error())
    }

    /// Outcome for one access point.
    pub fn outcome(&self, access_point_id: &str) -> Option<&AccessPointOutcome> {
        self.results
            .iter()
            .find(|outcome| outcome.access_point_id == access_point_id)
    }
}
