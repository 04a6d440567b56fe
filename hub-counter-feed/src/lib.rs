//! Counter feed API client.
//!
//! Submits batches of pick-up locations ("access points") as feeds, polls
//! feed status and fetches per-record outcome documents.

pub mod config;
pub mod entities;
pub mod feed_api;

pub use config::{Credentials, FeedApiConfig};
pub use feed_api::{AccessToken, FeedApiError, FeedClient};
