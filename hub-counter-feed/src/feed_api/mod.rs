//! Feed API client.
//!
//! This module provides an HTTP client for the counter feed API, which
//! accepts batches of access points as feeds and reports their processing.
//!
//! Key characteristics of the API:
//! - Every call needs a bearer token from the auth endpoint; tokens are
//!   short-lived and the client never caches them
//! - Feed listings are paginated with an opaque `nextOffset` cursor
//! - Input and output documents of a feed share one URL, so the caller
//!   picks the decode target

pub mod endpoints;

mod client;
mod error;
mod transport;

pub use client::{AccessToken, FeedClient};
pub use error::{FeedApiError, TransportError};
pub use transport::{StatusPolicy, Transport};
