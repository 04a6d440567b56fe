//! Entity model for the feed API.
//!
//! Access points and feed requests enforce their structural invariants at
//! construction time (and when decoded from JSON), so code that receives
//! these types can trust their validity. Server-side shapes (feeds, output
//! documents) only need to decode.

mod access_point;
mod error;
mod feed;
mod feed_request;

pub use access_point::{
    AccessPoint, AccessPointFields, Address, Capacity, CommunicationDetails, ExceptionalClosure,
    MAX_STANDARD_HOURS, StandardHours,
};
pub use error::{FeedFileError, InvalidEntity};
pub use feed::{
    AccessPointOutcome, Feed, FeedType, FeedsResponse, OutcomeError, OutputDocument,
    UnknownFeedType,
};
pub use feed_request::AccessPointsFeedRequest;
