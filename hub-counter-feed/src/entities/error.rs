//! Entity construction errors.
//!
//! These errors represent structural invariant violations caught while
//! building an entity. They are distinct from API/IO errors and are always
//! fixable by correcting the input.

/// Invariant violations raised by the validating entity constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEntity {
    /// More standard hours entries than there are days in a week
    #[error(
        "invalid standard hours list size ({count}), maximum list size is 7 (number of week days)"
    )]
    TooManyStandardHours { count: usize },

    /// Two standard hours entries for the same week day
    #[error("duplicate standard hours found for week day {day}")]
    DuplicateWeekday { day: String },

    /// Access point declares no capabilities
    #[error("access point {access_point_id} must declare at least one capability")]
    EmptyCapabilities { access_point_id: String },

    /// Two access points in one feed request share an id
    #[error("access point id {access_point_id} is repeated in the feed request")]
    DuplicateAccessPointId { access_point_id: String },

    /// Feed request has no access points
    #[error("feed request must contain at least one access point")]
    EmptyFeedRequest,
}

/// Errors loading a feed request from disk.
#[derive(Debug, thiserror::Error)]
pub enum FeedFileError {
    /// The file could not be read
    #[error("failed to read feed file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid feed request
    #[error("invalid feed file: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InvalidEntity::TooManyStandardHours { count: 8 };
        assert_eq!(
            err.to_string(),
            "invalid standard hours list size (8), maximum list size is 7 (number of week days)"
        );

        let err = InvalidEntity::DuplicateWeekday {
            day: "MONDAY".into(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate standard hours found for week day MONDAY"
        );

        let err = InvalidEntity::DuplicateAccessPointId {
            access_point_id: "AMAZON-US-HQ".into(),
        };
        assert_eq!(
            err.to_string(),
            "access point id AMAZON-US-HQ is repeated in the feed request"
        );

        let err = InvalidEntity::EmptyFeedRequest;
        assert_eq!(
            err.to_string(),
            "feed request must contain at least one access point"
        );
    }
}
