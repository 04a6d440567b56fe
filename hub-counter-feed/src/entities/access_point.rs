//! Access point (pick-up location) entity and its parts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::InvalidEntity;

/// Maximum number of standard hours entries, one per week day.
pub const MAX_STANDARD_HOURS: usize = 7;

/// Regular opening window for one week day.
///
/// The day is a free-form name ("MONDAY", "Tuesday", ...). Comparisons
/// between days ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardHours {
    pub day: String,
    /// Opening time, e.g. "08:30:00"
    pub opening_time: String,
    /// Closing time, e.g. "20:00:00"
    pub closing_time: String,
}

impl StandardHours {
    pub fn new(
        day: impl Into<String>,
        opening_time: impl Into<String>,
        closing_time: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            opening_time: opening_time.into(),
            closing_time: closing_time.into(),
        }
    }

    /// Whether this entry is for the given day, ignoring case.
    pub fn is_day(&self, day: &str) -> bool {
        day_key(&self.day) == day_key(day)
    }
}

/// A date range during which the access point is closed regardless of its
/// standard hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionalClosure {
    pub start_date: String,
    pub end_date: String,
}

impl ExceptionalClosure {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

/// Postal address and coordinates of an access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_field_one: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_field_two: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_field_three: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_or_region: Option<String>,
    pub postal_code: String,
    /// ISO 3166 alpha-2 country code
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

impl Address {
    /// Create an address with the required fields only.
    pub fn new(
        address_field_one: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            address_field_one: address_field_one.into(),
            address_field_two: None,
            address_field_three: None,
            city: city.into(),
            district: None,
            state_or_region: None,
            postal_code: postal_code.into(),
            country_code: country_code.into(),
            latitude: None,
            longitude: None,
        }
    }

    /// Set the coordinates (decimal degrees, as strings).
    pub fn with_coordinates(
        mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        self.latitude = Some(latitude.into());
        self.longitude = Some(longitude.into());
        self
    }
}

/// Package capacity of an access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_capacity: Option<u32>,
}

/// Contact details of an access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

/// Unvalidated access point data.
///
/// Fill this in and pass it to [`AccessPoint::new`], which checks the
/// structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPointFields {
    pub access_point_id: String,
    pub access_point_name: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_restricted_access: Option<bool>,
    /// IANA time zone, e.g. "America/Los_Angeles"
    pub time_zone: String,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<String>,
    /// e.g. "PICK_UP", "DROP_OFF"
    pub capabilities: Vec<String>,
    pub standard_hours: Vec<StandardHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceptional_closures: Option<Vec<ExceptionalClosure>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_details: Option<CommunicationDetails>,
}

/// A validated access point.
///
/// Holds at most 7 standard hours entries, no two for the same week day,
/// and at least one capability. Decoding from JSON runs the same checks.
///
/// # Examples
///
/// ```
/// use hub_counter_feed::entities::{AccessPoint, AccessPointFields, Address, StandardHours};
///
/// let fields = AccessPointFields {
///     access_point_id: "AMAZON-US-HQ".into(),
///     access_point_name: "Amazon Hub Counter - Amazon US HQ".into(),
///     is_active: true,
///     is_restricted_access: None,
///     time_zone: "America/Los_Angeles".into(),
///     address: Address::new("1918 8th Ave", "Seattle", "98101", "US"),
///     capacity: None,
///     termination_date: None,
///     capabilities: vec!["PICK_UP".into()],
///     standard_hours: vec![StandardHours::new("MONDAY", "08:30:00", "20:00:00")],
///     exceptional_closures: None,
///     communication_details: None,
/// };
///
/// let ap = AccessPoint::new(fields.clone()).unwrap();
/// assert!(ap.standard_hours_for_day("monday").is_some());
///
/// // The same day twice is rejected
/// let mut twice = fields;
/// twice.standard_hours.push(StandardHours::new("Monday", "09:00:00", "17:00:00"));
/// assert!(AccessPoint::new(twice).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccessPointFields", into = "AccessPointFields")]
pub struct AccessPoint(AccessPointFields);

impl AccessPoint {
    /// Validate the fields and build an access point.
    pub fn new(fields: AccessPointFields) -> Result<Self, InvalidEntity> {
        validate_standard_hours(&fields.standard_hours)?;

        if fields.capabilities.is_empty() {
            return Err(InvalidEntity::EmptyCapabilities {
                access_point_id: fields.access_point_id,
            });
        }

        Ok(AccessPoint(fields))
    }

    pub fn id(&self) -> &str {
        &self.0.access_point_id
    }

    pub fn name(&self) -> &str {
        &self.0.access_point_name
    }

    pub fn is_active(&self) -> bool {
        self.0.is_active
    }

    pub fn time_zone(&self) -> &str {
        &self.0.time_zone
    }

    pub fn address(&self) -> &Address {
        &self.0.address
    }

    pub fn capabilities(&self) -> &[String] {
        &self.0.capabilities
    }

    pub fn standard_hours(&self) -> &[StandardHours] {
        &self.0.standard_hours
    }

    /// Exceptional closures, empty when none were given.
    pub fn exceptional_closures(&self) -> &[ExceptionalClosure] {
        self.0.exceptional_closures.as_deref().unwrap_or_default()
    }

    /// Find the standard hours for a week day, ignoring case.
    pub fn standard_hours_for_day(&self, day: &str) -> Option<&StandardHours> {
        self.0.standard_hours.iter().find(|hours| hours.is_day(day))
    }

    /// All fields, for read access to the optional parts.
    pub fn fields(&self) -> &AccessPointFields {
        &self.0
    }

    /// Consumes the access point and returns its fields, e.g. for editing
    /// and re-validating.
    pub fn into_fields(self) -> AccessPointFields {
        self.0
    }
}

impl TryFrom<AccessPointFields> for AccessPoint {
    type Error = InvalidEntity;

    fn try_from(fields: AccessPointFields) -> Result<Self, Self::Error> {
        AccessPoint::new(fields)
    }
}

impl From<AccessPoint> for AccessPointFields {
    fn from(access_point: AccessPoint) -> Self {
        access_point.0
    }
}

/// Normalised form of a day name used for comparisons.
fn day_key(day: &str) -> String {
    day.to_uppercase()
}

fn validate_standard_hours(hours: &[StandardHours]) -> Result<(), InvalidEntity> {
    if hours.len() > MAX_STANDARD_HOURS {
        return Err(InvalidEntity::TooManyStandardHours { count: hours.len() });
    }

    let mut seen = HashSet::with_capacity(hours.len());
    for entry in hours {
        let day = day_key(&entry.day);
        if seen.contains(&day) {
            return Err(InvalidEntity::DuplicateWeekday { day });
        }
        seen.insert(day);
    }

    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::entities::fixtures::access_point_fields;
    use proptest::prelude::*;

    fn hours(day: String) -> StandardHours {
        StandardHours::new(day, "08:30:00", "20:00:00")
    }

    proptest! {
        /// Any list longer than a week is rejected with its length
        #[test]
        fn more_than_seven_rejected(days in proptest::collection::vec("[A-Za-z]{3,9}", 8..20)) {
            let count = days.len();
            let mut fields = access_point_fields("AP-1");
            fields.standard_hours = days.into_iter().map(hours).collect();

            prop_assert_eq!(
                AccessPoint::new(fields).unwrap_err(),
                InvalidEntity::TooManyStandardHours { count }
            );
        }

        /// The same day in two different casings is a duplicate
        #[test]
        fn case_insensitive_duplicate_rejected(
            day in "[a-z]{3,9}",
            upper_first in any::<bool>(),
        ) {
            let (a, b) = if upper_first {
                (day.to_uppercase(), day.clone())
            } else {
                (day.clone(), day.to_uppercase())
            };

            let mut fields = access_point_fields("AP-1");
            fields.standard_hours = vec![hours(a), hours(b)];

            prop_assert_eq!(
                AccessPoint::new(fields).unwrap_err(),
                InvalidEntity::DuplicateWeekday { day: day.to_uppercase() }
            );
        }
    }
}
