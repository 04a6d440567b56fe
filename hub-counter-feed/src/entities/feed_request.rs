//! Feed submission payload.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::access_point::AccessPoint;
use super::error::{FeedFileError, InvalidEntity};

/// Wire shape of the feed request, before the id uniqueness check.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedRequestFields {
    access_points: Vec<AccessPoint>,
}

/// The access points submitted together as one feed.
///
/// Non-empty, and no two access points share an id. This is also the shape
/// of a feed's input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FeedRequestFields", into = "FeedRequestFields")]
pub struct AccessPointsFeedRequest {
    access_points: Vec<AccessPoint>,
}

impl AccessPointsFeedRequest {
    /// Validate and build a feed request.
    pub fn new(access_points: Vec<AccessPoint>) -> Result<Self, InvalidEntity> {
        if access_points.is_empty() {
            return Err(InvalidEntity::EmptyFeedRequest);
        }

        let mut seen = HashSet::with_capacity(access_points.len());
        for access_point in &access_points {
            if !seen.insert(access_point.id()) {
                return Err(InvalidEntity::DuplicateAccessPointId {
                    access_point_id: access_point.id().to_string(),
                });
            }
        }

        Ok(Self { access_points })
    }

    pub fn access_points(&self) -> &[AccessPoint] {
        &self.access_points
    }

    /// Find an access point by id.
    pub fn access_point(&self, access_point_id: &str) -> Option<&AccessPoint> {
        self.access_points
            .iter()
            .find(|ap| ap.id() == access_point_id)
    }

    pub fn len(&self) -> usize {
        self.access_points.len()
    }

    /// Whether the request holds no access points. False once constructed.
    pub fn is_empty(&self) -> bool {
        self.access_points.is_empty()
    }

    /// Canonical JSON encoding sent to the feeds endpoint.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode and validate a feed request from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load and validate a feed request from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FeedFileError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&contents)?)
    }

    pub fn into_access_points(self) -> Vec<AccessPoint> {
        self.access_points
    }
}

impl TryFrom<FeedRequestFields> for AccessPointsFeedRequest {
    type Error = InvalidEntity;

    fn try_from(fields: FeedRequestFields) -> Result<Self, Self::Error> {
        AccessPointsFeedRequest::new(fields.access_points)
    }
}

impl From<AccessPointsFeedRequest> for FeedRequestFields {
    fn from(request: AccessPointsFeedRequest) -> Self {
        FeedRequestFields {
            access_points: request.access_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::fixtures::access_point;
    use tempfile::tempdir;

    #[test]
    fn accepts_distinct_ids() {
        let request =
            AccessPointsFeedRequest::new(vec![access_point("AP-1"), access_point("AP-2")])
                .unwrap();
        assert_eq!(request.len(), 2);
        assert!(!request.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = AccessPointsFeedRequest::new(vec![
            access_point("AMAZON-US-HQ"),
            access_point("AP-2"),
            access_point("AMAZON-US-HQ"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            InvalidEntity::DuplicateAccessPointId {
                access_point_id: "AMAZON-US-HQ".into()
            }
        );
    }

    #[test]
    fn ids_are_case_sensitive() {
        let request =
            AccessPointsFeedRequest::new(vec![access_point("ap-1"), access_point("AP-1")]);
        assert!(request.is_ok());
    }

    #[test]
    fn rejects_empty_request() {
        assert_eq!(
            AccessPointsFeedRequest::new(vec![]).unwrap_err(),
            InvalidEntity::EmptyFeedRequest
        );
    }

    #[test]
    fn lookup_by_id() {
        let request =
            AccessPointsFeedRequest::new(vec![access_point("AP-1"), access_point("AP-2")])
                .unwrap();

        assert_eq!(request.access_point("AP-2").unwrap().id(), "AP-2");
        assert!(request.access_point("AP-3").is_none());
    }

    #[test]
    fn json_has_access_points_key() {
        let request = AccessPointsFeedRequest::new(vec![access_point("AP-1")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

        assert_eq!(value["accessPoints"][0]["accessPointId"], "AP-1");
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let request = AccessPointsFeedRequest::new(vec![access_point("AP-1")]).unwrap();
        let mut value = serde_json::to_value(&request).unwrap();
        let first = value["accessPoints"][0].clone();
        value["accessPoints"].as_array_mut().unwrap().push(first);

        let err = AccessPointsFeedRequest::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("AP-1 is repeated"));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(AccessPointsFeedRequest::from_json("{\"accessPoints\": [").is_err());
        assert!(AccessPointsFeedRequest::from_json("{}").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.json");
        let request =
            AccessPointsFeedRequest::new(vec![access_point("AP-1"), access_point("AP-2")])
                .unwrap();
        std::fs::write(&path, request.to_json().unwrap()).unwrap();

        let loaded = AccessPointsFeedRequest::from_json_file(&path).unwrap();
        assert_eq!(loaded, request);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = AccessPointsFeedRequest::from_json_file(dir.path().join("missing.json"))
            .unwrap_err();
        assert!(matches!(err, FeedFileError::Io(_)));
    }

    #[test]
    fn load_invalid_file_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.json");
        std::fs::write(&path, "{\"accessPoints\": []}").unwrap();

        let err = AccessPointsFeedRequest::from_json_file(&path).unwrap_err();
        assert!(matches!(err, FeedFileError::Json(_)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::entities::fixtures::access_point_fields;
    use crate::entities::{
        Address, Capacity, CommunicationDetails, ExceptionalClosure, StandardHours,
    };
    use proptest::option::of;
    use proptest::prelude::*;

    const DATE: &str = "[0-9]{4}-[0-9]{2}-[0-9]{2}";
    const TEXT: &str = "[A-Za-z0-9 ]{1,20}";

    fn arb_address() -> impl Strategy<Value = Address> {
        (
            (TEXT, of(TEXT), of(TEXT)),
            (TEXT, of(TEXT), of(TEXT)),
            ("[0-9]{5}", "[A-Z]{2}"),
            of(("-?[0-9]{1,2}\\.[0-9]{6}", "-?[0-9]{1,3}\\.[0-9]{6}")),
        )
            .prop_map(
                |((one, two, three), (city, district, region), (postal, country), coords)| {
                    let mut address = Address::new(one, city, postal, country);
                    address.address_field_two = two;
                    address.address_field_three = three;
                    address.district = district;
                    address.state_or_region = region;
                    if let Some((latitude, longitude)) = coords {
                        address = address.with_coordinates(latitude, longitude);
                    }
                    address
                },
            )
    }

    fn arb_capacity() -> impl Strategy<Value = Capacity> {
        (of(any::<u32>()), of(any::<u32>())).prop_map(|(daily, storage)| Capacity {
            daily_capacity: daily,
            storage_capacity: storage,
        })
    }

    fn arb_communication_details() -> impl Strategy<Value = CommunicationDetails> {
        (of("[0-9 -]{7,15}"), of("[a-z]{1,8}@example\\.com")).prop_map(|(phone, email)| {
            CommunicationDetails {
                phone_number: phone,
                email_id: email,
            }
        })
    }

    /// Strategy for a valid access point with a given id.
    fn arb_access_point(id: String) -> impl Strategy<Value = AccessPoint> {
        (
            ("[A-Za-z ]{1,30}", any::<bool>(), of(any::<bool>())),
            proptest::sample::subsequence(
                vec!["MONDAY", "Tuesday", "wednesday", "THURSDAY", "Friday"],
                0..=5,
            ),
            of(DATE),
            (arb_address(), of(arb_capacity()), of(DATE)),
            of(arb_communication_details()),
        )
            .prop_map(
                move |(
                    (name, active, restricted),
                    days,
                    closure,
                    (address, capacity, termination),
                    contact,
                )| {
                    let mut fields = access_point_fields(&id);
                    fields.access_point_name = name;
                    fields.is_active = active;
                    fields.is_restricted_access = restricted;
                    fields.address = address;
                    fields.capacity = capacity;
                    fields.termination_date = termination;
                    fields.communication_details = contact;
                    fields.standard_hours = days
                        .into_iter()
                        .map(|d| StandardHours::new(d, "09:00:00", "17:00:00"))
                        .collect();
                    fields.exceptional_closures =
                        closure.map(|date| vec![ExceptionalClosure::new(date.clone(), date)]);
                    AccessPoint::new(fields).unwrap()
                },
            )
    }

    fn arb_request() -> impl Strategy<Value = AccessPointsFeedRequest> {
        proptest::collection::hash_set("[A-Z0-9-]{1,12}", 1..6)
            .prop_flat_map(|ids| {
                ids.into_iter()
                    .map(arb_access_point)
                    .collect::<Vec<_>>()
            })
            .prop_map(|points| AccessPointsFeedRequest::new(points).unwrap())
    }

    proptest! {
        /// Encoding then decoding gives back the same access points
        #[test]
        fn json_roundtrip(request in arb_request()) {
            let decoded = AccessPointsFeedRequest::from_json(&request.to_json().unwrap()).unwrap();
            prop_assert_eq!(&decoded, &request);
            for ap in request.access_points() {
                prop_assert_eq!(decoded.access_point(ap.id()), Some(ap));
            }
        }

        /// Repeating any id makes the request invalid
        #[test]
        fn repeated_id_rejected(request in arb_request(), pick in any::<prop::sample::Index>()) {
            let mut points = request.into_access_points();
            let dup = points[pick.index(points.len())].clone();
            let id = dup.id().to_string();
            points.push(dup);

            prop_assert_eq!(
                AccessPointsFeedRequest::new(points).unwrap_err(),
                InvalidEntity::DuplicateAccessPointId { access_point_id: id }
            );
        }
    }
}
