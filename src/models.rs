use serde::de::{DeserializeOwned, IgnoredAny, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Trip identifiers arrive as numbers from the list endpoint and may be strings elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TripId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripId::Number(id) => write!(f, "{id}"),
            TripId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Fuel,
    Rest,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    Driving,
    OnDuty,
    OffDuty,
    Sleeper,
    #[serde(other)]
    Unknown,
}

impl DutyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty => "on_duty",
            DutyStatus::OffDuty => "off_duty",
            DutyStatus::Sleeper => "sleeper",
            DutyStatus::Unknown => "unknown",
        }
    }

    /// Row of the log grid the status is plotted on.
    pub fn level(self) -> u8 {
        match self {
            DutyStatus::Driving => 3,
            DutyStatus::OnDuty => 2,
            DutyStatus::OffDuty => 1,
            DutyStatus::Sleeper | DutyStatus::Unknown => 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stop {
    #[serde(rename = "type", default, deserialize_with = "lenient_variant")]
    pub kind: Option<StopKind>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_location: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub stops: Vec<Stop>,
    /// Miles.
    #[serde(default, deserialize_with = "lenient_number")]
    pub distance: Option<f64>,
    /// Hours.
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(rename = "startTime", default, deserialize_with = "lenient_text")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime", default, deserialize_with = "lenient_text")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_variant")]
    pub status: Option<DutyStatus>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub remarks: Option<String>,
}

/// Read-only projection of a trip as returned by the trip service.
///
/// The list endpoint carries `id` and `created_at`, the detail and create
/// endpoints carry `tripId`, `route` and `logs`; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<TripId>,
    #[serde(rename = "tripId", default, deserialize_with = "lenient_id")]
    pub trip_id: Option<TripId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub current_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pickup_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dropoff_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cycle_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub route: Option<Route>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub logs: Vec<LogEntry>,
}

impl Trip {
    pub fn identifier(&self) -> Option<&TripId> {
        self.trip_id.as_ref().or(self.id.as_ref())
    }
}

/// Body of `POST trips/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub cycle_hours: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseId {
    Unsigned(u64),
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Accepts numbers or numeric strings; anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(value)) => Some(value),
        Some(Loose::Text(text)) => text.trim().parse::<f64>().ok(),
        Some(Loose::Other(_)) | None => None,
    };
    Ok(value.filter(|value| value.is_finite()))
}

/// Accepts strings or bare numbers; arrays, objects and booleans read as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(text)) => Some(text),
        Some(Loose::Number(value)) => Some(value.to_string()),
        Some(Loose::Other(_)) | None => None,
    })
}

/// Unsigned integers stay numeric; other numbers and strings keep their text.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<TripId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseId>::deserialize(deserializer)? {
        Some(LooseId::Unsigned(id)) => Some(TripId::Number(id)),
        Some(LooseId::Number(id)) => Some(TripId::Text(id.to_string())),
        Some(LooseId::Text(id)) => Some(TripId::Text(id)),
        Some(LooseId::Other(_)) | None => None,
    })
}

/// Enum fields whose unit `#[serde(other)]` variant absorbs any unexpected value.
fn lenient_variant<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(text)) => text,
        Some(Loose::Number(_) | Loose::Other(_)) => String::new(),
        None => return Ok(None),
    };
    let parsed: Result<T, serde::de::value::Error> = T::deserialize(raw.into_deserializer());
    Ok(parsed.ok())
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_record_deserializes() {
        let trip: Trip = serde_json::from_value(serde_json::json!({
            "tripId": 12,
            "route": {
                "distance": 512.4,
                "duration": 9.1,
                "start_location": "1.0,2.0",
                "end_location": "3.0,4.0",
                "path": [[1.0, 2.0]],
                "stops": [{ "type": "fuel", "location": "1.5,2.5", "duration": 0.5 }]
            },
            "logs": [{
                "date": "2025-03-01",
                "startTime": "06:00",
                "endTime": "17:00",
                "status": "on_duty",
                "location": "On the road",
                "remarks": "On the road"
            }]
        }))
        .unwrap();

        assert_eq!(trip.identifier(), Some(&TripId::Number(12)));
        let route = trip.route.unwrap();
        assert_eq!(route.stops[0].kind, Some(StopKind::Fuel));
        assert_eq!(trip.logs[0].status, Some(DutyStatus::OnDuty));
        assert_eq!(trip.logs[0].start_time.as_deref(), Some("06:00"));
    }

    #[test]
    fn list_record_without_route_deserializes() {
        let trip: Trip = serde_json::from_value(serde_json::json!({
            "id": 3,
            "current_location": "-1.2,36.8",
            "pickup_location": "-4.0,39.6",
            "dropoff_location": "-0.1,34.7",
            "cycle_hours": 12,
            "created_at": "2025-02-10T08:00:00Z"
        }))
        .unwrap();

        assert!(trip.route.is_none());
        assert!(trip.logs.is_empty());
        assert_eq!(trip.cycle_hours, Some(12.0));
        assert_eq!(trip.identifier().map(ToString::to_string).as_deref(), Some("3"));
    }

    #[test]
    fn unknown_enum_values_do_not_reject_the_record() {
        let stop: Stop =
            serde_json::from_value(serde_json::json!({ "type": "weigh_station", "location": "1,2" }))
                .unwrap();
        assert_eq!(stop.kind, Some(StopKind::Unknown));

        let log: LogEntry = serde_json::from_value(serde_json::json!({ "status": "yard_move" })).unwrap();
        assert_eq!(log.status, Some(DutyStatus::Unknown));
        assert_eq!(DutyStatus::Unknown.level(), 0);
    }

    #[test]
    fn non_string_kinds_and_statuses_read_as_unknown() {
        let route: Route = serde_json::from_value(serde_json::json!({
            "stops": [
                { "type": 7, "location": "1,2" },
                { "type": { "code": "fuel" }, "location": "3,4" },
                { "type": null, "location": "5,6" }
            ]
        }))
        .unwrap();
        let kinds: Vec<_> = route.stops.iter().map(|stop| stop.kind).collect();
        assert_eq!(kinds, vec![Some(StopKind::Unknown), Some(StopKind::Unknown), None]);

        let trip: Trip = serde_json::from_value(serde_json::json!({
            "tripId": 5,
            "logs": [{ "status": 2 }, { "status": "sleeper" }]
        }))
        .unwrap();
        assert_eq!(trip.logs[0].status, Some(DutyStatus::Unknown));
        assert_eq!(trip.logs[1].status, Some(DutyStatus::Sleeper));
    }

    #[test]
    fn odd_numeric_ids_keep_the_list() {
        let trips: Vec<Trip> = serde_json::from_value(serde_json::json!([
            { "id": 1 },
            { "id": -3 },
            { "id": 2.5 },
            { "id": [9] }
        ]))
        .unwrap();
        let ids: Vec<_> = trips.iter().map(|trip| trip.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                Some(TripId::Number(1)),
                Some(TripId::Text("-3".into())),
                Some(TripId::Text("2.5".into())),
                None,
            ]
        );
    }

    #[test]
    fn string_ids_are_accepted() {
        let trip: Trip = serde_json::from_value(serde_json::json!({ "tripId": "abc-1" })).unwrap();
        assert_eq!(trip.identifier().unwrap().to_string(), "abc-1");
    }

    #[test]
    fn decimal_strings_and_odd_shapes_are_tolerated() {
        let trip: Trip = serde_json::from_value(serde_json::json!({
            "id": 4,
            "cycle_hours": "12.50",
            "route": {
                "distance": "n/a",
                "start_location": [1.0, 2.0],
                "end_location": null,
                "stops": null
            },
            "logs": null
        }))
        .unwrap();

        assert_eq!(trip.cycle_hours, Some(12.5));
        let route = trip.route.unwrap();
        assert_eq!(route.distance, None);
        assert_eq!(route.start_location, None);
        assert_eq!(route.end_location, None);
        assert!(route.stops.is_empty());
    }
}
