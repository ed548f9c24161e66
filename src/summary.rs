use crate::client::TripClient;
use crate::geometry::MapLayers;
use crate::models::{LogEntry, Route, Trip};
use tracing::{error, info};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load trip details. Please try again later.";
pub const NOT_AVAILABLE: &str = "N/A";

/// Lifecycle of one trip lookup. `Success` and `Error` are terminal.
#[derive(Debug, Clone)]
pub enum SummaryState {
    Loading,
    Success(Box<TripSummary>),
    Error(String),
}

impl SummaryState {
    /// Issues the single lookup for this page visit and settles the state.
    pub async fn load(client: &TripClient, trip_id: &str) -> Self {
        match client.get_trip(trip_id).await {
            Ok(trip) => {
                info!(trip_id, "trip loaded");
                SummaryState::Success(Box::new(TripSummary::from_trip(trip)))
            }
            Err(err) => {
                error!(trip_id, "error fetching trip details: {err}");
                SummaryState::Error(LOAD_ERROR_MESSAGE.to_string())
            }
        }
    }
}

/// What the summary page shows once a trip has been fetched.
#[derive(Debug, Clone)]
pub struct TripSummary {
    pub trip: Trip,
    pub route: Option<RouteSummary>,
}

#[derive(Debug, Clone)]
pub struct RouteSummary {
    pub layers: MapLayers,
    pub distance: String,
    pub duration: String,
    pub stop_count: usize,
}

impl TripSummary {
    pub fn from_trip(trip: Trip) -> Self {
        let route = trip.route.as_ref().map(RouteSummary::from_route);
        Self { trip, route }
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.trip.logs
    }
}

impl RouteSummary {
    pub fn from_route(route: &Route) -> Self {
        Self {
            layers: MapLayers::from_route(route),
            distance: with_unit(route.distance, "miles"),
            duration: with_unit(route.duration, "hours"),
            stop_count: route.stops.len(),
        }
    }
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value} {unit}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MarkerRole;
    use std::time::Duration;

    fn trip(value: serde_json::Value) -> Trip {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn two_valid_endpoints_draw_a_line_and_two_markers() {
        let summary = TripSummary::from_trip(trip(serde_json::json!({
            "tripId": 1,
            "route": {
                "start_location": "1.0,2.0",
                "end_location": "3.0,4.0",
                "stops": [],
                "distance": 120.5,
                "duration": 2.25
            },
            "logs": []
        })));

        let route = summary.route.unwrap();
        let path: Vec<[f64; 2]> = route.layers.path.iter().map(|p| (*p).into()).collect();
        assert_eq!(path, vec![[1.0, 2.0], [3.0, 4.0]]);
        assert!(route.layers.show_line);
        assert_eq!(route.layers.markers.len(), 2);
        assert!(route.layers.markers.iter().all(|m| m.role != MarkerRole::Stop));
        assert_eq!(route.distance, "120.5 miles");
        assert_eq!(route.duration, "2.25 hours");
        assert_eq!(route.stop_count, 0);
    }

    #[test]
    fn missing_route_is_its_own_outcome() {
        let summary = TripSummary::from_trip(trip(serde_json::json!({ "tripId": 1, "logs": [] })));
        assert!(summary.route.is_none());
        assert!(summary.logs().is_empty());
    }

    #[test]
    fn absent_numbers_read_as_not_available() {
        let summary = TripSummary::from_trip(trip(serde_json::json!({
            "route": { "start_location": "1,2" }
        })));
        let route = summary.route.unwrap();
        assert_eq!(route.distance, NOT_AVAILABLE);
        assert_eq!(route.duration, NOT_AVAILABLE);
        assert!(!route.layers.show_line);
    }

    #[tokio::test]
    async fn failed_lookup_settles_in_error_with_the_user_message() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let client = TripClient::new(
            format!("http://127.0.0.1:{port}/api/").parse().unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();

        match SummaryState::load(&client, "7").await {
            SummaryState::Error(message) => assert_eq!(message, LOAD_ERROR_MESSAGE),
            other => panic!("expected error state, got {other:?}"),
        }
    }
}
