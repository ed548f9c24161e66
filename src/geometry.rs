use crate::location::{parse_location, LatLng};
use crate::models::{Route, StopKind};
use serde::Serialize;
use tracing::debug;

/// Map center used when a route has no usable coordinate (Nairobi).
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 1.2921,
    lng: 36.8219,
};
pub const DEFAULT_ZOOM: u8 = 7;

/// Ordered path through start, stops and end, keeping only the points that parse.
pub fn build_path(route: &Route) -> Vec<LatLng> {
    let mut path = Vec::with_capacity(route.stops.len() + 2);

    if let Some(start) = parse_logged(route.start_location.as_deref(), "start") {
        path.push(start);
    }
    for stop in &route.stops {
        if let Some(point) = parse_logged(stop.location.as_deref(), "stop") {
            path.push(point);
        }
    }
    if let Some(end) = parse_logged(route.end_location.as_deref(), "end") {
        path.push(end);
    }

    path
}

/// A single point is drawn as a marker, never as a degenerate line.
pub fn line_enabled(path: &[LatLng]) -> bool {
    path.len() >= 2
}

fn parse_logged(raw: Option<&str>, role: &str) -> Option<LatLng> {
    let parsed = parse_location(raw);
    if parsed.is_none() {
        debug!(role, raw = raw.unwrap_or_default(), "skipping unparseable location");
    }
    parsed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRole {
    Start,
    End,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub role: MarkerRole,
    pub position: LatLng,
    pub label: String,
    /// Raw wire coordinates shown in the stop popup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Everything the map widget needs, already validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayers {
    pub path: Vec<LatLng>,
    pub show_line: bool,
    pub markers: Vec<Marker>,
    pub center: LatLng,
    pub zoom: u8,
}

impl MapLayers {
    pub fn from_route(route: &Route) -> Self {
        let path = build_path(route);

        let mut markers = Vec::new();
        if let Some(position) = parse_location(route.start_location.as_deref()) {
            markers.push(Marker {
                role: MarkerRole::Start,
                position,
                label: "Start Point".to_string(),
                detail: None,
            });
        }
        if let Some(position) = parse_location(route.end_location.as_deref()) {
            markers.push(Marker {
                role: MarkerRole::End,
                position,
                label: "End Point".to_string(),
                detail: None,
            });
        }
        for stop in &route.stops {
            let Some(position) = parse_location(stop.location.as_deref()) else {
                continue;
            };
            markers.push(Marker {
                role: MarkerRole::Stop,
                position,
                label: stop_label(stop.kind).to_string(),
                detail: stop.location.clone(),
            });
        }

        MapLayers {
            show_line: line_enabled(&path),
            center: path.first().copied().unwrap_or(DEFAULT_CENTER),
            zoom: DEFAULT_ZOOM,
            path,
            markers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

fn stop_label(kind: Option<StopKind>) -> &'static str {
    match kind {
        Some(StopKind::Fuel) => "Fuel Stop",
        Some(StopKind::Rest) => "Rest Stop",
        Some(StopKind::Unknown) | None => "Stop",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;

    fn stop(kind: StopKind, location: &str) -> Stop {
        Stop {
            kind: Some(kind),
            location: Some(location.to_string()),
            duration: Some(0.5),
        }
    }

    fn route(start: &str, end: &str, stops: Vec<Stop>) -> Route {
        Route {
            start_location: Some(start.to_string()),
            end_location: Some(end.to_string()),
            stops,
            distance: None,
            duration: None,
        }
    }

    fn point(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng).unwrap()
    }

    #[test]
    fn start_and_end_without_stops() {
        let route = route("1.0,2.0", "3.0,4.0", Vec::new());
        let path = build_path(&route);
        assert_eq!(path, vec![point(1.0, 2.0), point(3.0, 4.0)]);
        assert!(line_enabled(&path));

        let layers = MapLayers::from_route(&route);
        assert!(layers.show_line);
        assert_eq!(layers.markers.len(), 2);
        assert!(layers.markers.iter().all(|m| m.role != MarkerRole::Stop));
        assert_eq!(layers.center, point(1.0, 2.0));
    }

    #[test]
    fn stops_keep_traversal_order_and_bad_ones_are_dropped() {
        let route = route(
            "0,0",
            "9,9",
            vec![
                stop(StopKind::Fuel, "1,1"),
                stop(StopKind::Rest, "garbage"),
                stop(StopKind::Rest, "2,2"),
                Stop::default(),
            ],
        );
        let path = build_path(&route);
        assert_eq!(
            path,
            vec![point(0.0, 0.0), point(1.0, 1.0), point(2.0, 2.0), point(9.0, 9.0)]
        );
        assert!(path.len() <= route.stops.len() + 2);

        let layers = MapLayers::from_route(&route);
        let stops: Vec<_> = layers
            .markers
            .iter()
            .filter(|m| m.role == MarkerRole::Stop)
            .map(|m| m.label.as_str())
            .collect();
        assert_eq!(stops, vec!["Fuel Stop", "Rest Stop"]);
    }

    #[test]
    fn empty_start_still_renders_remaining_points() {
        let route = route("", "3.0,4.0", vec![stop(StopKind::Fuel, "1.5,2.5")]);
        let layers = MapLayers::from_route(&route);
        assert_eq!(layers.path, vec![point(1.5, 2.5), point(3.0, 4.0)]);
        assert!(layers.show_line);
        assert!(layers.markers.iter().all(|m| m.role != MarkerRole::Start));
        assert_eq!(layers.center, point(1.5, 2.5));
    }

    #[test]
    fn single_point_is_marker_only() {
        let route = route("", "3.0,4.0", Vec::new());
        let layers = MapLayers::from_route(&route);
        assert_eq!(layers.path.len(), 1);
        assert!(!layers.show_line);
        assert_eq!(layers.markers.len(), 1);
        assert_eq!(layers.markers[0].role, MarkerRole::End);
    }

    #[test]
    fn nothing_parses_falls_back_to_default_center() {
        let layers = MapLayers::from_route(&Route::default());
        assert!(layers.is_empty());
        assert!(!layers.show_line);
        assert!(layers.markers.is_empty());
        assert_eq!(layers.center, DEFAULT_CENTER);
        assert_eq!(layers.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn layers_serialize_for_the_map_script() {
        let layers = MapLayers::from_route(&route("1,2", "3,4", vec![stop(StopKind::Rest, "1.5,2.5")]));
        let json = serde_json::to_value(&layers).unwrap();
        assert_eq!(json["path"][0], serde_json::json!([1.0, 2.0]));
        assert_eq!(json["show_line"], serde_json::json!(true));
        assert_eq!(json["markers"][2]["role"], serde_json::json!("stop"));
        assert_eq!(json["markers"][2]["detail"], serde_json::json!("1.5,2.5"));
        assert!(json["markers"][0].get("detail").is_none());
    }
}
