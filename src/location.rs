use serde::Serialize;
use std::fmt;

/// A latitude/longitude pair that has passed validation.
///
/// Serializes as a two element array so it can be handed straight to Leaflet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Builds a pair from two numbers, rejecting NaN and infinities.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(value: LatLng) -> Self {
        [value.lat, value.lng]
    }
}

/// Wire form used by the trip service: `"<lat>,<lng>"`.
impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Parses a `"lat,lng"` string coming from the trip service.
///
/// Anything that is not exactly two comma separated finite numbers yields `None`.
pub fn parse_location(raw: Option<&str>) -> Option<LatLng> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let mut parts = raw.split(',');
    let lat = parse_component(parts.next()?)?;
    let lng = parse_component(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    LatLng::new(lat, lng)
}

fn parse_component(part: &str) -> Option<f64> {
    let part = part.trim();
    if part.is_empty() {
        return None;
    }
    part.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_pair() {
        let parsed = parse_location(Some("1.0,2.0")).unwrap();
        assert_eq!(parsed, LatLng { lat: 1.0, lng: 2.0 });
    }

    #[test]
    fn parses_negative_and_padded_values() {
        let parsed = parse_location(Some(" -1.286389 , 36.817223 ")).unwrap();
        assert_eq!(parsed.lat, -1.286389);
        assert_eq!(parsed.lng, 36.817223);
    }

    #[test]
    fn rejects_missing_and_empty() {
        assert_eq!(parse_location(None), None);
        assert_eq!(parse_location(Some("")), None);
        assert_eq!(parse_location(Some("   ")), None);
    }

    #[test]
    fn rejects_wrong_arity() {
        assert_eq!(parse_location(Some("1.0")), None);
        assert_eq!(parse_location(Some("1.0,2.0,3.0")), None);
        assert_eq!(parse_location(Some("1.0,")), None);
        assert_eq!(parse_location(Some(",2.0")), None);
    }

    #[test]
    fn rejects_non_numeric_and_non_finite() {
        assert_eq!(parse_location(Some("abc,2.0")), None);
        assert_eq!(parse_location(Some("1.0,north")), None);
        assert_eq!(parse_location(Some("NaN,2.0")), None);
        assert_eq!(parse_location(Some("1.0,inf")), None);
    }

    #[test]
    fn wire_form_round_trips_through_display() {
        let point = LatLng::new(-4.0435, 39.6682).unwrap();
        assert_eq!(point.to_string(), "-4.0435,39.6682");
        assert_eq!(parse_location(Some(&point.to_string())), Some(point));
    }

    #[test]
    fn serializes_as_array() {
        let point = LatLng::new(1.5, -2.25).unwrap();
        assert_eq!(serde_json::to_string(&point).unwrap(), "[1.5,-2.25]");
    }
}
