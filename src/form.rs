use crate::location::LatLng;
use crate::models::CreateTripRequest;
use serde::{Deserialize, Serialize};

pub const MAX_CYCLE_HOURS: f64 = 70.0;
pub const MIN_CYCLE_HOURS: f64 = 0.0;

pub const CYCLE_HOURS_REQUIRED: &str = "Current cycle hours is required";
pub const CYCLE_HOURS_NOT_A_NUMBER: &str = "Hours must be a number";
pub const CYCLE_HOURS_TOO_LOW: &str = "Hours must be at least 0";
pub const CYCLE_HOURS_TOO_HIGH: &str = "Hours cannot exceed 70";
pub const LOCATION_REQUIRED: &str = "Pick a location on the map";
pub const SUBMIT_FAILED: &str = "Failed to create trip. Please try again.";

/// Raw fields of the new-trip form, exactly as the browser posts them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripForm {
    #[serde(default)]
    pub current_lat: String,
    #[serde(default)]
    pub current_lng: String,
    #[serde(default)]
    pub pickup_lat: String,
    #[serde(default)]
    pub pickup_lng: String,
    #[serde(default)]
    pub dropoff_lat: String,
    #[serde(default)]
    pub dropoff_lng: String,
    #[serde(default)]
    pub cycle_hours: String,
}

/// Field-level messages; an empty set means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub current_location: Option<&'static str>,
    pub pickup_location: Option<&'static str>,
    pub dropoff_location: Option<&'static str>,
    pub cycle_hours: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.current_location.is_none()
            && self.pickup_location.is_none()
            && self.dropoff_location.is_none()
            && self.cycle_hours.is_none()
    }
}

impl TripForm {
    /// Starting positions of the three map pickers.
    pub fn with_defaults() -> Self {
        Self {
            current_lat: "-1.286389".into(),
            current_lng: "36.817223".into(),
            pickup_lat: "-4.0435".into(),
            pickup_lng: "39.6682".into(),
            dropoff_lat: "-0.1022".into(),
            dropoff_lng: "34.7617".into(),
            cycle_hours: String::new(),
        }
    }

    /// Checks every field and packages the create payload, or reports every violation at once.
    pub fn validate(&self) -> Result<CreateTripRequest, FormErrors> {
        let current = pair(&self.current_lat, &self.current_lng);
        let pickup = pair(&self.pickup_lat, &self.pickup_lng);
        let dropoff = pair(&self.dropoff_lat, &self.dropoff_lng);
        let hours = validate_cycle_hours(&self.cycle_hours);

        match (current, pickup, dropoff, hours) {
            (Some(current), Some(pickup), Some(dropoff), Ok(hours)) => Ok(CreateTripRequest {
                current_location: current.to_string(),
                pickup_location: pickup.to_string(),
                dropoff_location: dropoff.to_string(),
                cycle_hours: hours.round(),
            }),
            (current, pickup, dropoff, hours) => Err(FormErrors {
                current_location: current.is_none().then_some(LOCATION_REQUIRED),
                pickup_location: pickup.is_none().then_some(LOCATION_REQUIRED),
                dropoff_location: dropoff.is_none().then_some(LOCATION_REQUIRED),
                cycle_hours: hours.err(),
            }),
        }
    }
}

pub fn validate_cycle_hours(raw: &str) -> Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CYCLE_HOURS_REQUIRED);
    }
    let hours: f64 = raw.parse().map_err(|_| CYCLE_HOURS_NOT_A_NUMBER)?;
    if !hours.is_finite() {
        return Err(CYCLE_HOURS_NOT_A_NUMBER);
    }
    if hours < MIN_CYCLE_HOURS {
        return Err(CYCLE_HOURS_TOO_LOW);
    }
    if hours > MAX_CYCLE_HOURS {
        return Err(CYCLE_HOURS_TOO_HIGH);
    }
    Ok(hours)
}

fn pair(lat: &str, lng: &str) -> Option<LatLng> {
    let lat = lat.trim().parse().ok()?;
    let lng = lng.trim().parse().ok()?;
    LatLng::new(lat, lng)
}
