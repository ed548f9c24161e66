use crate::models::Trip;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt::Display;
use tracing::warn;

pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub trips: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentTrip {
    pub id: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub created_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total_trips: usize,
    pub active_trips: usize,
    pub completed_trips: usize,
    pub monthly: Vec<MonthCount>,
    pub recent: Vec<RecentTrip>,
}

pub fn build_dashboard(trips: &[Trip]) -> Dashboard {
    build_dashboard_in(trips, &Local)
}

pub fn build_dashboard_in<Tz>(trips: &[Trip], tz: &Tz) -> Dashboard
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let active_trips = trips.iter().filter(|trip| is_active(trip)).count();

    Dashboard {
        total_trips: trips.len(),
        active_trips,
        completed_trips: trips.len() - active_trips,
        monthly: monthly_counts(trips, tz),
        recent: recent_trips(trips, RECENT_LIMIT)
            .into_iter()
            .map(|trip| RecentTrip {
                id: trip.identifier().map(ToString::to_string),
                pickup_location: trip.pickup_location.clone(),
                dropoff_location: trip.dropoff_location.clone(),
                created_on: created_at(trip)
                    .map(|at| at.with_timezone(tz).format("%Y-%m-%d").to_string()),
            })
            .collect(),
    }
}

/// A trip with cycle hours left counts as active; there is no server-side status.
pub fn is_active(trip: &Trip) -> bool {
    trip.cycle_hours.is_some_and(|hours| hours > 0.0)
}

/// Trips per full month name, months in the order they are first seen.
pub fn monthly_counts<Tz>(trips: &[Trip], tz: &Tz) -> Vec<MonthCount>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut months: Vec<MonthCount> = Vec::new();
    for trip in trips {
        let Some(at) = created_at(trip) else {
            warn!(
                id = trip.identifier().map(ToString::to_string).unwrap_or_default(),
                created_at = trip.created_at.as_deref().unwrap_or_default(),
                "leaving trip without a readable creation time out of the monthly chart"
            );
            continue;
        };
        let month = at.with_timezone(tz).format("%B").to_string();
        match months.iter_mut().find(|entry| entry.month == month) {
            Some(entry) => entry.trips += 1,
            None => months.push(MonthCount { month, trips: 1 }),
        }
    }
    months
}

/// Most recent trips first. The sort is stable, so equal timestamps keep fetch
/// order, and trips without a readable timestamp go last.
pub fn recent_trips(trips: &[Trip], limit: usize) -> Vec<&Trip> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, &Trip)> =
        trips.iter().map(|trip| (created_at(trip), trip)).collect();
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    keyed.into_iter().take(limit).map(|(_, trip)| trip).collect()
}

fn created_at(trip: &Trip) -> Option<DateTime<Utc>> {
    parse_timestamp(trip.created_at.as_deref()?)
}

/// RFC 3339 first, then a naive date-time read as local time, then a bare date at UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|at| at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
