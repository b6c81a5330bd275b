use chrono::{DateTime, Utc};
use geo::{point, GeodesicDistance};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One device position sample as delivered by the platform location service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFix {
    pub coordinates: Coordinates,
    pub timestamp: DateTime<Utc>,
}

/// Geodesic distance between two coordinates, in meters.
pub fn distance_meters(a: Coordinates, b: Coordinates) -> f64 {
    let from = point!(x: a.longitude, y: a.latitude);
    let to = point!(x: b.longitude, y: b.latitude);
    from.geodesic_distance(&to)
}
