use serde::{Deserialize, Serialize};

use crate::location::Coordinates;

/// Transient per-session view published to observers. Never persisted; reset
/// to defaults when tracking stops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingState {
    pub is_tracking: bool,
    /// Meters to the target, absent until the first fix arrives.
    pub current_distance: Option<f64>,
    pub message: String,
}

/// Fixed destination for one tracking session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub session_id: String,
    pub station_name: String,
    pub coordinates: Coordinates,
    pub threshold_m: u32,
}
