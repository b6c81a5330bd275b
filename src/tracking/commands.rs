use anyhow::Result;
use log::{error, info};
use uuid::Uuid;

use crate::location::Coordinates;
use crate::settings::{MAX_THRESHOLD_M, MIN_THRESHOLD_M};
use crate::tracking::state::{Target, TrackingState};
use crate::AppState;

const MSG_SEARCHING: &str = "Searching for station...";
const MSG_NOT_FOUND: &str = "Station not found";
const MSG_STARTED: &str = "Tracking started";

/// Geocode `station_name` and begin a tracking session towards it. Lookup
/// failures and empty results surface as user-facing messages on the tracking
/// state rather than as errors; storage failures propagate.
pub async fn start_tracking(app: &AppState, station_name: &str) -> Result<()> {
    if station_name.trim().is_empty() {
        return Ok(());
    }

    app.repository.update_message(MSG_SEARCHING);

    let query = normalize_query(station_name);
    let geocoder = app.platform.geocoder.clone();
    let lookup = tokio::task::spawn_blocking(move || geocoder.find_station(&query)).await;

    match lookup {
        Ok(Ok(Some(coordinates))) => {
            app.repository.add_station(station_name).await?;
            begin_session(app, station_name, coordinates).await
        }
        Ok(Ok(None)) => {
            info!("no geocoding result for '{station_name}'");
            app.repository.update_message(MSG_NOT_FOUND);
            Ok(())
        }
        Ok(Err(err)) => {
            error!("geocoding failed for '{station_name}': {err:?}");
            app.repository.update_message(&format!("Error: {err}"));
            Ok(())
        }
        Err(err) => {
            error!("geocoding worker failed: {err}");
            app.repository.update_message(&format!("Error: {err}"));
            Ok(())
        }
    }
}

async fn begin_session(
    app: &AppState,
    station_name: &str,
    coordinates: Coordinates,
) -> Result<()> {
    // Clamp again at session start so the invariant holds even for a
    // hand-edited settings file.
    let threshold_m = app
        .settings
        .alert()
        .threshold_m
        .clamp(MIN_THRESHOLD_M, MAX_THRESHOLD_M);

    let target = Target {
        session_id: Uuid::new_v4().to_string(),
        station_name: station_name.to_string(),
        coordinates,
        threshold_m,
    };

    app.repository.update_is_tracking(true);
    app.repository.update_message(MSG_STARTED);
    app.platform
        .notifier
        .show(&format!("Tracking: {station_name}"));

    let fixes = app.platform.location.subscribe();
    app.tracker
        .lock()
        .await
        .start_tracking(
            target,
            fixes,
            app.repository.clone(),
            app.platform.haptics.clone(),
            app.platform.notifier.clone(),
        )
        .await
}

/// Cancel the alert loop, stop any ongoing vibration, and reset the transient
/// state to defaults.
pub async fn stop_tracking(app: &AppState) -> Result<()> {
    app.tracker.lock().await.stop_tracking().await?;
    app.platform.haptics.cancel();
    app.repository.reset_tracking();
    Ok(())
}

pub fn get_tracking_state(app: &AppState) -> TrackingState {
    app.repository.tracking_state()
}

pub fn get_history(app: &AppState) -> Vec<String> {
    app.repository.history()
}

/// Clamp and persist the preferred alert distance. Returns the stored value.
pub fn set_threshold(app: &AppState, meters: u32) -> Result<u32> {
    app.settings.update_threshold(meters)
}

/// Bare names are suffixed so they still resolve to stations.
fn normalize_query(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.to_ascii_lowercase().ends_with("station") {
        trimmed.to_string()
    } else {
        format!("{trimmed} station")
    }
}
