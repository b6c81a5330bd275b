mod db;
mod location;
mod platform;
mod repository;
mod settings;
mod tracking;

pub use db::Database;
pub use location::{distance_meters, Coordinates, LocationFix};
pub use platform::{
    Geocoder, Haptics, LocationSource, Notifier, VibrationPattern, ALERT_PATTERN,
    NOTIFICATION_TITLE,
};
pub use repository::{StationRepository, MAX_HISTORY};
pub use settings::{
    AlertSettings, SettingsStore, DEFAULT_THRESHOLD_M, MAX_THRESHOLD_M, MIN_THRESHOLD_M,
};
pub use tracking::{commands, Target, TrackingController, TrackingState};

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

/// Platform bindings supplied by the hosting process.
#[derive(Clone)]
pub struct PlatformBridge {
    pub location: Arc<dyn LocationSource>,
    pub geocoder: Arc<dyn Geocoder>,
    pub haptics: Arc<dyn Haptics>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct AppState {
    pub(crate) settings: SettingsStore,
    pub(crate) repository: StationRepository,
    pub(crate) tracker: Mutex<TrackingController>,
    pub(crate) platform: PlatformBridge,
}

impl AppState {
    pub fn repository(&self) -> &StationRepository {
        &self.repository
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }
}

/// Initialize logging (reads RUST_LOG env var).
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

/// Open storage under `data_dir` and wire the service together.
pub async fn bootstrap(data_dir: &Path, platform: PlatformBridge) -> Result<AppState> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let database = Database::new(data_dir.join("station_alarm.sqlite3"))?;
    let history = database.load_history().await?;
    let repository = StationRepository::new(database, history);

    let settings = SettingsStore::new(data_dir.join("settings.json"))?;

    Ok(AppState {
        settings,
        repository,
        tracker: Mutex::new(TrackingController::new()),
        platform,
    })
}
