use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

pub const MIN_THRESHOLD_M: u32 = 100;
pub const MAX_THRESHOLD_M: u32 = 2000;
pub const DEFAULT_THRESHOLD_M: u32 = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettings {
    /// Distance below which the wearer is alerted, in meters.
    pub threshold_m: u32,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            threshold_m: DEFAULT_THRESHOLD_M,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    alert: AlertSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn alert(&self) -> AlertSettings {
        self.data.read().unwrap().alert.clone()
    }

    /// Set the preferred alert distance, clamped to the supported range.
    /// Returns the value actually stored.
    pub fn update_threshold(&self, meters: u32) -> Result<u32> {
        let clamped = meters.clamp(MIN_THRESHOLD_M, MAX_THRESHOLD_M);
        {
            let mut guard = self.data.write().unwrap();
            guard.alert.threshold_m = clamped;
            self.persist(&guard)?;
        }
        Ok(clamped)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
