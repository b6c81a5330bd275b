//! Seams to the platform services the hosting process owns: location updates,
//! geocoding, the vibrator, and the persistent tracking notification.

use anyhow::Result;
use tokio::sync::mpsc;

use crate::location::{Coordinates, LocationFix};

/// Title hosts are expected to use for the single persistent notification.
pub const NOTIFICATION_TITLE: &str = "Station alarm";

/// Alert waveform: start immediately, 500ms on, 500ms off, replayed until
/// cancelled.
pub const ALERT_PATTERN: VibrationPattern = VibrationPattern {
    timings_ms: &[0, 500, 500],
    repeat: true,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VibrationPattern {
    /// Alternating off/on segment durations in milliseconds.
    pub timings_ms: &'static [u64],
    /// Replay the waveform from the start until cancelled.
    pub repeat: bool,
}

/// Continuous stream of device position samples. The platform binding pushes
/// at its own cadence; delivery ends when the receiver is dropped.
pub trait LocationSource: Send + Sync {
    fn subscribe(&self) -> mpsc::Receiver<LocationFix>;
}

/// Blocking pass-through to the platform geocoding service. Run it on a
/// blocking worker; `Ok(None)` means the query matched nothing.
pub trait Geocoder: Send + Sync {
    fn find_station(&self, query: &str) -> Result<Option<Coordinates>>;
}

/// Device vibrator.
pub trait Haptics: Send + Sync {
    fn vibrate(&self, pattern: VibrationPattern);
    fn cancel(&self);
}

/// Updates the text of the persistent tracking notification.
pub trait Notifier: Send + Sync {
    fn show(&self, content: &str);
}
