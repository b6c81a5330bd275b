use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::location::{distance_meters, LocationFix};
use crate::platform::{Haptics, Notifier, ALERT_PATTERN};
use crate::repository::StationRepository;

use super::state::Target;

pub(crate) const MSG_APPROACHING: &str = "Approaching destination!";

/// Consume position samples until cancelled. Each sample publishes the
/// distance to the target and refreshes the notification; every sample at or
/// inside the threshold re-fires the alert waveform.
pub(crate) async fn alert_loop(
    target: Target,
    mut fixes: mpsc::Receiver<LocationFix>,
    repository: StationRepository,
    haptics: Arc<dyn Haptics>,
    notifier: Arc<dyn Notifier>,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            maybe_fix = fixes.recv() => {
                let Some(fix) = maybe_fix else {
                    warn!("location stream closed for session {}", target.session_id);
                    break;
                };

                let distance = distance_meters(fix.coordinates, target.coordinates);
                repository.update_distance(Some(distance));
                notifier.show(&format!(
                    "Remaining: {}m ({})",
                    distance as i64, target.station_name
                ));

                if distance <= f64::from(target.threshold_m) {
                    haptics.vibrate(ALERT_PATTERN);
                    repository.update_message(MSG_APPROACHING);
                    notifier.show(MSG_APPROACHING);
                }
            }
            _ = cancel_token.cancelled() => {
                info!("alert loop for session {} shutting down", target.session_id);
                break;
            }
        }
    }
}
