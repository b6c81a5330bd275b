use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::location::LocationFix;
use crate::platform::{Haptics, Notifier};
use crate::repository::StationRepository;

use super::loop_worker::alert_loop;
use super::state::Target;

/// Owns at most one running alert loop.
pub struct TrackingController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl TrackingController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Launch the alert loop for `target`. A session already running is
    /// cancelled first.
    pub async fn start_tracking(
        &mut self,
        target: Target,
        fixes: mpsc::Receiver<LocationFix>,
        repository: StationRepository,
        haptics: Arc<dyn Haptics>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<()> {
        self.stop_tracking().await?;

        info!(
            "starting alert session {} for {}",
            target.session_id, target.station_name
        );

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(alert_loop(
            target,
            fixes,
            repository,
            haptics,
            notifier,
            token_clone,
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Cancel the running loop, if any, and wait for it to wind down.
    pub async fn stop_tracking(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("alert loop task failed to join")?;
        }
        Ok(())
    }
}
