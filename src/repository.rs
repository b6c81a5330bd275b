use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;

use crate::db::Database;
use crate::tracking::TrackingState;

/// Most-recently-used station names kept around for quick re-selection.
pub const MAX_HISTORY: usize = 5;

/// Broadcast store for the transient tracking state and the persisted station
/// history. One writer per field; any number of watch subscribers.
#[derive(Clone)]
pub struct StationRepository {
    inner: Arc<RepositoryInner>,
}

struct RepositoryInner {
    db: Database,
    tracking_tx: watch::Sender<TrackingState>,
    history_tx: watch::Sender<Vec<String>>,
}

impl StationRepository {
    /// `history` is the list loaded from storage at startup.
    pub fn new(db: Database, history: Vec<String>) -> Self {
        let (tracking_tx, _) = watch::channel(TrackingState::default());
        let (history_tx, _) = watch::channel(history);

        Self {
            inner: Arc::new(RepositoryInner {
                db,
                tracking_tx,
                history_tx,
            }),
        }
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.inner.tracking_tx.borrow().clone()
    }

    pub fn subscribe_tracking(&self) -> watch::Receiver<TrackingState> {
        self.inner.tracking_tx.subscribe()
    }

    pub fn history(&self) -> Vec<String> {
        self.inner.history_tx.borrow().clone()
    }

    pub fn subscribe_history(&self) -> watch::Receiver<Vec<String>> {
        self.inner.history_tx.subscribe()
    }

    /// Record a station lookup. Blank names are ignored; an existing entry
    /// moves to the front instead of duplicating; the list never grows past
    /// [`MAX_HISTORY`]. Persisted before the broadcast.
    pub async fn add_station(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Ok(());
        }

        let mut entries = self.history();
        entries.retain(|entry| entry != name);
        entries.insert(0, name.to_string());
        entries.truncate(MAX_HISTORY);

        self.inner.db.save_history(&entries).await?;
        self.inner.history_tx.send_replace(entries);
        Ok(())
    }

    pub fn update_distance(&self, distance: Option<f64>) {
        self.inner
            .tracking_tx
            .send_modify(|state| state.current_distance = distance);
    }

    pub fn update_message(&self, message: &str) {
        self.inner
            .tracking_tx
            .send_modify(|state| state.message = message.to_string());
    }

    pub fn update_is_tracking(&self, is_tracking: bool) {
        self.inner
            .tracking_tx
            .send_modify(|state| state.is_tracking = is_tracking);
    }

    /// Back to defaults; called when tracking stops.
    pub fn reset_tracking(&self) {
        self.inner.tracking_tx.send_replace(TrackingState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_db_path() -> PathBuf {
        std::env::temp_dir().join(format!(
            "station-alarm-repo-test-{}.sqlite3",
            uuid::Uuid::new_v4()
        ))
    }

    fn temp_repository() -> StationRepository {
        StationRepository::new(Database::new(temp_db_path()).unwrap(), Vec::new())
    }

    #[tokio::test]
    async fn history_moves_existing_entries_to_front_and_stays_bounded() {
        let repository = temp_repository();

        for name in ["E", "D", "C", "B", "A"] {
            repository.add_station(name).await.unwrap();
        }
        assert_eq!(repository.history(), ["A", "B", "C", "D", "E"]);

        repository.add_station("C").await.unwrap();
        assert_eq!(repository.history(), ["C", "A", "B", "D", "E"]);

        repository.add_station("F").await.unwrap();
        assert_eq!(repository.history(), ["F", "C", "A", "B", "D"]);
    }

    #[tokio::test]
    async fn blank_names_are_ignored() {
        let repository = temp_repository();

        repository.add_station("").await.unwrap();
        repository.add_station("   ").await.unwrap();
        assert!(repository.history().is_empty());
    }

    #[tokio::test]
    async fn history_is_persisted_across_reopen() {
        let path = temp_db_path();

        {
            let repository =
                StationRepository::new(Database::new(path.clone()).unwrap(), Vec::new());
            repository.add_station("Tokyo").await.unwrap();
            repository.add_station("Shinjuku").await.unwrap();
        }

        let reopened = Database::new(path).unwrap();
        assert_eq!(
            reopened.load_history().await.unwrap(),
            vec!["Shinjuku".to_string(), "Tokyo".to_string()]
        );
    }

    #[tokio::test]
    async fn tracking_updates_reach_subscribers() {
        let repository = temp_repository();
        let mut rx = repository.subscribe_tracking();

        repository.update_is_tracking(true);
        repository.update_distance(Some(250.0));
        repository.update_message("Tracking started");

        rx.changed().await.unwrap();
        let state = repository.tracking_state();
        assert!(state.is_tracking);
        assert_eq!(state.current_distance, Some(250.0));
        assert_eq!(state.message, "Tracking started");

        repository.reset_tracking();
        assert_eq!(repository.tracking_state(), TrackingState::default());
    }
}
