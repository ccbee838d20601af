//! services/api/src/adapters/memory.rs
//!
//! The in-memory adapter, the concrete implementation of the `JournalRepository` port.
//! A single `Journal` lives behind an async mutex for the lifetime of the process;
//! nothing is persisted.

use async_trait::async_trait;
use dream_journal_core::domain::{Dream, Notification, Screen};
use dream_journal_core::journal::{Action, Context, Journal, JournalSettings, Outcome, Transition};
use dream_journal_core::ports::{Clock, EntropySource, JournalRepository, PortError, PortResult};
use dream_journal_core::profile::UserProfile;
use dream_journal_core::stats::TrendStats;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Owns the session's journal and the time and randomness it runs on.
pub struct MemoryJournalAdapter {
    journal: Mutex<Journal>,
    clock: Arc<dyn Clock>,
    entropy: Arc<dyn EntropySource>,
}

impl MemoryJournalAdapter {
    /// Creates a new `MemoryJournalAdapter` with an empty journal.
    pub fn new(
        settings: JournalSettings,
        clock: Arc<dyn Clock>,
        entropy: Arc<dyn EntropySource>,
    ) -> Self {
        Self {
            journal: Mutex::new(Journal::new(settings)),
            clock,
            entropy,
        }
    }
}

//=========================================================================================
// `JournalRepository` Trait Implementation
//=========================================================================================

#[async_trait]
impl JournalRepository for MemoryJournalAdapter {
    async fn dispatch(&self, action: Action) -> PortResult<Transition> {
        let ctx = Context {
            now: self.clock.now(),
            entropy: self.entropy.as_ref(),
        };
        let mut journal = self.journal.lock().await;
        let transition = journal.apply(action, &ctx).map_err(|e| {
            warn!("Journal rejected action: {}", e);
            PortError::from(e)
        })?;

        match &transition.outcome {
            Outcome::DreamRecorded(dream) => info!(
                dream_id = %dream.id,
                tone = %dream.emotional_tone,
                themes = dream.themes.len(),
                "Dream recorded."
            ),
            Outcome::Expired { id, removed } => {
                debug!(notification_id = %id, removed, "Notification expiry fired.")
            }
            Outcome::Dismissed { id, removed } => {
                debug!(notification_id = %id, removed, "Notification dismissed.")
            }
            _ => {}
        }
        Ok(transition)
    }

    async fn list_dreams(&self) -> PortResult<Vec<Dream>> {
        let journal = self.journal.lock().await;
        Ok(journal.dreams().list().to_vec())
    }

    async fn search_dreams(&self, query: &str) -> PortResult<Vec<Dream>> {
        let journal = self.journal.lock().await;
        Ok(journal.dreams().search(query).into_iter().cloned().collect())
    }

    async fn active_notifications(&self) -> PortResult<Vec<Notification>> {
        let now = self.clock.now();
        let mut journal = self.journal.lock().await;
        let swept = journal.sweep_notifications(now);
        if !swept.is_empty() {
            debug!(count = swept.len(), "Swept overdue notifications.");
        }
        Ok(journal.notifications().to_vec())
    }

    async fn profile(&self) -> PortResult<UserProfile> {
        Ok(self.journal.lock().await.profile().clone())
    }

    async fn current_screen(&self) -> PortResult<Screen> {
        Ok(self.journal.lock().await.screen())
    }

    async fn trend_stats(&self) -> PortResult<TrendStats> {
        let now = self.clock.now();
        Ok(self.journal.lock().await.trend_stats(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, TimeZone};
    use dream_journal_core::domain::{DreamId, NotificationKind};
    use dream_journal_core::ports::FixedEntropy;
    use std::sync::Mutex as StdMutex;

    /// A clock the test can move forward.
    struct ManualClock(StdMutex<DateTime<FixedOffset>>);

    impl ManualClock {
        fn advance(&self, by: ChronoDuration) {
            let mut now = self.0.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<FixedOffset> {
            *self.0.lock().unwrap()
        }
    }

    fn adapter() -> (MemoryJournalAdapter, Arc<ManualClock>) {
        let start = FixedOffset::east_opt(-5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 6, 15, 0)
            .unwrap();
        let clock = Arc::new(ManualClock(StdMutex::new(start)));
        let adapter = MemoryJournalAdapter::new(
            JournalSettings::default(),
            clock.clone(),
            Arc::new(FixedEntropy(0.0)),
        );
        (adapter, clock)
    }

    async fn record(adapter: &MemoryJournalAdapter, content: &str) -> Dream {
        match adapter
            .dispatch(Action::RecordDream {
                content: content.to_string(),
            })
            .await
            .unwrap()
            .outcome
        {
            Outcome::DreamRecorded(dream) => dream,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn recorded_dreams_are_listed_newest_first() {
        let (adapter, _) = adapter();
        record(&adapter, "a calm lake").await;
        record(&adapter, "a dark forest").await;

        let dreams = adapter.list_dreams().await.unwrap();
        let ids: Vec<DreamId> = dreams.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![DreamId(2), DreamId(1)]);
        assert!(dreams[0].tags.contains(&"Early Morning".to_string()));
    }

    #[tokio::test]
    async fn blank_dream_maps_to_invalid_argument() {
        let (adapter, _) = adapter();
        let err = adapter
            .dispatch(Action::RecordDream {
                content: "   ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let (adapter, _) = adapter();
        record(&adapter, "Climbing a Mountain").await;
        record(&adapter, "a quiet library").await;
        let hits = adapter.search_dreams("MOUNTAIN").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, DreamId(1));
    }

    #[tokio::test]
    async fn listing_notifications_sweeps_overdue_entries() {
        let (adapter, clock) = adapter();
        adapter
            .dispatch(Action::Notify {
                message: "Copied".to_string(),
                kind: NotificationKind::Info,
            })
            .await
            .unwrap();
        assert_eq!(adapter.active_notifications().await.unwrap().len(), 1);

        clock.advance(ChronoDuration::milliseconds(5000));
        assert!(adapter.active_notifications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stats_reflect_bookmarks() {
        let (adapter, _) = adapter();
        record(&adapter, "peace like a river").await;
        adapter
            .dispatch(Action::ToggleBookmark { id: DreamId(1) })
            .await
            .unwrap();
        let stats = adapter.trend_stats().await.unwrap();
        assert_eq!(stats.total_dreams, 1);
        assert_eq!(stats.bookmarked, 1);
        assert_eq!(stats.dreams_this_week, 1);
        assert_eq!(stats.average_confidence, 80);
    }
}
