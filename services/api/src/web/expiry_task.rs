//! services/api/src/web/expiry_task.rs
//!
//! The asynchronous worker that retires one notification after its delay.

use dream_journal_core::domain::NotificationId;
use dream_journal_core::journal::Action;
use dream_journal_core::ports::{JournalRepository, PortResult};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Sleeps for `after`, then dispatches `Expire`.
///
/// An entry that was dismissed in the meantime makes the expiry a no-op. The task
/// returns without touching the journal if `shutdown` is cancelled first.
pub async fn expiry_process(
    journal: Arc<dyn JournalRepository>,
    id: NotificationId,
    after: Duration,
    shutdown: CancellationToken,
) -> PortResult<()> {
    tokio::select! {
        _ = shutdown.cancelled() => {
            info!(notification_id = %id, "Expiry task cancelled.");
            return Ok(());
        }
        _ = tokio::time::sleep(after) => {}
    }

    journal.dispatch(Action::Expire { id }).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryJournalAdapter;
    use dream_journal_core::domain::NotificationKind;
    use dream_journal_core::journal::{JournalSettings, Outcome};
    use dream_journal_core::ports::{FixedEntropy, SystemClock};

    fn journal() -> Arc<dyn JournalRepository> {
        Arc::new(MemoryJournalAdapter::new(
            JournalSettings::default(),
            Arc::new(SystemClock),
            Arc::new(FixedEntropy(0.5)),
        ))
    }

    async fn notify(journal: &Arc<dyn JournalRepository>) -> NotificationId {
        let transition = journal
            .dispatch(Action::Notify {
                message: "Saved".to_string(),
                kind: NotificationKind::Success,
            })
            .await
            .unwrap();
        match transition.outcome {
            Outcome::Notified(n) => n.id,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    async fn pending(journal: &Arc<dyn JournalRepository>) -> usize {
        journal.active_notifications().await.unwrap().len()
    }

    #[tokio::test(start_paused = true)]
    async fn removes_the_notification_after_the_delay() {
        let journal = journal();
        let id = notify(&journal).await;
        let task = tokio::spawn(expiry_process(
            journal.clone(),
            id,
            Duration::from_millis(5000),
            CancellationToken::new(),
        ));

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(pending(&journal).await, 1);

        task.await.unwrap().unwrap();
        assert_eq!(pending(&journal).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_after_dismissal_is_harmless() {
        let journal = journal();
        let id = notify(&journal).await;
        let task = tokio::spawn(expiry_process(
            journal.clone(),
            id,
            Duration::from_millis(5000),
            CancellationToken::new(),
        ));

        let dismissed = journal.dispatch(Action::Dismiss { id }).await.unwrap();
        assert_eq!(dismissed.outcome, Outcome::Dismissed { id, removed: true });

        assert!(task.await.unwrap().is_ok());
        assert_eq!(pending(&journal).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_pending_expiry() {
        let journal = journal();
        let id = notify(&journal).await;
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(expiry_process(
            journal.clone(),
            id,
            Duration::from_secs(60),
            shutdown.clone(),
        ));

        shutdown.cancel();
        task.await.unwrap().unwrap();
        assert_eq!(pending(&journal).await, 1);
    }
}
