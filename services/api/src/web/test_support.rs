use crate::adapters::MemoryJournalAdapter;
use crate::config::Config;
use crate::web::state::AppState;
use dream_journal_core::journal::JournalSettings;
use dream_journal_core::ports::{FixedEntropy, SystemClock};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub fn test_state() -> Arc<AppState> {
    let config = Config::from_lookup(|_| None).unwrap();
    let journal = MemoryJournalAdapter::new(
        JournalSettings {
            notification_ttl: config.notification_ttl,
        },
        Arc::new(SystemClock),
        Arc::new(FixedEntropy(0.5)),
    );
    Arc::new(AppState {
        journal: Arc::new(journal),
        config: Arc::new(config),
        shutdown: CancellationToken::new(),
    })
}
