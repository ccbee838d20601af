//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::web::expiry_task::expiry_process;
use dream_journal_core::journal::Effect;
use dream_journal_core::ports::JournalRepository;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::error;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<dyn JournalRepository>,
    pub config: Arc<Config>,
    /// Cancelled at shutdown; pending expiry tasks exit early.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Carries out the deferred work a journal transition asked for.
    pub fn run_effects(&self, effects: &[Effect]) {
        for effect in effects {
            match *effect {
                Effect::ScheduleExpiry { id, after } => {
                    let journal = self.journal.clone();
                    let shutdown = self.shutdown.clone();
                    tokio::spawn(async move {
                        if let Err(e) = expiry_process(journal, id, after, shutdown).await {
                            error!(notification_id = %id, "Notification expiry failed: {}", e);
                        }
                    });
                }
            }
        }
    }
}
