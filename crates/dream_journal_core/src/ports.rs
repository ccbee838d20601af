//! crates/dream_journal_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the journal's core logic.
//! The clock and entropy ports keep derivation pure; the repository port is the
//! boundary the HTTP service drives.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local};
use rand::Rng;

use crate::domain::{Dream, Notification, Screen};
use crate::error::JournalError;
use crate::journal::{Action, Transition};
use crate::profile::UserProfile;
use crate::stats::TrendStats;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<JournalError> for PortError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::InvalidArgument(msg) => PortError::InvalidArgument(msg),
            JournalError::NotFound(msg) => PortError::NotFound(msg),
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Time and Randomness
//=========================================================================================

/// Source of the current local instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the host's local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Source of uniformly distributed values in `[0, 1)`.
pub trait EntropySource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always yields the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy(pub f64);

impl EntropySource for FixedEntropy {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Applies one user or timer action to the journal state.
    async fn dispatch(&self, action: Action) -> PortResult<Transition>;

    /// All dreams, newest first.
    async fn list_dreams(&self) -> PortResult<Vec<Dream>>;

    async fn search_dreams(&self, query: &str) -> PortResult<Vec<Dream>>;

    /// Retires overdue notifications, then returns the rest in insertion order.
    async fn active_notifications(&self) -> PortResult<Vec<Notification>>;

    async fn profile(&self) -> PortResult<UserProfile>;

    async fn current_screen(&self) -> PortResult<Screen>;

    async fn trend_stats(&self) -> PortResult<TrendStats>;
}
