pub mod derive;
pub mod domain;
pub mod error;
pub mod journal;
pub mod notifications;
pub mod ports;
pub mod profile;
pub mod stats;
pub mod store;

pub use derive::derive_dream;
pub use domain::{
    BiblicalRef, Dream, DreamCategory, DreamId, EmotionalTone, Mood, Notification,
    NotificationId, NotificationKind, Screen, TimeOfDay,
};
pub use error::{JournalError, JournalResult};
pub use journal::{Action, Context, Effect, Journal, JournalSettings, Outcome, Transition};
pub use notifications::{NotificationQueue, DEFAULT_NOTIFICATION_TTL};
pub use ports::{
    Clock, EntropySource, FixedClock, FixedEntropy, JournalRepository, PortError, PortResult,
    SystemClock, ThreadEntropy,
};
pub use profile::{LanguageModel, ProfileUpdate, UserProfile};
pub use stats::TrendStats;
pub use store::DreamStore;
