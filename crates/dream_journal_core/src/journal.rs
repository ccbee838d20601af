//! crates/dream_journal_core/src/journal.rs
//!
//! The application state and its transitions.
//!
//! `Journal` owns every piece of session state. Each user or timer event is an
//! [`Action`] applied through [`Journal::apply`], which returns what happened plus any
//! deferred work (notification expiry) for the runtime to schedule.

use chrono::{DateTime, FixedOffset};
use std::time::Duration;

use crate::domain::{Dream, DreamId, Notification, NotificationId, NotificationKind, Screen};
use crate::error::{JournalError, JournalResult};
use crate::notifications::{NotificationQueue, DEFAULT_NOTIFICATION_TTL};
use crate::ports::EntropySource;
use crate::profile::{ProfileUpdate, UserProfile};
use crate::stats::TrendStats;
use crate::store::DreamStore;

pub const DREAM_RECORDED_MESSAGE: &str = "Dream recorded and interpreted";
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated";

#[derive(Debug, Clone)]
pub struct JournalSettings {
    pub notification_ttl: Duration,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

/// The ambient inputs of a transition.
pub struct Context<'a> {
    pub now: DateTime<FixedOffset>,
    pub entropy: &'a dyn EntropySource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RecordDream { content: String },
    ToggleBookmark { id: DreamId },
    OpenDream { id: DreamId },
    Navigate { screen: Screen },
    Notify { message: String, kind: NotificationKind },
    Dismiss { id: NotificationId },
    Expire { id: NotificationId },
    UpdateProfile(ProfileUpdate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    DreamRecorded(Dream),
    /// `None` when the id was not in the store.
    BookmarkToggled { id: DreamId, bookmarked: Option<bool> },
    DreamOpened(Dream),
    Navigated(Screen),
    Notified(Notification),
    /// `removed` is false when the entry was already gone.
    Dismissed { id: NotificationId, removed: bool },
    Expired { id: NotificationId, removed: bool },
    ProfileUpdated(UserProfile),
}

/// Deferred work the runtime must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ScheduleExpiry { id: NotificationId, after: Duration },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub outcome: Outcome,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn plain(outcome: Outcome) -> Self {
        Self {
            outcome,
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    dreams: DreamStore,
    notifications: NotificationQueue,
    profile: UserProfile,
    screen: Screen,
}

impl Journal {
    pub fn new(settings: JournalSettings) -> Self {
        Self {
            dreams: DreamStore::new(),
            notifications: NotificationQueue::new(settings.notification_ttl),
            profile: UserProfile::default(),
            screen: Screen::default(),
        }
    }

    pub fn apply(&mut self, action: Action, ctx: &Context<'_>) -> JournalResult<Transition> {
        match action {
            Action::RecordDream { content } => self.record_dream(&content, ctx),
            Action::ToggleBookmark { id } => Ok(Transition::plain(Outcome::BookmarkToggled {
                id,
                bookmarked: self.dreams.toggle_bookmark(id),
            })),
            Action::OpenDream { id } => {
                let dream = self
                    .dreams
                    .get(id)
                    .cloned()
                    .ok_or_else(|| JournalError::NotFound(format!("dream {}", id)))?;
                self.screen = Screen::DreamDetail(id);
                Ok(Transition::plain(Outcome::DreamOpened(dream)))
            }
            Action::Navigate { screen } => {
                if let Screen::DreamDetail(id) = screen {
                    if !self.dreams.contains(id) {
                        return Err(JournalError::NotFound(format!("dream {}", id)));
                    }
                }
                self.screen = screen;
                Ok(Transition::plain(Outcome::Navigated(screen)))
            }
            Action::Notify { message, kind } => {
                let (notification, effect) = self.enqueue(message, kind, ctx.now);
                Ok(Transition {
                    outcome: Outcome::Notified(notification),
                    effects: vec![effect],
                })
            }
            Action::Dismiss { id } => Ok(Transition::plain(Outcome::Dismissed {
                id,
                removed: self.notifications.dismiss(id),
            })),
            Action::Expire { id } => Ok(Transition::plain(Outcome::Expired {
                id,
                removed: self.notifications.expire(id),
            })),
            Action::UpdateProfile(update) => {
                self.profile.apply(update)?;
                let (_, effect) =
                    self.enqueue(PROFILE_UPDATED_MESSAGE.to_string(), NotificationKind::Success, ctx.now);
                Ok(Transition {
                    outcome: Outcome::ProfileUpdated(self.profile.clone()),
                    effects: vec![effect],
                })
            }
        }
    }

    fn record_dream(&mut self, content: &str, ctx: &Context<'_>) -> JournalResult<Transition> {
        if content.trim().is_empty() {
            return Err(JournalError::InvalidArgument(
                "dream content must not be empty".to_string(),
            ));
        }
        let dream = self.dreams.record(content, ctx.now, ctx.entropy).clone();
        self.screen = Screen::DreamDetail(dream.id);
        let (_, effect) =
            self.enqueue(DREAM_RECORDED_MESSAGE.to_string(), NotificationKind::Success, ctx.now);
        Ok(Transition {
            outcome: Outcome::DreamRecorded(dream),
            effects: vec![effect],
        })
    }

    fn enqueue(
        &mut self,
        message: String,
        kind: NotificationKind,
        now: DateTime<FixedOffset>,
    ) -> (Notification, Effect) {
        let notification = self.notifications.notify(message, kind, now);
        let effect = Effect::ScheduleExpiry {
            id: notification.id,
            after: self.notifications.ttl(),
        };
        (notification, effect)
    }

    /// Retires overdue notifications, for runtimes whose timers may have been missed.
    pub fn sweep_notifications(&mut self, now: DateTime<FixedOffset>) -> Vec<NotificationId> {
        self.notifications.sweep(now)
    }

    pub fn dreams(&self) -> &DreamStore {
        &self.dreams
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.active()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn trend_stats(&self, now: DateTime<FixedOffset>) -> TrendStats {
        TrendStats::compute(self.dreams.list(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FixedEntropy;
    use chrono::TimeZone;

    static ENTROPY: FixedEntropy = FixedEntropy(0.4);

    fn ctx_at(second: u32) -> Context<'static> {
        Context {
            now: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2026, 10, 16, 21, 0, second)
                .unwrap(),
            entropy: &ENTROPY,
        }
    }

    fn record(journal: &mut Journal, content: &str) -> Transition {
        journal
            .apply(
                Action::RecordDream {
                    content: content.to_string(),
                },
                &ctx_at(0),
            )
            .unwrap()
    }

    #[test]
    fn recording_derives_notifies_and_opens_detail() {
        let mut journal = Journal::default();
        let transition = record(&mut journal, "A calm walk by the river");

        let Outcome::DreamRecorded(dream) = &transition.outcome else {
            panic!("unexpected outcome {:?}", transition.outcome);
        };
        assert_eq!(dream.id, DreamId(1));
        assert_eq!(dream.confidence, 88);
        assert_eq!(journal.screen(), Screen::DreamDetail(DreamId(1)));
        assert_eq!(journal.notifications().len(), 1);
        assert_eq!(journal.notifications()[0].message, DREAM_RECORDED_MESSAGE);
        assert_eq!(
            transition.effects,
            vec![Effect::ScheduleExpiry {
                id: journal.notifications()[0].id,
                after: DEFAULT_NOTIFICATION_TTL,
            }]
        );
    }

    #[test]
    fn blank_content_is_rejected_without_side_effects() {
        let mut journal = Journal::default();
        let err = journal
            .apply(
                Action::RecordDream {
                    content: " \n\t ".to_string(),
                },
                &ctx_at(0),
            )
            .unwrap_err();
        assert!(matches!(err, JournalError::InvalidArgument(_)));
        assert!(journal.dreams().is_empty());
        assert!(journal.notifications().is_empty());
        assert_eq!(journal.screen(), Screen::Home);
    }

    #[test]
    fn bookmark_toggle_reports_missing_ids() {
        let mut journal = Journal::default();
        record(&mut journal, "first");
        let hit = journal
            .apply(Action::ToggleBookmark { id: DreamId(1) }, &ctx_at(1))
            .unwrap();
        assert_eq!(
            hit.outcome,
            Outcome::BookmarkToggled {
                id: DreamId(1),
                bookmarked: Some(true)
            }
        );
        let miss = journal
            .apply(Action::ToggleBookmark { id: DreamId(9) }, &ctx_at(1))
            .unwrap();
        assert_eq!(
            miss.outcome,
            Outcome::BookmarkToggled {
                id: DreamId(9),
                bookmarked: None
            }
        );
    }

    #[test]
    fn opening_keeps_last_viewed_at_creation() {
        let mut journal = Journal::default();
        record(&mut journal, "first");
        journal
            .apply(Action::Navigate { screen: Screen::Journal }, &ctx_at(5))
            .unwrap();
        let opened = journal
            .apply(Action::OpenDream { id: DreamId(1) }, &ctx_at(30))
            .unwrap();
        let Outcome::DreamOpened(dream) = opened.outcome else {
            panic!("expected an opened dream");
        };
        assert_eq!(dream.last_viewed, ctx_at(0).now);
        assert_eq!(journal.screen(), Screen::DreamDetail(DreamId(1)));
    }

    #[test]
    fn navigation_to_unknown_dream_fails() {
        let mut journal = Journal::default();
        let err = journal
            .apply(
                Action::Navigate {
                    screen: Screen::DreamDetail(DreamId(3)),
                },
                &ctx_at(0),
            )
            .unwrap_err();
        assert!(matches!(err, JournalError::NotFound(_)));
        assert!(journal
            .apply(Action::OpenDream { id: DreamId(3) }, &ctx_at(0))
            .is_err());
        assert_eq!(journal.screen(), Screen::Home);
    }

    #[test]
    fn dismiss_and_expire_remove_exactly_once() {
        let mut journal = Journal::default();
        let notified = journal
            .apply(
                Action::Notify {
                    message: "Copied to clipboard".to_string(),
                    kind: NotificationKind::Info,
                },
                &ctx_at(0),
            )
            .unwrap();
        let Outcome::Notified(n) = notified.outcome else {
            panic!("expected a notification");
        };

        let dismissed = journal.apply(Action::Dismiss { id: n.id }, &ctx_at(1)).unwrap();
        assert_eq!(dismissed.outcome, Outcome::Dismissed { id: n.id, removed: true });
        assert!(journal.notifications().is_empty());

        let expired = journal.apply(Action::Expire { id: n.id }, &ctx_at(5)).unwrap();
        assert_eq!(expired.outcome, Outcome::Expired { id: n.id, removed: false });
        assert!(journal.notifications().is_empty());
    }

    #[test]
    fn configured_ttl_flows_into_effects() {
        let mut journal = Journal::new(JournalSettings {
            notification_ttl: Duration::from_millis(1500),
        });
        let transition = record(&mut journal, "short lived");
        assert!(matches!(
            transition.effects.as_slice(),
            [Effect::ScheduleExpiry { after, .. }] if *after == Duration::from_millis(1500)
        ));
        assert_eq!(journal.sweep_notifications(ctx_at(1).now), Vec::new());
        assert_eq!(journal.sweep_notifications(ctx_at(2).now).len(), 1);
    }

    #[test]
    fn profile_update_notifies_on_success_only() {
        let mut journal = Journal::default();
        let bad = journal.apply(
            Action::UpdateProfile(ProfileUpdate {
                name: Some(String::new()),
                ..Default::default()
            }),
            &ctx_at(0),
        );
        assert!(bad.is_err());
        assert!(journal.notifications().is_empty());

        let good = journal
            .apply(
                Action::UpdateProfile(ProfileUpdate {
                    subtitle: Some("Night watch".to_string()),
                    ..Default::default()
                }),
                &ctx_at(0),
            )
            .unwrap();
        assert_eq!(journal.profile().subtitle, "Night watch");
        assert_eq!(good.effects.len(), 1);
        assert_eq!(journal.notifications()[0].message, PROFILE_UPDATED_MESSAGE);
    }
}
