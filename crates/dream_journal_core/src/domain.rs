//! crates/dream_journal_core/src/domain.rs
//!
//! Defines the pure, core data structures for the dream journal.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, FixedOffset, Timelike};
use std::fmt;

//=========================================================================================
// Identifiers
//=========================================================================================

/// Identifies a dream within the store. Assigned once and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DreamId(pub u64);

impl fmt::Display for DreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a notification. Derived from its creation time in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//=========================================================================================
// Dream
//=========================================================================================

/// One journaled dream and its derived interpretation.
///
/// Only `is_bookmarked` changes after creation; `content` is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Dream {
    pub id: DreamId,
    pub title: String,
    pub content: String,
    /// Human-readable creation date, e.g. `10/16/2026`.
    pub date: String,
    pub timestamp: DateTime<FixedOffset>,
    pub themes: Vec<String>,
    pub symbols: Vec<String>,
    pub interpretation: String,
    pub biblical_refs: Vec<BiblicalRef>,
    pub emotional_tone: EmotionalTone,
    pub mood: Mood,
    pub category: DreamCategory,
    pub confidence: u8,
    pub is_bookmarked: bool,
    pub tags: Vec<String>,
    /// Set at creation only.
    pub last_viewed: DateTime<FixedOffset>,
}

/// A scripture cross-reference attached to a dream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiblicalRef {
    pub verse: String,
    pub text: String,
    pub relevance: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionalTone {
    Peaceful,
    Anxious,
    Joyful,
    Sorrowful,
    Troubled,
    Neutral,
}

impl EmotionalTone {
    pub fn label(self) -> &'static str {
        match self {
            EmotionalTone::Peaceful => "Peaceful",
            EmotionalTone::Anxious => "Anxious",
            EmotionalTone::Joyful => "Joyful",
            EmotionalTone::Sorrowful => "Sorrowful",
            EmotionalTone::Troubled => "Troubled",
            EmotionalTone::Neutral => "Neutral",
        }
    }

    /// The mood is a pure function of the tone.
    pub fn mood(self) -> Mood {
        match self {
            EmotionalTone::Peaceful | EmotionalTone::Joyful => Mood::Positive,
            EmotionalTone::Neutral => Mood::Neutral,
            _ => Mood::Challenging,
        }
    }
}

impl fmt::Display for EmotionalTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Positive,
    Neutral,
    Challenging,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Positive, Mood::Neutral, Mood::Challenging];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Positive => "Positive",
            Mood::Neutral => "Neutral",
            Mood::Challenging => "Challenging",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DreamCategory {
    Prophetic,
    Warning,
    Encouragement,
    Revelation,
}

impl DreamCategory {
    pub const ALL: [DreamCategory; 4] = [
        DreamCategory::Prophetic,
        DreamCategory::Warning,
        DreamCategory::Encouragement,
        DreamCategory::Revelation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DreamCategory::Prophetic => "prophetic",
            DreamCategory::Warning => "warning",
            DreamCategory::Encouragement => "encouragement",
            DreamCategory::Revelation => "revelation",
        }
    }
}

impl fmt::Display for DreamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The single time-of-day tag every dream carries, taken from its local creation hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    LateNight,
    EarlyMorning,
    Daytime,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::LateNight,
        TimeOfDay::EarlyMorning,
        TimeOfDay::Daytime,
        TimeOfDay::Evening,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=8 => TimeOfDay::EarlyMorning,
            9..=17 => TimeOfDay::Daytime,
            18..=21 => TimeOfDay::Evening,
            // 22:00 through 04:59
            _ => TimeOfDay::LateNight,
        }
    }

    pub fn at(instant: &DateTime<FixedOffset>) -> Self {
        Self::from_hour(instant.hour())
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::LateNight => "Late Night",
            TimeOfDay::EarlyMorning => "Early Morning",
            TimeOfDay::Daytime => "Daytime",
            TimeOfDay::Evening => "Evening",
        }
    }
}

//=========================================================================================
// Notification
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// An ephemeral status message. Owned by the notification queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub timestamp: DateTime<FixedOffset>,
    pub expires_at: DateTime<FixedOffset>,
}

//=========================================================================================
// Navigation
//=========================================================================================

/// The screen the single-page client is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Record,
    Journal,
    Insights,
    Profile,
    DreamDetail(DreamId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::LateNight);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::LateNight);
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::LateNight);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::EarlyMorning);
        assert_eq!(TimeOfDay::from_hour(8), TimeOfDay::EarlyMorning);
        assert_eq!(TimeOfDay::from_hour(9), TimeOfDay::Daytime);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Daytime);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
    }

    #[test]
    fn mood_follows_tone() {
        assert_eq!(EmotionalTone::Peaceful.mood(), Mood::Positive);
        assert_eq!(EmotionalTone::Joyful.mood(), Mood::Positive);
        assert_eq!(EmotionalTone::Neutral.mood(), Mood::Neutral);
        assert_eq!(EmotionalTone::Anxious.mood(), Mood::Challenging);
        assert_eq!(EmotionalTone::Sorrowful.mood(), Mood::Challenging);
        assert_eq!(EmotionalTone::Troubled.mood(), Mood::Challenging);
    }
}
