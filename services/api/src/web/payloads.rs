//! services/api/src/web/payloads.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API server,
//! and their conversions from the core domain types. Field names are camelCase to
//! match the client.

use axum::http::StatusCode;
use dream_journal_core::domain::{
    BiblicalRef, Dream, DreamId, Notification, NotificationKind, Screen,
};
use dream_journal_core::ports::PortError;
use dream_journal_core::profile::{LanguageModel, ProfileUpdate, UserProfile};
use dream_journal_core::stats::TrendStats;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Requests FROM the Client
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateDreamRequest {
    /// The dream as typed or transcribed. Must not be blank.
    pub content: String,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive text matched against title, content and tags.
    pub q: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateNotificationRequest {
    pub message: String,
    pub kind: NotificationKindPayload,
}

#[derive(Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub profile_image: Option<String>,
    /// One of the display names listed in `availableModels`.
    pub selected_llm: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_update(self) -> Result<ProfileUpdate, PortError> {
        let selected_llm = self
            .selected_llm
            .map(|name| name.parse::<LanguageModel>())
            .transpose()
            .map_err(PortError::from)?;
        Ok(ProfileUpdate {
            name: self.name,
            subtitle: self.subtitle,
            profile_image: self.profile_image,
            selected_llm,
        })
    }
}

//=========================================================================================
// Responses TO the Client
//=========================================================================================

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DreamResponse {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub date: String,
    /// RFC 3339 creation instant.
    pub timestamp: String,
    pub themes: Vec<String>,
    pub symbols: Vec<String>,
    pub interpretation: String,
    pub biblical_refs: Vec<BiblicalRefResponse>,
    pub emotional_tone: String,
    pub mood: String,
    pub category: String,
    pub confidence: u8,
    pub is_bookmarked: bool,
    pub tags: Vec<String>,
    pub last_viewed: String,
}

impl From<Dream> for DreamResponse {
    fn from(dream: Dream) -> Self {
        Self {
            id: dream.id.0,
            title: dream.title,
            content: dream.content,
            date: dream.date,
            timestamp: dream.timestamp.to_rfc3339(),
            themes: dream.themes,
            symbols: dream.symbols,
            interpretation: dream.interpretation,
            biblical_refs: dream.biblical_refs.into_iter().map(Into::into).collect(),
            emotional_tone: dream.emotional_tone.label().to_string(),
            mood: dream.mood.label().to_string(),
            category: dream.category.label().to_string(),
            confidence: dream.confidence,
            is_bookmarked: dream.is_bookmarked,
            tags: dream.tags,
            last_viewed: dream.last_viewed.to_rfc3339(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct BiblicalRefResponse {
    pub verse: String,
    pub text: String,
    pub relevance: String,
}

impl From<BiblicalRef> for BiblicalRefResponse {
    fn from(r: BiblicalRef) -> Self {
        Self {
            verse: r.verse,
            text: r.text,
            relevance: r.relevance,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: u64,
    pub is_bookmarked: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKindPayload {
    Info,
    Success,
    Error,
}

impl From<NotificationKind> for NotificationKindPayload {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Info => Self::Info,
            NotificationKind::Success => Self::Success,
            NotificationKind::Error => Self::Error,
        }
    }
}

impl From<NotificationKindPayload> for NotificationKind {
    fn from(kind: NotificationKindPayload) -> Self {
        match kind {
            NotificationKindPayload::Info => Self::Info,
            NotificationKindPayload::Success => Self::Success,
            NotificationKindPayload::Error => Self::Error,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKindPayload,
    pub timestamp: String,
    pub expires_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id.0,
            message: n.message,
            kind: n.kind.into(),
            timestamp: n.timestamp.to_rfc3339(),
            expires_at: n.expires_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub name: String,
    pub subtitle: String,
    pub profile_image: String,
    pub selected_llm: String,
    pub available_models: Vec<String>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            name: profile.name,
            subtitle: profile.subtitle,
            profile_image: profile.profile_image,
            selected_llm: profile.selected_llm.display_name().to_string(),
            available_models: LanguageModel::ALL
                .iter()
                .map(|m| m.display_name().to_string())
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug, PartialEq, Eq)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

impl CountEntry {
    fn new(label: &str, count: usize) -> Self {
        Self {
            label: label.to_string(),
            count,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_dreams: usize,
    pub bookmarked: usize,
    pub dreams_this_week: usize,
    pub average_confidence: u8,
    pub mood_breakdown: Vec<CountEntry>,
    pub category_breakdown: Vec<CountEntry>,
    pub time_of_day_breakdown: Vec<CountEntry>,
    pub top_themes: Vec<CountEntry>,
}

impl From<TrendStats> for StatsResponse {
    fn from(stats: TrendStats) -> Self {
        Self {
            total_dreams: stats.total_dreams,
            bookmarked: stats.bookmarked,
            dreams_this_week: stats.dreams_this_week,
            average_confidence: stats.average_confidence,
            mood_breakdown: stats
                .mood_breakdown
                .iter()
                .map(|(m, n)| CountEntry::new(m.label(), *n))
                .collect(),
            category_breakdown: stats
                .category_breakdown
                .iter()
                .map(|(c, n)| CountEntry::new(c.label(), *n))
                .collect(),
            time_of_day_breakdown: stats
                .time_of_day_breakdown
                .iter()
                .map(|(t, n)| CountEntry::new(t.label(), *n))
                .collect(),
            top_themes: stats
                .top_themes
                .iter()
                .map(|(t, n)| CountEntry::new(t, *n))
                .collect(),
        }
    }
}

//=========================================================================================
// Navigation
//=========================================================================================

/// The screen the client shows, e.g. `{"screen": "dream_detail", "dream_id": 3}`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenPayload {
    Home,
    Record,
    Journal,
    Insights,
    Profile,
    DreamDetail { dream_id: u64 },
}

impl From<Screen> for ScreenPayload {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Home => Self::Home,
            Screen::Record => Self::Record,
            Screen::Journal => Self::Journal,
            Screen::Insights => Self::Insights,
            Screen::Profile => Self::Profile,
            Screen::DreamDetail(id) => Self::DreamDetail { dream_id: id.0 },
        }
    }
}

impl From<ScreenPayload> for Screen {
    fn from(screen: ScreenPayload) -> Self {
        match screen {
            ScreenPayload::Home => Self::Home,
            ScreenPayload::Record => Self::Record,
            ScreenPayload::Journal => Self::Journal,
            ScreenPayload::Insights => Self::Insights,
            ScreenPayload::Profile => Self::Profile,
            ScreenPayload::DreamDetail { dream_id } => Self::DreamDetail(DreamId(dream_id)),
        }
    }
}

//=========================================================================================
// Error Mapping
//=========================================================================================

/// Maps a port failure to the `(StatusCode, String)` shape every handler returns.
pub fn port_error_response(action: &str, err: PortError) -> (StatusCode, String) {
    match err {
        PortError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("Not found: {}", msg)),
        PortError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
        PortError::Unexpected(msg) => {
            error!("Failed to {}: {}", action, msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {}", action),
            )
        }
    }
}
