//! crates/dream_journal_core/src/profile.rs
//!
//! The session's user profile. `selected_llm` is shown in the UI and has no effect
//! on interpretation output.

use std::fmt;
use std::str::FromStr;

use crate::error::{JournalError, JournalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageModel {
    #[default]
    Gpt4o,
    Claude,
    Gemini,
    Llama3,
}

impl LanguageModel {
    pub const ALL: [LanguageModel; 4] = [
        LanguageModel::Gpt4o,
        LanguageModel::Claude,
        LanguageModel::Gemini,
        LanguageModel::Llama3,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            LanguageModel::Gpt4o => "GPT-4o",
            LanguageModel::Claude => "Claude",
            LanguageModel::Gemini => "Gemini",
            LanguageModel::Llama3 => "Llama 3",
        }
    }
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for LanguageModel {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageModel::ALL
            .into_iter()
            .find(|m| m.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| JournalError::InvalidArgument(format!("unknown model '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub subtitle: String,
    /// A `data:image/...;base64,` URL, or empty.
    pub profile_image: String,
    pub selected_llm: LanguageModel,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Dreamer".to_string(),
            subtitle: "Seeking divine wisdom through dreams".to_string(),
            profile_image: String::new(),
            selected_llm: LanguageModel::default(),
        }
    }
}

/// A partial edit from the profile form. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub profile_image: Option<String>,
    pub selected_llm: Option<LanguageModel>,
}

impl UserProfile {
    /// Validates the whole update before touching any field.
    pub fn apply(&mut self, update: ProfileUpdate) -> JournalResult<()> {
        let name = match update.name {
            Some(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(JournalError::InvalidArgument(
                        "profile name must not be empty".to_string(),
                    ));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };
        if let Some(image) = &update.profile_image {
            if !image.is_empty() && !is_image_data_url(image) {
                return Err(JournalError::InvalidArgument(
                    "profile image must be a base64 image data URL".to_string(),
                ));
            }
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(subtitle) = update.subtitle {
            self.subtitle = subtitle.trim().to_string();
        }
        if let Some(image) = update.profile_image {
            self.profile_image = image;
        }
        if let Some(model) = update.selected_llm {
            self.selected_llm = model;
        }
        Ok(())
    }
}

/// `data:image/<subtype>;base64,<payload>` with a non-empty base64 payload.
pub fn is_image_data_url(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("data:image/") else {
        return false;
    };
    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return false;
    };
    let subtype_ok = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    let payload_ok = !payload.is_empty()
        && payload
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='));
    subtype_ok && payload_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_applies_present_fields_only() {
        let mut profile = UserProfile::default();
        profile
            .apply(ProfileUpdate {
                name: Some("  Miriam ".to_string()),
                selected_llm: Some(LanguageModel::Claude),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(profile.name, "Miriam");
        assert_eq!(profile.selected_llm, LanguageModel::Claude);
        assert_eq!(profile.subtitle, UserProfile::default().subtitle);
    }

    #[test]
    fn invalid_update_leaves_profile_untouched() {
        let mut profile = UserProfile::default();
        let err = profile
            .apply(ProfileUpdate {
                subtitle: Some("new subtitle".to_string()),
                profile_image: Some("https://example.com/me.png".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, JournalError::InvalidArgument(_)));
        assert_eq!(profile, UserProfile::default());

        assert!(profile
            .apply(ProfileUpdate {
                name: Some("   ".to_string()),
                ..Default::default()
            })
            .is_err());
    }

    #[test]
    fn image_can_be_set_and_cleared() {
        let mut profile = UserProfile::default();
        let url = "data:image/png;base64,iVBORw0KGgo=".to_string();
        profile
            .apply(ProfileUpdate {
                profile_image: Some(url.clone()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(profile.profile_image, url);
        profile
            .apply(ProfileUpdate {
                profile_image: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
        assert!(profile.profile_image.is_empty());
    }

    #[test]
    fn data_url_shape() {
        assert!(is_image_data_url("data:image/svg+xml;base64,PHN2Zz4="));
        assert!(!is_image_data_url("data:image/png;base64,"));
        assert!(!is_image_data_url("data:text/plain;base64,aGk="));
        assert!(!is_image_data_url("data:image/png,raw"));
    }

    #[test]
    fn model_names_parse_case_insensitively() {
        assert_eq!("llama 3".parse::<LanguageModel>().unwrap(), LanguageModel::Llama3);
        assert_eq!("GPT-4o".parse::<LanguageModel>().unwrap(), LanguageModel::Gpt4o);
        assert!("gpt-2".parse::<LanguageModel>().is_err());
    }
}
