//! crates/dream_journal_core/src/derive.rs
//!
//! Turns raw dream text into a structured [`Dream`].
//!
//! Every lookup here is a substring check against the lower-cased content.
//! Themes, symbols and references are independent checks whose declaration order
//! is their priority when the output is capped. Tone and category are first-match-wins
//! rule lists: the first rule with any keyword present decides the value.

use chrono::{DateTime, FixedOffset};

use crate::domain::{BiblicalRef, Dream, DreamCategory, DreamId, EmotionalTone, TimeOfDay};
use crate::ports::EntropySource;

pub const MAX_THEMES: usize = 3;
pub const MAX_SYMBOLS: usize = 5;
pub const MAX_REFERENCES: usize = 3;

const TITLE_WORDS: usize = 4;
const CONFIDENCE_FLOOR: u8 = 80;
const CONFIDENCE_SPAN: u8 = 20;

//=========================================================================================
// Keyword Tables
//=========================================================================================

/// An ordered (keywords, result) pair. Matches when any keyword occurs in the content.
pub struct KeywordRule<T> {
    pub keywords: &'static [&'static str],
    pub value: T,
}

impl<T> KeywordRule<T> {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

pub const THEME_RULES: &[KeywordRule<&str>] = &[
    KeywordRule { keywords: &["light", "bright"], value: "Revelation" },
    KeywordRule { keywords: &["water", "ocean", "river", "rain"], value: "Cleansing" },
    KeywordRule { keywords: &["fly", "soar", "wings"], value: "Freedom" },
    KeywordRule { keywords: &["mountain", "climb"], value: "Obstacles" },
    KeywordRule { keywords: &["fall"], value: "Surrender" },
    KeywordRule { keywords: &["chase", "chasing", "pursued"], value: "Avoidance" },
    KeywordRule { keywords: &["death", "dying", "funeral"], value: "Transformation" },
    KeywordRule { keywords: &["house", "home"], value: "Identity" },
];

pub const SYMBOL_RULES: &[KeywordRule<&str>] = &[
    KeywordRule { keywords: &["water", "ocean", "river", "rain"], value: "💧 Water" },
    KeywordRule { keywords: &["light", "bright"], value: "💡 Light" },
    KeywordRule { keywords: &["mountain"], value: "⛰️ Mountain" },
    KeywordRule { keywords: &["fly", "bird", "wings"], value: "🕊️ Flight" },
    KeywordRule { keywords: &["fire", "flame"], value: "🔥 Fire" },
    KeywordRule { keywords: &["tree", "garden"], value: "🌳 Tree" },
    KeywordRule { keywords: &["door", "gate"], value: "🚪 Door" },
    KeywordRule { keywords: &["snake", "serpent"], value: "🐍 Serpent" },
    KeywordRule { keywords: &["house", "home"], value: "🏠 House" },
    KeywordRule { keywords: &["child", "baby"], value: "👶 Child" },
];

/// First match wins.
pub const TONE_RULES: &[KeywordRule<EmotionalTone>] = &[
    KeywordRule { keywords: &["peace", "calm"], value: EmotionalTone::Peaceful },
    KeywordRule { keywords: &["fear", "afraid"], value: EmotionalTone::Anxious },
    KeywordRule { keywords: &["joy", "happy"], value: EmotionalTone::Joyful },
    KeywordRule { keywords: &["sad", "cry"], value: EmotionalTone::Sorrowful },
    KeywordRule { keywords: &["anger", "frustrated"], value: EmotionalTone::Troubled },
];

/// First match wins.
pub const CATEGORY_RULES: &[KeywordRule<DreamCategory>] = &[
    KeywordRule { keywords: &["future", "vision"], value: DreamCategory::Prophetic },
    KeywordRule { keywords: &["warning", "danger"], value: DreamCategory::Warning },
    KeywordRule { keywords: &["peace", "comfort"], value: DreamCategory::Encouragement },
];

pub struct Scripture {
    pub verse: &'static str,
    pub text: &'static str,
    pub relevance: &'static str,
}

impl Scripture {
    fn to_ref(&self) -> BiblicalRef {
        BiblicalRef {
            verse: self.verse.to_string(),
            text: self.text.to_string(),
            relevance: self.relevance.to_string(),
        }
    }
}

pub const REFERENCE_RULES: &[KeywordRule<Scripture>] = &[
    KeywordRule {
        keywords: &["water"],
        value: Scripture {
            verse: "Psalm 42:1",
            text: "As the deer pants for streams of water, so my soul pants for you, my God.",
            relevance: "Spiritual thirst and the cleansing presence of God",
        },
    },
    KeywordRule {
        keywords: &["light", "bright"],
        value: Scripture {
            verse: "Psalm 119:105",
            text: "Your word is a lamp for my feet, a light on my path.",
            relevance: "Divine guidance and revelation",
        },
    },
    KeywordRule {
        keywords: &["mountain"],
        value: Scripture {
            verse: "Matthew 17:20",
            text: "If you have faith as small as a mustard seed, you can say to this mountain, \
                   'Move from here to there,' and it will move.",
            relevance: "Faith that overcomes obstacles",
        },
    },
];

/// Appended after the keyword matches, before the list is capped.
pub const FALLBACK_REFERENCE: Scripture = Scripture {
    verse: "Joel 2:28",
    text: "And afterward, I will pour out my Spirit on all people. Your sons and daughters \
           will prophesy, your old men will dream dreams, your young men will see visions.",
    relevance: "God speaks through dreams and visions",
};

const OPENING: &str =
    "This dream carries spiritual significance and may hold a message for your current season.";

/// Appended in this order when the theme is present.
const THEME_CLAUSES: &[(&str, &str)] = &[
    (
        "Cleansing",
        "The presence of water points to cleansing and renewal, a washing away of old burdens.",
    ),
    (
        "Freedom",
        "Flight speaks of freedom and of rising above your present circumstances.",
    ),
    (
        "Revelation",
        "Light signals revelation, with divine guidance illuminating the path ahead.",
    ),
    (
        "Obstacles",
        "The mountain represents a challenge that faith is able to move.",
    ),
];

const EXHORTATION: &str =
    "Take time to pray and reflect on what this dream may be revealing to you.";

//=========================================================================================
// Derivation
//=========================================================================================

/// Builds a complete dream record from `content`.
///
/// The caller must reject blank content first; a blank string yields an empty title.
/// Apart from `entropy` (confidence only) the result depends on nothing but the inputs.
pub fn derive_dream(
    id: DreamId,
    content: &str,
    now: DateTime<FixedOffset>,
    entropy: &dyn EntropySource,
) -> Dream {
    let lowered = content.to_lowercase();

    let themes = collect_labels(THEME_RULES, &lowered, MAX_THEMES);
    let symbols = collect_labels(SYMBOL_RULES, &lowered, MAX_SYMBOLS);
    let emotional_tone = first_match(TONE_RULES, &lowered).unwrap_or(EmotionalTone::Neutral);
    let category = first_match(CATEGORY_RULES, &lowered).unwrap_or(DreamCategory::Revelation);
    let interpretation = compose_interpretation(&themes, emotional_tone);
    let biblical_refs = select_references(&lowered);
    let tags = build_tags(&themes, TimeOfDay::at(&now));

    Dream {
        id,
        title: derive_title(content),
        content: content.to_string(),
        date: now.format("%-m/%-d/%Y").to_string(),
        timestamp: now,
        themes,
        symbols,
        interpretation,
        biblical_refs,
        emotional_tone,
        mood: emotional_tone.mood(),
        category,
        confidence: confidence_from(entropy.next_unit()),
        is_bookmarked: false,
        tags,
        last_viewed: now,
    }
}

/// First four whitespace-separated words, with `...` when more follow.
pub fn derive_title(content: &str) -> String {
    let words: Vec<&str> = content.split_whitespace().collect();
    let mut title = words
        .iter()
        .take(TITLE_WORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() > TITLE_WORDS {
        title.push_str("...");
    }
    title
}

fn collect_labels(rules: &[KeywordRule<&'static str>], lowered: &str, cap: usize) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| rule.matches(lowered))
        .take(cap)
        .map(|rule| rule.value.to_string())
        .collect()
}

fn first_match<T: Copy>(rules: &[KeywordRule<T>], lowered: &str) -> Option<T> {
    rules.iter().find(|rule| rule.matches(lowered)).map(|rule| rule.value)
}

fn compose_interpretation(themes: &[String], tone: EmotionalTone) -> String {
    let mut parts = vec![OPENING.to_string()];
    for (theme, clause) in THEME_CLAUSES {
        if themes.iter().any(|t| t == theme) {
            parts.push((*clause).to_string());
        }
    }
    parts.push(format!(
        "The {} tone of this dream reflects the present condition of your heart.",
        tone.label().to_lowercase()
    ));
    parts.push(EXHORTATION.to_string());
    parts.join(" ")
}

/// Keyword references, then the fallback, then the cap. Three keyword matches
/// therefore push the fallback out.
fn select_references(lowered: &str) -> Vec<BiblicalRef> {
    let mut refs: Vec<BiblicalRef> = REFERENCE_RULES
        .iter()
        .filter(|rule| rule.matches(lowered))
        .map(|rule| rule.value.to_ref())
        .collect();
    refs.push(FALLBACK_REFERENCE.to_ref());
    refs.truncate(MAX_REFERENCES);
    refs
}

/// Matched themes plus the time-of-day tag, de-duplicated in first-seen order.
pub fn build_tags(themes: &[String], time_of_day: TimeOfDay) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(themes.len() + 1);
    let candidates = themes.iter().map(String::as_str).chain(std::iter::once(time_of_day.label()));
    for tag in candidates {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Maps a unit draw onto `[80, 99]`. Out-of-range draws are clamped.
pub fn confidence_from(unit: f64) -> u8 {
    let offset = (unit * f64::from(CONFIDENCE_SPAN)).floor();
    let offset = if offset.is_nan() {
        0.0
    } else {
        offset.clamp(0.0, f64::from(CONFIDENCE_SPAN - 1))
    };
    CONFIDENCE_FLOOR + offset as u8
}
