//! crates/dream_journal_core/src/stats.rs
//!
//! Trend statistics for the insights screen.

use chrono::{DateTime, Duration, FixedOffset};

use crate::domain::{Dream, DreamCategory, Mood, TimeOfDay};

const TOP_THEMES: usize = 5;
const WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendStats {
    pub total_dreams: usize,
    pub bookmarked: usize,
    /// Dreams created within the seven days before `now`.
    pub dreams_this_week: usize,
    /// Rounded mean confidence; zero for an empty journal.
    pub average_confidence: u8,
    pub mood_breakdown: Vec<(Mood, usize)>,
    pub category_breakdown: Vec<(DreamCategory, usize)>,
    pub time_of_day_breakdown: Vec<(TimeOfDay, usize)>,
    /// Most frequent themes, ties broken by which theme appeared first.
    pub top_themes: Vec<(String, usize)>,
}

impl TrendStats {
    /// `dreams` is in store order (newest first).
    pub fn compute(dreams: &[Dream], now: DateTime<FixedOffset>) -> Self {
        let week_start = now - Duration::days(WEEK_DAYS);

        let average_confidence = if dreams.is_empty() {
            0
        } else {
            let sum: u32 = dreams.iter().map(|d| u32::from(d.confidence)).sum();
            (f64::from(sum) / dreams.len() as f64).round() as u8
        };

        let mood_breakdown = Mood::ALL
            .into_iter()
            .map(|mood| (mood, dreams.iter().filter(|d| d.mood == mood).count()))
            .collect();
        let category_breakdown = DreamCategory::ALL
            .into_iter()
            .map(|cat| (cat, dreams.iter().filter(|d| d.category == cat).count()))
            .collect();
        let time_of_day_breakdown = TimeOfDay::ALL
            .into_iter()
            .map(|slot| {
                let label = slot.label();
                (slot, dreams.iter().filter(|d| d.tags.iter().any(|t| t == label)).count())
            })
            .collect();

        Self {
            total_dreams: dreams.len(),
            bookmarked: dreams.iter().filter(|d| d.is_bookmarked).count(),
            dreams_this_week: dreams
                .iter()
                .filter(|d| d.timestamp > week_start && d.timestamp <= now)
                .count(),
            average_confidence,
            mood_breakdown,
            category_breakdown,
            time_of_day_breakdown,
            top_themes: rank_themes(dreams),
        }
    }
}

fn rank_themes(dreams: &[Dream]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for theme in dreams.iter().rev().flat_map(|d| d.themes.iter()) {
        match counts.iter_mut().find(|(t, _)| t == theme) {
            Some((_, n)) => *n += 1,
            None => counts.push((theme.clone(), 1)),
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_THEMES);
    counts
}
