//! crates/dream_journal_core/src/store.rs
//!
//! The session-lifetime collection of dreams, newest first.

use chrono::{DateTime, FixedOffset};

use crate::derive::derive_dream;
use crate::domain::{Dream, DreamId};
use crate::ports::EntropySource;

#[derive(Debug, Clone)]
pub struct DreamStore {
    dreams: Vec<Dream>,
    next_id: u64,
}

impl Default for DreamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DreamStore {
    pub fn new() -> Self {
        Self {
            dreams: Vec::new(),
            next_id: 1,
        }
    }

    /// Hands out the next id. Ids are never reused, even if the record is never added.
    pub fn allocate_id(&mut self) -> DreamId {
        let id = DreamId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Derives a dream under a freshly allocated id and prepends it.
    pub fn record(
        &mut self,
        content: &str,
        now: DateTime<FixedOffset>,
        entropy: &dyn EntropySource,
    ) -> &Dream {
        let id = self.allocate_id();
        self.add_dream(derive_dream(id, content, now, entropy));
        &self.dreams[0]
    }

    /// Prepends without deduplication.
    pub fn add_dream(&mut self, dream: Dream) {
        if dream.id.0 >= self.next_id {
            self.next_id = dream.id.0 + 1;
        }
        self.dreams.insert(0, dream);
    }

    /// Flips the bookmark on the matching dream and returns the new value.
    /// An unknown id leaves the store untouched and returns `None`.
    pub fn toggle_bookmark(&mut self, id: DreamId) -> Option<bool> {
        let dream = self.dreams.iter_mut().find(|d| d.id == id)?;
        dream.is_bookmarked = !dream.is_bookmarked;
        Some(dream.is_bookmarked)
    }

    /// Case-insensitive substring match on title, content and tags, in store order.
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Dream> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.dreams.iter().collect();
        }
        self.dreams
            .iter()
            .filter(|d| {
                d.title.to_lowercase().contains(&needle)
                    || d.content.to_lowercase().contains(&needle)
                    || d.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn get(&self, id: DreamId) -> Option<&Dream> {
        self.dreams.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: DreamId) -> bool {
        self.get(id).is_some()
    }

    /// Newest first.
    pub fn list(&self) -> &[Dream] {
        &self.dreams
    }

    pub fn bookmarked(&self) -> impl Iterator<Item = &Dream> {
        self.dreams.iter().filter(|d| d.is_bookmarked)
    }

    pub fn len(&self) -> usize {
        self.dreams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dreams.is_empty()
    }
}
