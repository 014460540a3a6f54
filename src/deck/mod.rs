//! In-memory slide deck.
//!
//! The deck is the single source of truth for slide data. It owns the ordered
//! slide list plus the id of the slide selected for editing, and keeps the two
//! consistent: the deck is never empty and the active id always names a slide.

mod slide;

pub use slide::{random_background, PartialSlide, Slide};

use crate::types::SlideId;

/// Ordered slides plus the active selection.
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
    active_id: SlideId,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// A deck holding only the welcome slide.
    pub fn new() -> Self {
        Self::with_slide(Slide::welcome())
    }

    /// A deck holding a single given slide.
    pub fn with_slide(slide: Slide) -> Self {
        Self {
            active_id: slide.id.clone(),
            slides: vec![slide],
        }
    }

    /// All slides in display order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides (always at least one).
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Iterate over slide ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &SlideId> {
        self.slides.iter().map(|s| &s.id)
    }

    /// Whether a slide with `id` exists.
    pub fn contains(&self, id: &SlideId) -> bool {
        self.position(id).is_some()
    }

    /// Index of the slide with `id`.
    pub fn position(&self, id: &SlideId) -> Option<usize> {
        self.slides.iter().position(|s| &s.id == id)
    }

    /// Look a slide up by id.
    pub fn get(&self, id: &SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| &s.id == id)
    }

    /// The id currently selected for editing.
    pub const fn active_id(&self) -> &SlideId {
        &self.active_id
    }

    /// The active slide, or the first slide if the selection is stale.
    pub fn active(&self) -> &Slide {
        self.get(&self.active_id).unwrap_or(&self.slides[0])
    }

    /// Position of the active slide in the deck.
    pub fn active_index(&self) -> usize {
        self.position(&self.active_id).unwrap_or(0)
    }

    /// Append a slide and make it active.
    pub fn add(&mut self, slide: Slide) {
        tracing::debug!(id = %slide.id, "adding slide");
        self.active_id = slide.id.clone();
        self.slides.push(slide);
    }

    /// Append a batch in order; the first of the batch becomes active.
    pub fn add_many(&mut self, slides: Vec<Slide>) {
        let Some(first) = slides.first() else {
            return;
        };
        tracing::debug!(count = slides.len(), "adding slide batch");
        self.active_id = first.id.clone();
        self.slides.extend(slides);
    }

    /// Replace the slide with `id`. The stored slide keeps `id` whatever the value carries.
    pub fn update(&mut self, id: &SlideId, slide: Slide) {
        if let Some(existing) = self.slides.iter_mut().find(|s| &s.id == id) {
            *existing = slide.with_id(id.clone());
        }
    }

    /// Remove the slide with `id`.
    ///
    /// Refused when it is the last slide. Returns whether a slide was removed.
    pub fn delete(&mut self, id: &SlideId) -> bool {
        if self.slides.len() <= 1 {
            return false;
        }
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.slides.remove(pos);
        tracing::debug!(%id, remaining = self.slides.len(), "deleted slide");
        if &self.active_id == id {
            self.active_id = self.slides[0].id.clone();
        }
        true
    }

    /// Make `id` active; an unknown id selects the first slide.
    pub fn select(&mut self, id: &SlideId) {
        self.active_id = if self.contains(id) {
            id.clone()
        } else {
            self.slides[0].id.clone()
        };
    }

    /// Move the selection one slide right, stopping at the end.
    pub fn select_next(&mut self) {
        let idx = (self.active_index() + 1).min(self.slides.len() - 1);
        self.active_id = self.slides[idx].id.clone();
    }

    /// Move the selection one slide left, stopping at the start.
    pub fn select_previous(&mut self) {
        let idx = self.active_index().saturating_sub(1);
        self.active_id = self.slides[idx].id.clone();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::{Layout, Theme};

    fn slide(id: &str) -> Slide {
        Slide::blank().with_id(SlideId::new(id))
    }

    fn deck_of(ids: &[&str]) -> Deck {
        let mut deck = Deck::with_slide(slide(ids[0]));
        for id in &ids[1..] {
            deck.add(slide(id));
        }
        deck
    }

    fn order(deck: &Deck) -> Vec<&str> {
        deck.ids().map(SlideId::as_str).collect()
    }

    #[test]
    fn new_deck_has_one_active_welcome_slide() {
        let deck = Deck::new();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.active().title, "Welcome to GenSignage");
        assert_eq!(deck.active_id(), &deck.slides()[0].id);
    }

    #[test]
    fn delete_last_slide_is_refused() {
        let mut deck = deck_of(&["a"]);
        let before = deck.slides().to_vec();
        assert!(!deck.delete(&SlideId::new("a")));
        assert_eq!(deck.slides(), before.as_slice());
        assert_eq!(deck.active_id().as_str(), "a");
    }

    #[test]
    fn deleting_active_selects_first_remaining() {
        let mut deck = deck_of(&["a", "b", "c"]);
        deck.select(&SlideId::new("b"));
        assert!(deck.delete(&SlideId::new("b")));
        assert_eq!(order(&deck), ["a", "c"]);
        assert_eq!(deck.active_id().as_str(), "a");

        let mut deck = deck_of(&["a", "b", "c"]);
        deck.select(&SlideId::new("a"));
        assert!(deck.delete(&SlideId::new("a")));
        assert_eq!(deck.active_id().as_str(), "b");
    }

    #[test]
    fn deleting_inactive_keeps_selection() {
        let mut deck = deck_of(&["a", "b", "c"]);
        assert_eq!(deck.active_id().as_str(), "c");
        assert!(deck.delete(&SlideId::new("a")));
        assert_eq!(deck.active_id().as_str(), "c");
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut deck = deck_of(&["a", "b"]);
        assert!(!deck.delete(&SlideId::new("zzz")));
        assert_eq!(order(&deck), ["a", "b"]);
    }

    #[test]
    fn add_then_select_round_trips() {
        let mut deck = deck_of(&["a"]);
        let added = slide("b");
        deck.add(added.clone());
        deck.select(&SlideId::new("a"));
        deck.select(&added.id);
        assert_eq!(deck.active(), &added);
    }

    #[test]
    fn add_appends_and_activates() {
        let mut deck = deck_of(&["a", "b"]);
        deck.select(&SlideId::new("a"));
        deck.add(slide("c"));
        assert_eq!(order(&deck), ["a", "b", "c"]);
        assert_eq!(deck.active_id().as_str(), "c");
    }

    #[test]
    fn add_many_activates_first_of_batch() {
        let mut deck = deck_of(&["a"]);
        deck.add_many(vec![slide("x"), slide("y"), slide("z")]);
        assert_eq!(order(&deck), ["a", "x", "y", "z"]);
        assert_eq!(deck.active_id().as_str(), "x");
    }

    #[test]
    fn add_many_empty_is_noop() {
        let mut deck = deck_of(&["a", "b"]);
        deck.select(&SlideId::new("a"));
        deck.add_many(Vec::new());
        assert_eq!(order(&deck), ["a", "b"]);
        assert_eq!(deck.active_id().as_str(), "a");
    }

    #[test]
    fn update_replaces_only_target() {
        let mut deck = deck_of(&["a", "b", "c"]);
        let untouched = deck.get(&SlideId::new("a")).cloned().unwrap();
        let mut changed = deck.get(&SlideId::new("b")).cloned().unwrap();
        changed.title = "Changed".into();
        changed.theme = Theme::Blue;
        changed.layout = Layout::ImageOnly;
        changed.duration = 900;

        deck.update(&changed.id.clone(), changed.clone());
        deck.update(&changed.id.clone(), changed.clone());

        assert_eq!(deck.get(&SlideId::new("b")), Some(&changed));
        assert_eq!(deck.get(&SlideId::new("a")), Some(&untouched));
        assert_eq!(deck.len(), 3);
    }

    #[test]
    fn update_keeps_identity() {
        let mut deck = deck_of(&["a", "b"]);
        let imposter = slide("other");
        deck.update(&SlideId::new("a"), imposter);
        assert_eq!(order(&deck), ["a", "b"]);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut deck = deck_of(&["a"]);
        let before = deck.slides().to_vec();
        deck.update(&SlideId::new("missing"), slide("missing"));
        assert_eq!(deck.slides(), before.as_slice());
    }

    #[test]
    fn select_unknown_falls_back_to_first() {
        let mut deck = deck_of(&["a", "b"]);
        deck.select(&SlideId::new("nope"));
        assert_eq!(deck.active_id().as_str(), "a");
        assert_eq!(deck.active().id.as_str(), "a");
    }

    #[test]
    fn keyboard_navigation_clamps_at_edges() {
        let mut deck = deck_of(&["a", "b", "c"]);
        deck.select_next();
        assert_eq!(deck.active_id().as_str(), "c");
        deck.select_previous();
        deck.select_previous();
        deck.select_previous();
        assert_eq!(deck.active_id().as_str(), "a");
        assert_eq!(deck.active_index(), 0);
    }
}
