//! Gallery session, the single owner of all gallery state.
//!
//! Input handlers never poke fields directly; they feed a [`SessionEvent`]
//! into [`Session::apply`], which updates the state and returns the side
//! effects the caller has to carry out (network requests, scrolling, observer
//! resync).  That keeps every transition testable without a terminal or a
//! network.

use std::sync::Arc;

use super::catalog::Catalog;
use super::expand::{self, RenderItem};
use super::filter::{self, FilteredPool, ALL};
use super::growth::GrowthCounter;
use super::header::HeaderVisibility;
use super::vibe::{self, PRESET_TEXTS};

/// Progress of the most recent sample-text request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    CategorySelected(String),
    /// Same as a category change, plus a jump back to the top.
    RandomVibe(String),
    Reset,
    SampleTextEdited(String),
    SampleTextReady(String),
    SampleTextFailed,
    /// New scroll position of the gallery, in virtual pixels.
    Scrolled(u32),
    /// The growth sentinel came near the viewport.
    SentinelNear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RequestSampleText { category: String, vibe: String },
    ScrollToTop,
    /// The render list was rebuilt.  `filter_changed` means every previous
    /// item is gone, not just extended.
    RenderListChanged { filter_changed: bool },
}

pub struct Session {
    catalog: Arc<Catalog>,
    selected_category: String,
    pool: FilteredPool,
    growth: GrowthCounter,
    items: Vec<RenderItem>,
    sample_text: String,
    status: LoadingState,
    header: HeaderVisibility,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let pool = filter::filter(&catalog, ALL);
        let growth = GrowthCounter::new();
        let items = expand::expand(&pool, growth.get());
        Self {
            catalog,
            selected_category: ALL.to_string(),
            pool,
            growth,
            items,
            sample_text: PRESET_TEXTS[0].to_string(),
            status: LoadingState::Idle,
            header: HeaderVisibility::default(),
        }
    }

    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::CategorySelected(id) => self.change_category(id),
            SessionEvent::RandomVibe(id) => {
                let mut effects = self.change_category(id);
                effects.push(Effect::ScrollToTop);
                effects
            }
            SessionEvent::Reset => {
                self.set_category(ALL.to_string());
                self.sample_text = PRESET_TEXTS[0].to_string();
                self.status = LoadingState::Idle;
                self.header.show();
                vec![
                    Effect::RenderListChanged { filter_changed: true },
                    Effect::ScrollToTop,
                ]
            }
            SessionEvent::SampleTextEdited(text) => {
                self.sample_text = text;
                Vec::new()
            }
            SessionEvent::SampleTextReady(text) => {
                self.sample_text = text;
                self.status = LoadingState::Success;
                Vec::new()
            }
            SessionEvent::SampleTextFailed => {
                self.status = LoadingState::Error;
                Vec::new()
            }
            SessionEvent::Scrolled(y) => {
                self.header.on_scroll(y);
                Vec::new()
            }
            SessionEvent::SentinelNear => {
                self.growth.increment();
                self.rebuild_items();
                tracing::debug!(
                    pages = self.growth.get(),
                    items = self.items.len(),
                    "gallery grew"
                );
                vec![Effect::RenderListChanged { filter_changed: false }]
            }
        }
    }

    fn change_category(&mut self, id: String) -> Vec<Effect> {
        self.set_category(id);
        self.status = LoadingState::Loading;
        let vibe = vibe::vibe_phrase(&self.selected_category).to_string();
        vec![
            Effect::RenderListChanged { filter_changed: true },
            Effect::RequestSampleText {
                category: self.selected_category.clone(),
                vibe,
            },
        ]
    }

    fn set_category(&mut self, id: String) {
        self.pool = filter::filter(&self.catalog, &id);
        self.selected_category = id;
        self.growth.reset();
        self.rebuild_items();
    }

    fn rebuild_items(&mut self) {
        self.items = expand::expand(&self.pool, self.growth.get());
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    pub fn pages(&self) -> usize {
        self.growth.get()
    }

    pub fn sample_text(&self) -> &str {
        &self.sample_text
    }

    pub fn status(&self) -> LoadingState {
        self.status
    }

    pub fn header_visible(&self) -> bool {
        self.header.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::FontDescriptor;
    use crate::core::expand::PAGE_SIZE;

    fn session() -> Session {
        let catalog = Catalog::new(vec![
            FontDescriptor::new("Lora", "serif", &["elegant"]),
            FontDescriptor::new("Inter", "sans-serif", &["minimal"]),
            FontDescriptor::new("Orbitron", "display", &["cyber"]),
        ])
        .unwrap();
        Session::new(Arc::new(catalog))
    }

    #[test]
    fn starts_unfiltered_with_one_page() {
        let s = session();
        assert_eq!(s.selected_category(), "all");
        assert_eq!(s.items().len(), PAGE_SIZE);
        assert_eq!(s.status(), LoadingState::Idle);
        assert_eq!(s.sample_text(), PRESET_TEXTS[0]);
        assert!(s.header_visible());
    }

    #[test]
    fn sentinel_appends_a_page() {
        let mut s = session();
        let effects = s.apply(SessionEvent::SentinelNear);
        assert_eq!(effects, vec![Effect::RenderListChanged { filter_changed: false }]);
        assert_eq!(s.pages(), 2);
        assert_eq!(s.items().len(), 2 * PAGE_SIZE);
    }

    #[test]
    fn category_change_resets_growth_and_requests_text() {
        let mut s = session();
        s.apply(SessionEvent::SentinelNear);
        s.apply(SessionEvent::SentinelNear);

        let effects = s.apply(SessionEvent::CategorySelected("cyber".into()));
        assert_eq!(
            effects,
            vec![
                Effect::RenderListChanged { filter_changed: true },
                Effect::RequestSampleText {
                    category: "cyber".into(),
                    vibe: "neo-tokyo cyberpunk neon".into(),
                },
            ]
        );
        assert_eq!(s.pages(), 1);
        assert_eq!(s.status(), LoadingState::Loading);
        assert_eq!(s.items().len(), PAGE_SIZE);
        assert!(s.items().iter().all(|i| i.descriptor.family == "Orbitron"));
    }

    #[test]
    fn unmapped_category_uses_raw_id_as_vibe() {
        let mut s = session();
        let effects = s.apply(SessionEvent::CategorySelected("vaporwave".into()));
        assert!(effects.contains(&Effect::RequestSampleText {
            category: "vaporwave".into(),
            vibe: "vaporwave".into(),
        }));
        assert!(s.items().is_empty());
    }

    #[test]
    fn empty_pool_stays_empty_when_sentinel_fires() {
        let mut s = session();
        s.apply(SessionEvent::CategorySelected("gothic".into()));
        s.apply(SessionEvent::SentinelNear);
        assert!(s.items().is_empty());
    }

    #[test]
    fn random_vibe_also_scrolls_to_top() {
        let mut s = session();
        let effects = s.apply(SessionEvent::RandomVibe("elegant".into()));
        assert_eq!(effects.last(), Some(&Effect::ScrollToTop));
        assert_eq!(s.selected_category(), "elegant");
    }

    #[test]
    fn completions_are_last_writer_wins() {
        let mut s = session();
        s.apply(SessionEvent::CategorySelected("cyber".into()));
        s.apply(SessionEvent::CategorySelected("elegant".into()));
        // The slower, older response lands last and still wins.
        s.apply(SessionEvent::SampleTextReady("Silk and champagne.".into()));
        s.apply(SessionEvent::SampleTextReady("Neon rain on chrome.".into()));
        assert_eq!(s.sample_text(), "Neon rain on chrome.");
        assert_eq!(s.status(), LoadingState::Success);
    }

    #[test]
    fn failure_keeps_text_and_flags_error() {
        let mut s = session();
        s.apply(SessionEvent::SampleTextEdited("my own words".into()));
        s.apply(SessionEvent::CategorySelected("serif".into()));
        s.apply(SessionEvent::SampleTextFailed);
        assert_eq!(s.status(), LoadingState::Error);
        assert_eq!(s.sample_text(), "my own words");
    }

    #[test]
    fn reset_restores_everything_without_a_request() {
        let mut s = session();
        s.apply(SessionEvent::CategorySelected("cyber".into()));
        s.apply(SessionEvent::SampleTextReady("Neon rain on chrome.".into()));
        s.apply(SessionEvent::SentinelNear);
        s.apply(SessionEvent::Scrolled(50));
        s.apply(SessionEvent::Scrolled(500));
        assert!(!s.header_visible());

        let effects = s.apply(SessionEvent::Reset);
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::RequestSampleText { .. })));
        assert_eq!(s.selected_category(), "all");
        assert_eq!(s.sample_text(), PRESET_TEXTS[0]);
        assert_eq!(s.pages(), 1);
        assert_eq!(s.status(), LoadingState::Idle);
        assert!(s.header_visible());
        assert_eq!(s.items().len(), PAGE_SIZE);
    }
}
