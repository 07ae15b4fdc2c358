//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Gallery semantics live in [`Session`]; this struct adds the terminal-side
//! concerns (cursor, scrolling, overlays, observers) and carries out the
//! effects the session returns.

use std::sync::Arc;
use std::time::Duration;

use ratatui::layout::Rect;

use crate::ai::AiConfig;
use crate::config::{AppConfig, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::core::assets::LazyAssetLoader;
use crate::core::catalog::{Catalog, FontDescriptor};
use crate::core::proximity::{MarginObserver, ProximityObserver};
use crate::core::session::{Effect, Session, SessionEvent};
use crate::ui::layout::{AppLayout, GridGeometry};
use crate::ui::smooth_scroll::SmoothScroll;

use super::runtime;

/// Cards start loading their stylesheet this far outside the viewport.
pub const CARD_MARGIN_PX: u32 = 400;
/// The gallery grows once its end is this close to the viewport.
pub const SENTINEL_MARGIN_PX: u32 = 1200;

pub const FONT_SIZE_STEP: u16 = 4;

/// Ticks a flash message stays in the status bar.
const FLASH_TICKS: u16 = 30;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Gallery,
    CategoryPicker,
    EditText,
    SettingsMenu,
    ControlsSubmenu,
}

/// Key of the single growth sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SentinelKey;

/// A sample-text request waiting to be spawned by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub category: String,
    pub vibe: String,
}

/// Top-level application state.
pub struct AppState {
    pub session: Session,
    pub loader: LazyAssetLoader,
    /// Cards (by render index) whose family is not loaded yet.
    pub card_watch: MarginObserver<usize>,
    pub sentinel_watch: MarginObserver<SentinelKey>,
    /// Render index of the highlighted card.
    pub selected: usize,
    pub scroll: SmoothScroll,
    /// Current preview size in px.
    pub font_size: u16,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    flash_ticks: u16,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Keybindings and persisted preferences.
    pub config: AppConfig,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    /// Highlighted row of the category picker.
    pub picker_selected: usize,
    /// Sample text before editing started, restored on cancel.
    pub edit_original: Option<String>,
    /// Full terminal area as of the last draw.
    pub terminal_area: Rect,
    /// Frame counter driving spinners.
    pub tick: u64,
    /// Sample-text requests the main loop still has to spawn.
    pub pending_requests: Vec<PendingRequest>,
    /// Set when observed regions may have moved.
    pub needs_watch_sync: bool,
    pub last_geometry: Option<GridGeometry>,
    pub last_scroll_px: Option<u32>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, config: AppConfig) -> Self {
        let loader = LazyAssetLoader::new(runtime::sink_for(config.offline));
        Self {
            session: Session::new(catalog),
            loader,
            card_watch: MarginObserver::new(CARD_MARGIN_PX),
            sentinel_watch: MarginObserver::new(SENTINEL_MARGIN_PX),
            selected: 0,
            scroll: SmoothScroll::new(0.35),
            font_size: config.font_size,
            should_quit: false,
            status_message: None,
            flash_ticks: 0,
            active_view: ActiveView::default(),
            config,
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            picker_selected: 0,
            edit_original: None,
            terminal_area: Rect::default(),
            tick: 0,
            pending_requests: Vec::new(),
            needs_watch_sync: true,
            last_geometry: None,
            last_scroll_px: None,
        }
    }

    /// Feed an event to the session and carry out the resulting effects.
    pub fn dispatch(&mut self, event: SessionEvent) {
        for effect in self.session.apply(event) {
            match effect {
                Effect::RenderListChanged { filter_changed } => {
                    if filter_changed {
                        self.card_watch.dispose();
                        self.sentinel_watch.dispose();
                    }
                    self.needs_watch_sync = true;
                    self.clamp_selection();
                }
                Effect::ScrollToTop => {
                    self.selected = 0;
                    self.scroll.scroll_to(0);
                }
                Effect::RequestSampleText { category, vibe } => {
                    self.pending_requests.push(PendingRequest { category, vibe });
                }
            }
        }
    }

    /// Connection settings for the next text-model request.
    pub fn ai_config(&self) -> AiConfig {
        AiConfig::from_env(
            &self.config.model,
            Duration::from_secs(self.config.request_timeout_secs),
            self.config.offline,
        )
    }

    pub fn geometry(&self) -> GridGeometry {
        let layout = AppLayout::from_area(self.terminal_area, self.session.header_visible());
        GridGeometry::new(layout.gallery_area, self.font_size)
    }

    pub fn selected_font(&self) -> Option<&FontDescriptor> {
        self.session
            .items()
            .get(self.selected)
            .map(|item| item.descriptor.as_ref())
    }

    /// Move the card cursor and keep it in view.
    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
        self.scroll_selection_into_view();
    }

    pub fn select_by(&mut self, delta: isize) {
        let target = self.selected.saturating_add_signed(delta);
        self.select(target);
    }

    fn clamp_selection(&mut self) {
        let len = self.session.items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn scroll_selection_into_view(&mut self) {
        let geom = self.geometry();
        let top = geom.card_top(self.selected);
        let bottom = top + u32::from(geom.card_height);
        let viewport = u32::from(geom.viewport_rows);
        let target = self.scroll.target();
        if top < target {
            self.scroll.scroll_to(top);
        } else if bottom > target + viewport {
            self.scroll.scroll_to(bottom.saturating_sub(viewport));
        }
        let max = geom.max_scroll(self.session.items().len());
        if self.scroll.target() > max {
            self.scroll.scroll_to(max);
        }
    }

    pub fn change_font_size(&mut self, up: bool) {
        let size = if up {
            self.font_size.saturating_add(FONT_SIZE_STEP)
        } else {
            self.font_size.saturating_sub(FONT_SIZE_STEP)
        };
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        // Card heights changed; the cursor may have left the viewport.
        self.needs_watch_sync = true;
        self.scroll_selection_into_view();
        self.flash(format!("Preview size: {}px", self.font_size));
    }

    /// Show a message in the status bar for a short while.
    pub fn flash(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.flash_ticks = FLASH_TICKS;
    }

    /// Advance animations by one frame.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.scroll.tick();
        if self.flash_ticks > 0 {
            self.flash_ticks -= 1;
            if self.flash_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    pub fn persist_config(&mut self) {
        if let Err(e) = self.config.save() {
            tracing::warn!(error = %e, "could not save config");
            self.flash(format!("Could not save config: {e}"));
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Offline state over a three-font catalog in a 100x40 terminal.
    pub(crate) fn for_tests() -> Self {
        use crate::core::catalog::FontDescriptor;

        let catalog = Catalog::new(vec![
            FontDescriptor::new("Lora", "serif", &["elegant"]),
            FontDescriptor::new("Inter", "sans-serif", &["minimal"]),
            FontDescriptor::new("Orbitron", "display", &["cyber"]),
        ])
        .expect("valid catalog");
        let config = AppConfig {
            offline: true,
            ..AppConfig::default()
        };
        let mut state = AppState::new(Arc::new(catalog), config);
        state.terminal_area = Rect::new(0, 0, 100, 40);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn category_change_queues_request_and_clamps_cursor() {
        let mut state = AppState::for_tests();
        state.select(40);
        state.dispatch(SessionEvent::CategorySelected("cyber".into()));
        assert_eq!(
            state.pending_requests,
            vec![PendingRequest {
                category: "cyber".into(),
                vibe: "neo-tokyo cyberpunk neon".into(),
            }]
        );
        // One page of 50 is still rendered, so the cursor survives.
        assert_eq!(state.selected, 40);
        state.dispatch(SessionEvent::CategorySelected("gothic".into()));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn random_vibe_scrolls_back_to_top() {
        let mut state = AppState::for_tests();
        state.select(45);
        assert!(state.scroll.target() > 0);
        state.dispatch(SessionEvent::RandomVibe("retro".into()));
        assert_eq!(state.selected, 0);
        assert_eq!(state.scroll.target(), 0);
    }

    #[test]
    fn cursor_moves_scroll_only_when_leaving_view() {
        let mut state = AppState::for_tests();
        state.select(1);
        assert_eq!(state.scroll.target(), 0);
        state.select_by(-5);
        assert_eq!(state.selected, 0);
        state.select(49);
        let geom = state.geometry();
        let bottom = geom.card_top(49) + u32::from(geom.card_height);
        assert_eq!(state.scroll.target() + u32::from(geom.viewport_rows), bottom);
    }

    #[test]
    fn font_size_is_clamped() {
        let mut state = AppState::for_tests();
        state.font_size = MAX_FONT_SIZE;
        state.change_font_size(true);
        assert_eq!(state.font_size, MAX_FONT_SIZE);
        state.font_size = MIN_FONT_SIZE;
        state.change_font_size(false);
        assert_eq!(state.font_size, MIN_FONT_SIZE);
        state.change_font_size(true);
        assert_eq!(state.font_size, MIN_FONT_SIZE + FONT_SIZE_STEP);
    }

    #[test]
    fn flash_expires() {
        let mut state = AppState::for_tests();
        state.flash("hi");
        for _ in 0..FLASH_TICKS {
            assert!(state.status_message.is_some());
            state.on_tick();
        }
        assert!(state.status_message.is_none());
    }
}
