//! Input handling.  Maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::{Action, KeyBind};
use crate::core::assets;
use crate::core::session::SessionEvent;
use crate::core::vibe;
use crate::ui::layout::AppLayout;

use super::runtime::AiUpdate;
use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Gallery => handle_gallery_key(state, key),
        ActiveView::CategoryPicker => handle_picker_key(state, key),
        ActiveView::EditText => handle_edit_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

// ── Gallery (configurable bindings) ─────────────────────────────

fn handle_gallery_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Home => {
            state.select(0);
            return;
        }
        KeyCode::End => {
            state.select(state.session.items().len().saturating_sub(1));
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let geom = state.geometry();
    let columns = geom.columns as isize;
    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::MoveUp => state.select_by(-columns),
        Action::MoveDown => move_down(state, columns),
        Action::MoveLeft => state.select_by(-1),
        Action::MoveRight => state.select_by(1),
        Action::PageUp => state.select_by(-(geom.page_cards() as isize)),
        Action::PageDown => move_down(state, geom.page_cards() as isize),
        Action::PickCategory => open_picker(state),
        Action::RandomVibe => {
            let choice = vibe::random_vibe(&mut rand::thread_rng());
            state.flash(format!("Random vibe: {}", choice.label));
            state.dispatch(SessionEvent::RandomVibe(choice.id.to_string()));
        }
        Action::Reset => {
            state.dispatch(SessionEvent::Reset);
            state.flash("Gallery reset");
        }
        Action::EditText => {
            state.edit_original = Some(state.session.sample_text().to_string());
            state.active_view = ActiveView::EditText;
        }
        Action::FontSizeUp => state.change_font_size(true),
        Action::FontSizeDown => state.change_font_size(false),
        Action::CopyCss => copy_css(state),
        Action::OpenSpecimen => open_specimen(state),
    }
}

/// Move down, stopping on the last card instead of overshooting a short row.
fn move_down(state: &mut AppState, delta: isize) {
    let last = state.session.items().len().saturating_sub(1);
    if state.selected < last {
        state.select_by(delta);
    }
}

fn open_picker(state: &mut AppState) {
    let current = state.session.selected_category();
    state.picker_selected = vibe::all_categories()
        .position(|c| c.id == current)
        .unwrap_or(0);
    state.active_view = ActiveView::CategoryPicker;
}

fn copy_css(state: &mut AppState) {
    let Some(font) = state.selected_font() else {
        return;
    };
    let family = font.family.clone();
    let snippet = assets::css_snippet(font);
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(snippet));
    match result {
        Ok(()) => state.flash(format!("Copied CSS for {family}")),
        Err(e) => {
            tracing::warn!(error = %e, "clipboard unavailable");
            state.flash(format!("Clipboard unavailable: {e}"));
        }
    }
}

fn open_specimen(state: &mut AppState) {
    let Some(font) = state.selected_font() else {
        return;
    };
    let url = assets::specimen_url(&font.family);
    match open::that(&url) {
        Ok(()) => state.flash(format!("Opened {url}")),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "could not open browser");
            state.flash(format!("Could not open {url}"));
        }
    }
}

// ── Category picker ─────────────────────────────────────────────

fn handle_picker_key(state: &mut AppState, key: KeyEvent) {
    let count = vibe::all_categories().count();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => state.active_view = ActiveView::Gallery,
        KeyCode::Up | KeyCode::Char('k') => {
            state.picker_selected = state.picker_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.picker_selected + 1 < count {
                state.picker_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(category) = vibe::all_categories().nth(state.picker_selected) {
                state.active_view = ActiveView::Gallery;
                state.dispatch(SessionEvent::CategorySelected(category.id.to_string()));
            }
        }
        _ => {}
    }
}

// ── Sample text editing ─────────────────────────────────────────

fn handle_edit_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Enter => {
            state.edit_original = None;
            state.active_view = ActiveView::Gallery;
        }
        KeyCode::Esc => {
            if let Some(original) = state.edit_original.take() {
                state.dispatch(SessionEvent::SampleTextEdited(original));
            }
            state.active_view = ActiveView::Gallery;
        }
        KeyCode::Backspace => {
            let mut text = state.session.sample_text().to_string();
            text.pop();
            state.dispatch(SessionEvent::SampleTextEdited(text));
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut text = state.session.sample_text().to_string();
            text.push(c);
            state.dispatch(SessionEvent::SampleTextEdited(text));
        }
        _ => {}
    }
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Gallery;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Gallery;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                state.awaiting_rebind = true;
            } else {
                state.config.reset_defaults();
                state.persist_config();
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.bindings.insert(action, Vec::new());
                state.persist_config();
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    // Ctrl+C stays reserved for quitting.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return;
    }

    if let Some(&action) = Action::ALL.get(state.controls_selected) {
        state.config.add_binding(action, KeyBind::from_key_event(key));
        state.persist_config();
    }
    state.awaiting_rebind = false;
}

// ── Background results ──────────────────────────────────────────

const AI_UNAVAILABLE_MSG: &str = "AI unavailable, keeping the current text";

/// Apply a finished sample-text request.  Responses are applied in arrival
/// order; a slow answer for an older category can overwrite a newer one.
pub fn handle_ai_update(state: &mut AppState, update: AiUpdate) {
    match update {
        AiUpdate::SampleText {
            category,
            result: Ok(text),
        } => {
            tracing::debug!(category = %category, "sample text ready");
            state.dispatch(SessionEvent::SampleTextReady(text));
        }
        AiUpdate::SampleText {
            category,
            result: Err(e),
        } => {
            tracing::warn!(category = %category, error = %e, "sample text unavailable");
            state.flash(AI_UNAVAILABLE_MSG);
            state.dispatch(SessionEvent::SampleTextFailed);
        }
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.  Only the gallery reacts to the mouse.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Gallery {
        return;
    }

    let geom = state.geometry();
    match mouse.kind {
        MouseEventKind::ScrollUp => state.select_by(-(geom.columns as isize)),
        MouseEventKind::ScrollDown => move_down(state, geom.columns as isize),
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = AppLayout::from_area(state.terminal_area, state.session.header_visible());
            let area = layout.gallery_area;
            if !point_in_rect(area, mouse.column, mouse.row) {
                return;
            }
            let hit = geom.card_at(
                mouse.column - area.x,
                mouse.row - area.y,
                state.scroll.offset(),
            );
            if let Some(index) = hit.filter(|&i| i < state.session.items().len()) {
                state.select(index);
            }
        }
        _ => {}
    }
}

fn point_in_rect(area: ratatui::layout::Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let mut state = AppState::for_tests();
        state.active_view = ActiveView::EditText;
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn arrows_move_by_cell_and_row() {
        let mut state = AppState::for_tests();
        // 100 columns wide: two cards per row.
        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.selected, 1);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.selected, 3);
        handle_key(&mut state, key(KeyCode::Char('k')));
        assert_eq!(state.selected, 1);
        handle_key(&mut state, key(KeyCode::End));
        assert_eq!(state.selected, 49);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.selected, 49);
    }

    #[test]
    fn picker_selects_category() {
        let mut state = AppState::for_tests();
        handle_key(&mut state, key(KeyCode::Char('c')));
        assert_eq!(state.active_view, ActiveView::CategoryPicker);
        assert_eq!(state.picker_selected, 0);

        // Standard group has six entries; the first vibe is "cyber".
        for _ in 0..6 {
            handle_key(&mut state, key(KeyCode::Down));
        }
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.active_view, ActiveView::Gallery);
        assert_eq!(state.session.selected_category(), "cyber");
        assert_eq!(state.pending_requests.len(), 1);
    }

    #[test]
    fn random_vibe_picks_a_vibe_category() {
        let mut state = AppState::for_tests();
        handle_key(&mut state, key(KeyCode::Char('r')));
        let selected = state.session.selected_category();
        assert!(vibe::VIBE_CATEGORIES.iter().any(|c| c.id == selected));
        assert_eq!(state.pending_requests.len(), 1);
    }

    #[test]
    fn reset_issues_no_request() {
        let mut state = AppState::for_tests();
        handle_key(&mut state, key(KeyCode::Char('x')));
        assert!(state.pending_requests.is_empty());
        assert_eq!(state.session.selected_category(), "all");
    }

    #[test]
    fn editing_updates_text_live_and_escape_restores() {
        let mut state = AppState::for_tests();
        let original = state.session.sample_text().to_string();
        handle_key(&mut state, key(KeyCode::Char('e')));
        assert_eq!(state.active_view, ActiveView::EditText);
        handle_key(&mut state, key(KeyCode::Backspace));
        handle_key(&mut state, key(KeyCode::Char('!')));
        assert_eq!(
            state.session.sample_text(),
            format!("{}!", &original[..original.len() - 1])
        );
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.session.sample_text(), original);
        assert_eq!(state.active_view, ActiveView::Gallery);
    }

    #[test]
    fn edit_enter_keeps_new_text() {
        let mut state = AppState::for_tests();
        handle_key(&mut state, key(KeyCode::Char('e')));
        handle_key(&mut state, key(KeyCode::Char('?')));
        handle_key(&mut state, key(KeyCode::Enter));
        assert!(state.session.sample_text().ends_with('?'));
        assert_eq!(state.active_view, ActiveView::Gallery);
    }

    #[test]
    fn click_selects_card_under_pointer() {
        let mut state = AppState::for_tests();
        // Header takes rows 0..3; second card of the second row.
        handle_mouse(&mut state, click(70, 3 + 6 + 1));
        assert_eq!(state.selected, 3);
        // Clicks on the header are ignored.
        handle_mouse(&mut state, click(10, 1));
        assert_eq!(state.selected, 3);
    }

    #[test]
    fn ai_results_update_text_or_flag_error() {
        let mut state = AppState::for_tests();
        state.dispatch(SessionEvent::CategorySelected("cyber".into()));
        handle_ai_update(
            &mut state,
            AiUpdate::SampleText {
                category: "cyber".into(),
                result: Ok("Neon rain on chrome.".into()),
            },
        );
        assert_eq!(state.session.sample_text(), "Neon rain on chrome.");

        handle_ai_update(
            &mut state,
            AiUpdate::SampleText {
                category: "retro".into(),
                result: Err(crate::ai::AiError::MissingApiKey),
            },
        );
        assert_eq!(state.session.sample_text(), "Neon rain on chrome.");
        assert_eq!(
            state.session.status(),
            crate::core::session::LoadingState::Error
        );
        assert_eq!(state.status_message.as_deref(), Some(AI_UNAVAILABLE_MSG));
        let shown = state.status_message.as_deref().unwrap_or_default();
        assert!(!shown.contains("API key"));
        assert!(!shown.contains(&crate::ai::AiError::MissingApiKey.to_string()));
    }

    #[test]
    fn settings_escape_returns_to_gallery() {
        let mut state = AppState::for_tests();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.active_view, ActiveView::SettingsMenu);
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.active_view, ActiveView::ControlsSubmenu);
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.active_view, ActiveView::Gallery);
    }
}
