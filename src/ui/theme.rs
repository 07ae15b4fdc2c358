//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Signature red of the control bar and selection.
const ACCENT: Color = Color::Rgb(255, 0, 60);

/// All styles used by the widgets.
pub struct Theme;

impl Theme {
    // ── control bar ────────────────────────────────────────────
    pub fn brand_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn category_style() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn sample_text_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn editing_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    }

    // ── cards ──────────────────────────────────────────────────
    pub fn card_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn selected_border_style() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn family_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    /// Preview once the family is loaded.
    pub fn preview_style(bold: bool) -> Style {
        let style = Style::default().fg(Color::White);
        if bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Preview while the family is still loading.
    pub fn fallback_preview_style() -> Style {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }

    pub fn meta_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn sentinel_style() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn highlight_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }
}
