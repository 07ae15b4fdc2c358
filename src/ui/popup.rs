//! Popup overlay widgets: category picker, sample-text editor, settings menu
//! and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::theme::Theme;
use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};
use crate::core::vibe::CATEGORY_GROUPS;

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::dim_style())
}

fn row_prefix(selected: bool) -> (&'static str, Style) {
    if selected {
        (" ▸ ", Theme::highlight_style())
    } else {
        ("   ", Style::default().fg(Color::White))
    }
}

// ───────────────────────────────────────── category picker ───

pub struct CategoryPickerPopup<'a> {
    /// Index into the flattened category list.
    pub selected: usize,
    /// Id of the active category, marked with a dot.
    pub current: &'a str,
}

impl Widget for CategoryPickerPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let entries: usize = CATEGORY_GROUPS.iter().map(|(_, items)| items.len() + 1).sum();
        let height = entries as u16 + 5;
        let popup = centered_fixed(36, height, area);
        Clear.render(popup, buf);

        let block = popup_block("Category");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        let mut index = 0;
        for (group, categories) in CATEGORY_GROUPS {
            lines.push(Line::from(Span::styled(
                format!(" {}", group.to_uppercase()),
                Theme::dim_style(),
            )));
            for category in categories.iter() {
                let (prefix, style) = row_prefix(index == self.selected);
                let marker = if category.id == self.current { " ●" } else { "" };
                lines.push(Line::from(vec![
                    Span::styled(format!("{prefix}{}", category.label), style),
                    Span::styled(marker, Theme::category_style()),
                ]));
                index += 1;
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: select  Esc: close",
            Theme::dim_style(),
        )));

        // Keep the highlighted row visible on short terminals.
        let selected_line = (self.selected + 2) as u16;
        let scroll = selected_line.saturating_sub(inner.height.saturating_sub(1));
        Paragraph::new(lines).scroll((scroll, 0)).render(inner, buf);
    }
}

// ───────────────────────────────────────── text editor ───────

pub struct EditTextPopup<'a> {
    pub text: &'a str,
}

impl Widget for EditTextPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_fixed(60, 7, area);
        Clear.render(popup, buf);

        let block = popup_block("Sample Text");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {}", self.text), Theme::editing_style()),
                Span::styled("▏", Theme::category_style()),
            ]),
            Line::raw(""),
            Line::from(Span::styled(
                "  Enter: keep  Esc: revert",
                Theme::dim_style(),
            )),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = popup_block("Settings");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let (prefix, style) = row_prefix(i == self.state.settings_selected);
            let value = item.display_value(self.state);
            let value_style = match item {
                SettingsItem::Toggle { get, .. } if get(self.state) => Style::default().fg(Color::Green),
                SettingsItem::Toggle { .. } => Theme::dim_style(),
                _ => Style::default().fg(Color::Yellow),
            };

            let mut spans = vec![Span::styled(format!("{prefix}{:<22}", item.label()), style)];
            if !value.is_empty() {
                spans.push(Span::styled(format!("[{value}]"), value_style));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Theme::dim_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl Widget for ControlsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Actions + blank + reset + blank + hint + blank + two borders.
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block("Controls");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];

        for (i, &action) in Action::ALL.iter().enumerate() {
            let is_selected = i == self.selected;
            let (prefix, base_style) = row_prefix(is_selected);

            let keys_display = if is_selected && self.awaiting_rebind {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };
            let key_style = if is_selected {
                Style::default().fg(Color::Yellow).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Yellow)
            };

            // Label left-aligned, keys right-aligned.
            let label_col = format!("{prefix}{:<22}", action.label());
            let keys_width = (inner.width as usize)
                .saturating_sub(label_col.chars().count())
                .max(1);
            let keys_col = format!("{keys_display:>keys_width$}");

            lines.push(Line::from(vec![
                Span::styled(label_col, base_style),
                Span::styled(keys_col, key_style),
            ]));
        }

        lines.push(Line::raw(""));
        let (reset_prefix, reset_style) = row_prefix(self.selected == Action::ALL.len());
        lines.push(Line::from(Span::styled(
            format!("{reset_prefix}⟳ Reset to defaults"),
            reset_style,
        )));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: back",
            Theme::dim_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
