//! AI status indicator: a small spinner and label rendered in the top-right
//! corner of a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::session::LoadingState;

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

/// Shows what the sample-text request is doing.  Renders nothing while idle.
pub struct AiIndicator {
    pub status: LoadingState,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl AiIndicator {
    fn label(&self) -> Option<(String, Color)> {
        match self.status {
            LoadingState::Idle => None,
            LoadingState::Loading => Some((
                format!(" {} writing ", spinner_frame(self.tick)),
                Color::Yellow,
            )),
            LoadingState::Success => Some((" ✦ AI ".to_string(), Color::Green)),
            LoadingState::Error => Some((" ✗ AI offline ".to_string(), Color::Red)),
        }
    }
}

impl Widget for AiIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((label, color)) = self.label() else {
            return;
        };
        let label_width = label.chars().count() as u16;
        if area.width < label_width + 2 || area.height == 0 {
            return;
        }

        // Top-right, inside the border (leave 1 col for the border char).
        let x = area.x + area.width.saturating_sub(label_width + 1);
        let y = area.y;

        let line = Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        buf.set_line(x, y, &line, label_width);
    }
}
