//! Control bar shown above the gallery while the header is visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::spinner::AiIndicator;
use super::theme::Theme;
use crate::core::session::LoadingState;

pub struct HeaderBar<'a> {
    pub category_label: &'a str,
    pub sample_text: &'a str,
    pub font_size: u16,
    pub status: LoadingState,
    pub editing: bool,
    pub tick: u64,
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let size = format!(" {}PX ", self.font_size);
        let (text, text_style) = if self.editing {
            (format!("{}▏", self.sample_text), Theme::editing_style())
        } else {
            (format!("“{}”", self.sample_text), Theme::sample_text_style())
        };

        let line = Line::from(vec![
            Span::styled(" FONTDOOM ", Theme::brand_style()),
            Span::raw(" "),
            Span::styled(self.category_label.to_uppercase(), Theme::category_style()),
            Span::styled(" │ ", Theme::dim_style()),
            Span::styled(text, text_style),
        ]);
        let size_width = size.chars().count() as u16;
        let text_area = Rect {
            width: inner.width.saturating_sub(size_width),
            ..inner
        };
        Paragraph::new(line).render(text_area, buf);

        if inner.width > size_width {
            let size_line = Line::from(Span::styled(size, Theme::meta_style()));
            buf.set_line(
                inner.x + inner.width - size_width,
                inner.y,
                &size_line,
                size_width,
            );
        }

        AiIndicator {
            status: self.status,
            tick: self.tick,
        }
        .render(area, buf);
    }
}
