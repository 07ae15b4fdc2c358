//! The card grid and the growth sentinel below it.
//!
//! Only cards intersecting the viewport are drawn.  Cards cut by the top or
//! bottom edge are rendered whole into a scratch buffer and then copied row
//! by row, so borders and wrapping stay correct while scrolling.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::glyphs;
use super::layout::{preview_rows, GridGeometry, SENTINEL_ROWS};
use super::spinner::spinner_frame;
use super::theme::Theme;
use crate::core::assets::LazyAssetLoader;
use crate::core::expand::RenderItem;

/// Font sizes from here on render the preview in bold.
const BOLD_FROM_PX: u16 = 64;

pub const SENTINEL_LABEL: &str = "STREAMING_NEW_VARIANTS";

pub struct Gallery<'a> {
    pub items: &'a [RenderItem],
    pub loader: &'a LazyAssetLoader,
    pub geometry: GridGeometry,
    pub scroll_rows: u32,
    pub selected: usize,
    pub sample_text: &'a str,
    pub font_size: u16,
    pub category_label: &'a str,
    pub pages: usize,
    pub tick: u64,
}

impl Widget for Gallery<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.items.is_empty() {
            render_empty(self.category_label, area, buf);
            return;
        }

        let geom = self.geometry;
        let card_height = u32::from(geom.card_height);
        let first_row = self.scroll_rows / card_height;
        let last_row = (self.scroll_rows + u32::from(area.height)) / card_height;

        for grid_row in first_row..=last_row {
            for col in 0..geom.columns {
                let index = grid_row as usize * geom.columns + col;
                let Some(item) = self.items.get(index) else {
                    break;
                };
                let card = Card {
                    item,
                    loaded: self.loader.is_loaded(&item.descriptor.family),
                    selected: index == self.selected,
                    sample_text: self.sample_text,
                    preview_rows: preview_rows(self.font_size),
                    bold: self.font_size >= BOLD_FROM_PX,
                };
                let top = i64::from(grid_row * card_height) - i64::from(self.scroll_rows);
                let x = area.x + col as u16 * geom.card_width;
                blit(card, x, top, geom.card_width, geom.card_height, area, buf);
            }
        }

        let sentinel_top = geom.grid_rows(self.items.len()) as i64 * i64::from(card_height)
            - i64::from(self.scroll_rows);
        if sentinel_top < i64::from(area.height) {
            let sentinel = Sentinel {
                tick: self.tick,
                pages: self.pages,
                items: self.items.len(),
                families: self.loader.registry().len(),
            };
            blit(sentinel, area.x, sentinel_top, area.width, SENTINEL_ROWS, area, buf);
        }
    }
}

/// Render `widget` at `width`x`height` and copy the rows that fall inside
/// `area`.  `top` is relative to `area.y` and may be negative.
fn blit(widget: impl Widget, x: u16, top: i64, width: u16, height: u16, area: Rect, buf: &mut Buffer) {
    let mut scratch = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(scratch.area, &mut scratch);

    let right = area.x.saturating_add(area.width);
    for dy in 0..height {
        let y = top + i64::from(dy);
        if y < 0 || y >= i64::from(area.height) {
            continue;
        }
        let y = area.y + y as u16;
        for dx in 0..width {
            let cell_x = x.saturating_add(dx);
            if cell_x >= right {
                break;
            }
            if let (Some(src), Some(dst)) = (scratch.cell((dx, dy)), buf.cell_mut((cell_x, y))) {
                *dst = src.clone();
            }
        }
    }
}

fn render_empty(category_label: &str, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("No fonts match “{category_label}”."),
            Theme::title_style(),
        )),
        Line::from(Span::styled(
            "Pick another category or reset the gallery.",
            Theme::dim_style(),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

// ───────────────────────────────────────── card ──────────────

struct Card<'a> {
    item: &'a RenderItem,
    loaded: bool,
    selected: bool,
    sample_text: &'a str,
    preview_rows: u16,
    bold: bool,
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let font = &self.item.descriptor;
        let border_style = if self.selected {
            Theme::selected_border_style()
        } else {
            Theme::card_border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(self.preview_rows),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut title = vec![Span::styled(font.family.clone(), Theme::family_style())];
        if !self.loaded {
            title.push(Span::styled(" ·loading", Theme::dim_style()));
        }
        Paragraph::new(Line::from(title)).render(rows[0], buf);

        let (preview, style) = if self.loaded {
            (
                glyphs::stylize(self.sample_text, &font.category),
                Theme::preview_style(self.bold),
            )
        } else {
            (self.sample_text.to_string(), Theme::fallback_preview_style())
        };
        Paragraph::new(preview)
            .style(style)
            .wrap(Wrap { trim: true })
            .render(rows[1], buf);

        let mut meta = font.category.clone();
        if !font.tags.is_empty() {
            meta.push_str(" · ");
            meta.push_str(&font.tags.join(" "));
        }
        let variant = format!("v{}", self.item.page_index);
        let meta_line = Line::from(vec![
            Span::styled(meta, Theme::meta_style()),
            Span::raw("  "),
            Span::styled(variant, Theme::dim_style()),
        ]);
        Paragraph::new(meta_line).render(rows[2], buf);
    }
}

// ───────────────────────────────────────── sentinel ──────────

struct Sentinel {
    tick: u64,
    pages: usize,
    items: usize,
    /// Families with a stylesheet loaded so far.
    families: usize,
}

impl Widget for Sentinel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = spinner_frame(self.tick);
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("{frame} {SENTINEL_LABEL} {frame}"),
                Theme::sentinel_style(),
            )),
            Line::from(Span::styled(
                format!(
                    "{} cards across {} pages · {} families loaded",
                    self.items, self.pages, self.families
                ),
                Theme::dim_style(),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::runtime::OfflineSink;
    use crate::core::catalog::FontDescriptor;
    use crate::core::expand;

    fn items() -> Vec<RenderItem> {
        let pool = vec![
            Arc::new(FontDescriptor::new("Lora", "serif", &["elegant"])),
            Arc::new(FontDescriptor::new("Inter", "sans-serif", &["minimal"])),
        ];
        expand::expand(&pool, 1)
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell((x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    fn render(items: &[RenderItem], scroll_rows: u32, loader: &LazyAssetLoader) -> Buffer {
        let area = Rect::new(0, 0, 100, 20);
        let mut buf = Buffer::empty(area);
        Gallery {
            items,
            loader,
            geometry: GridGeometry::new(area, 48),
            scroll_rows,
            selected: 0,
            sample_text: "Hi",
            font_size: 48,
            category_label: "All Types",
            pages: 1,
            tick: 0,
        }
        .render(area, &mut buf);
        buf
    }

    #[test]
    fn draws_family_names_and_fallback_text() {
        let items = items();
        let loader = LazyAssetLoader::new(Box::new(OfflineSink));
        let out = text(&render(&items, 0, &loader));
        assert!(out.contains("Lora"));
        assert!(out.contains("Inter"));
        assert!(out.contains("·loading"));
        assert!(out.contains("Hi"));
    }

    #[test]
    fn loaded_family_switches_to_styled_glyphs() {
        let items = items();
        let mut loader = LazyAssetLoader::new(Box::new(OfflineSink));
        loader.on_intersect(&items[0].descriptor);
        let out = text(&render(&items, 0, &loader));
        // Bold serif "H" and "i" for Lora.
        assert!(out.contains("\u{1D407}\u{1D422}"));
    }

    #[test]
    fn sentinel_shows_at_the_end() {
        let items = items();
        let loader = LazyAssetLoader::new(Box::new(OfflineSink));
        assert!(!text(&render(&items, 0, &loader)).contains(SENTINEL_LABEL));
        let geom = GridGeometry::new(Rect::new(0, 0, 100, 20), 48);
        let out = text(&render(&items, geom.max_scroll(items.len()), &loader));
        assert!(out.contains(SENTINEL_LABEL));
    }

    #[test]
    fn partially_scrolled_card_is_clipped() {
        let items = items();
        let loader = LazyAssetLoader::new(Box::new(OfflineSink));
        // Scroll past the top border and family line of the first row.
        let buf = render(&items, 2, &loader);
        let first_row = text(&buf).lines().next().unwrap_or_default().to_string();
        assert!(!first_row.contains("Lora"));
        assert!(first_row.contains("Hi"));
    }

    #[test]
    fn empty_pool_explains_itself() {
        let loader = LazyAssetLoader::new(Box::new(OfflineSink));
        let out = text(&render(&[], 0, &loader));
        assert!(out.contains("No fonts match"));
    }
}
