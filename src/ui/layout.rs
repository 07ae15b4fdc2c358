//! Layout helpers: split the terminal area into regions and map the card
//! grid onto content coordinates.
//!
//! Scroll positions and observer regions are measured in virtual pixels:
//! one terminal row is [`ROW_PX`] pixels tall.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::proximity::Region;

/// Virtual pixels per terminal row.
pub const ROW_PX: u32 = 16;

pub const HEADER_ROWS: u16 = 3;
pub const SENTINEL_ROWS: u16 = 4;

/// Rows of a card that are not preview text: two borders, family line and
/// metadata line.
const CARD_CHROME_ROWS: u16 = 4;

/// Minimum card width per column count, widest layout first.
const COLUMN_BREAKPOINTS: &[(u16, usize)] = &[(200, 5), (160, 4), (120, 3), (72, 2)];

/// Primary screen layout: control bar, gallery, status line.
pub struct AppLayout {
    pub header_area: Rect,
    pub gallery_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.  A hidden header gives
    /// its rows to the gallery.
    pub fn from_area(area: Rect, header_visible: bool) -> Self {
        let header_rows = if header_visible { HEADER_ROWS } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_rows),
                Constraint::Min(1),    // gallery takes all remaining space
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            gallery_area: chunks[1],
            status_area: chunks[2],
        }
    }
}

/// Preview text rows for a font size.
pub fn preview_rows(font_size: u16) -> u16 {
    (font_size / 24).clamp(1, 5)
}

pub fn columns_for(width: u16) -> usize {
    COLUMN_BREAKPOINTS
        .iter()
        .find(|(min, _)| width >= *min)
        .map_or(1, |&(_, cols)| cols)
}

// ───────────────────────────────────────── grid geometry ─────

/// Where each card of the gallery sits, in terminal rows relative to the top
/// of the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    pub card_width: u16,
    pub card_height: u16,
    /// Visible gallery rows.
    pub viewport_rows: u16,
}

impl GridGeometry {
    pub fn new(gallery: Rect, font_size: u16) -> Self {
        let columns = columns_for(gallery.width);
        Self {
            columns,
            card_width: (gallery.width / columns as u16).max(1),
            card_height: CARD_CHROME_ROWS + preview_rows(font_size),
            viewport_rows: gallery.height,
        }
    }

    /// Grid row holding card `index`.
    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    pub fn grid_rows(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.columns)
    }

    /// Terminal row at which card `index` starts.
    pub fn card_top(&self, index: usize) -> u32 {
        self.row_of(index) as u32 * u32::from(self.card_height)
    }

    /// Total scrollable rows: the grid plus the trailing sentinel.
    pub fn content_rows(&self, item_count: usize) -> u32 {
        self.grid_rows(item_count) as u32 * u32::from(self.card_height) + u32::from(SENTINEL_ROWS)
    }

    pub fn max_scroll(&self, item_count: usize) -> u32 {
        self.content_rows(item_count)
            .saturating_sub(u32::from(self.viewport_rows))
    }

    /// Cards in view per page, at least one grid row's worth.
    pub fn page_cards(&self) -> usize {
        let rows = (self.viewport_rows / self.card_height).max(1);
        rows as usize * self.columns
    }

    pub fn card_region(&self, index: usize) -> Region {
        Region::new(
            self.card_top(index) * ROW_PX,
            u32::from(self.card_height) * ROW_PX,
        )
    }

    pub fn sentinel_region(&self, item_count: usize) -> Region {
        let top = self.grid_rows(item_count) as u32 * u32::from(self.card_height);
        Region::new(top * ROW_PX, u32::from(SENTINEL_ROWS) * ROW_PX)
    }

    /// Visible content for a scroll offset given in rows.
    pub fn viewport(&self, scroll_rows: u32) -> Region {
        Region::new(scroll_rows * ROW_PX, u32::from(self.viewport_rows) * ROW_PX)
    }

    /// Card under a gallery-relative cell, if any.
    pub fn card_at(&self, column: u16, row: u16, scroll_rows: u32) -> Option<usize> {
        let col = usize::from(column / self.card_width);
        if col >= self.columns {
            return None;
        }
        let content_row = scroll_rows + u32::from(row);
        let grid_row = (content_row / u32::from(self.card_height)) as usize;
        Some(grid_row * self.columns + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(12, 1)]
    #[case(24, 1)]
    #[case(48, 2)]
    #[case(96, 4)]
    #[case(120, 5)]
    fn preview_rows_follow_font_size(#[case] size: u16, #[case] rows: u16) {
        assert_eq!(preview_rows(size), rows);
    }

    #[rstest]
    #[case(40, 1)]
    #[case(72, 2)]
    #[case(150, 3)]
    #[case(180, 4)]
    #[case(240, 5)]
    fn columns_follow_width(#[case] width: u16, #[case] cols: usize) {
        assert_eq!(columns_for(width), cols);
    }

    #[test]
    fn header_rows_go_to_gallery_when_hidden() {
        let area = Rect::new(0, 0, 100, 40);
        let shown = AppLayout::from_area(area, true);
        let hidden = AppLayout::from_area(area, false);
        assert_eq!(shown.header_area.height, HEADER_ROWS);
        assert_eq!(hidden.header_area.height, 0);
        assert_eq!(hidden.gallery_area.height, shown.gallery_area.height + HEADER_ROWS);
        assert_eq!(shown.status_area.height, 1);
    }

    #[test]
    fn regions_are_in_virtual_pixels() {
        // 100 wide -> 2 columns, 48px font -> 6-row cards.
        let geom = GridGeometry::new(Rect::new(0, 0, 100, 30), 48);
        assert_eq!(geom.columns, 2);
        assert_eq!(geom.card_height, 6);
        assert_eq!(geom.card_region(0), Region::new(0, 96));
        assert_eq!(geom.card_region(3), Region::new(96, 96));
        assert_eq!(geom.sentinel_region(5), Region::new(3 * 96, 64));
        assert_eq!(geom.viewport(10), Region::new(160, 480));
    }

    #[test]
    fn card_at_accounts_for_scroll() {
        let geom = GridGeometry::new(Rect::new(0, 0, 100, 30), 48);
        assert_eq!(geom.card_at(0, 0, 0), Some(0));
        assert_eq!(geom.card_at(60, 0, 0), Some(1));
        assert_eq!(geom.card_at(60, 2, 6), Some(3));
    }

    #[test]
    fn scroll_limit_includes_sentinel() {
        let geom = GridGeometry::new(Rect::new(0, 0, 100, 30), 48);
        // 50 cards, 2 columns: 25 rows of 6 plus 4 sentinel rows.
        assert_eq!(geom.content_rows(50), 154);
        assert_eq!(geom.max_scroll(50), 124);
        assert_eq!(geom.max_scroll(0), 0);
        assert_eq!(geom.page_cards(), 10);
    }
}
