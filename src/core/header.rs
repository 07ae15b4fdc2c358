//! Scroll-direction driven show/hide state for the control bar.
//!
//! Scrolling up always reveals the bar; scrolling down hides it only once
//! the page is past `hide_after`.  Between the top and the threshold the
//! previous state is kept.

/// Default scroll distance (virtual pixels) before the bar may hide.
pub const HIDE_AFTER_PX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderState {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone)]
pub struct HeaderVisibility {
    state: HeaderState,
    last_scroll_y: u32,
    hide_after: u32,
}

impl HeaderVisibility {
    pub fn new(hide_after: u32) -> Self {
        Self {
            state: HeaderState::Visible,
            last_scroll_y: 0,
            hide_after,
        }
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state() == HeaderState::Visible
    }

    /// Feed a new scroll position and return the resulting state.
    pub fn on_scroll(&mut self, scroll_y: u32) -> HeaderState {
        if scroll_y == 0 || scroll_y < self.last_scroll_y {
            self.state = HeaderState::Visible;
        } else if scroll_y > self.last_scroll_y && scroll_y > self.hide_after {
            self.state = HeaderState::Hidden;
        }
        self.last_scroll_y = scroll_y;
        self.state
    }

    /// Force the bar back into view without touching the scroll history.
    pub fn show(&mut self) {
        self.state = HeaderState::Visible;
    }
}

impl Default for HeaderVisibility {
    fn default() -> Self {
        Self::new(HIDE_AFTER_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::HeaderState::{Hidden, Visible};
    use super::*;
    use rstest::rstest;

    #[test]
    fn scripted_scroll_sequence() {
        let mut header = HeaderVisibility::new(100);
        let states: Vec<HeaderState> = [0, 50, 120, 80, 200, 0]
            .into_iter()
            .map(|y| header.on_scroll(y))
            .collect();
        assert_eq!(states, vec![Visible, Visible, Hidden, Visible, Hidden, Visible]);
    }

    #[rstest]
    #[case(&[150, 160, 140], Visible)]
    #[case(&[150, 160, 160], Hidden)]
    #[case(&[150, 90], Visible)]
    #[case(&[101], Hidden)]
    #[case(&[100], Visible)]
    fn direction_and_threshold(#[case] ys: &[u32], #[case] expected: HeaderState) {
        let mut header = HeaderVisibility::default();
        for &y in ys {
            header.on_scroll(y);
        }
        assert_eq!(header.state(), expected);
    }

    #[test]
    fn show_forces_visible() {
        let mut header = HeaderVisibility::default();
        header.on_scroll(400);
        assert!(!header.is_visible());
        header.show();
        assert!(header.is_visible());
        // Continuing downwards hides it again.
        assert_eq!(header.on_scroll(420), Hidden);
    }
}
