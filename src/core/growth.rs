//! Growth counter driving how many pages the expander emits.

/// Number of pages requested from the expander.  Starts at one page and only
/// ever grows, until a filter change or reset puts it back to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthCounter(usize);

impl GrowthCounter {
    pub fn new() -> Self {
        Self(1)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.0 = 1;
    }
}

impl Default for GrowthCounter {
    fn default() -> Self {
        Self::new()
    }
}
