//! Row-level smooth scroll with exponential ease-out.
//!
//! The gallery scroll offset chases a target row.  Each tick covers a fixed
//! fraction of the remaining distance, so long jumps (back to the top after
//! a new vibe) visibly decelerate instead of snapping.

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current offset in rows (fractional while animating).
    position: f64,
    /// Row the animation settles on.
    target: u32,
    /// Fraction of the remaining distance covered per tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Animate toward `target`.
    pub fn scroll_to(&mut self, target: u32) {
        self.target = target;
    }

    /// Move to `target` without animating.
    #[cfg(test)]
    pub fn jump_to(&mut self, target: u32) {
        self.target = target;
        self.position = f64::from(target);
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Advance the animation.  Call once per frame.
    pub fn tick(&mut self) {
        let goal = f64::from(self.target);
        self.position += (goal - self.position) * self.speed;
        if (goal - self.position).abs() < 0.5 {
            self.position = goal;
        }
    }

    /// Current offset in whole rows.
    pub fn offset(&self) -> u32 {
        self.position.round().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_on_target() {
        let mut s = SmoothScroll::new(0.35);
        s.scroll_to(100);
        let mut last = 0;
        for _ in 0..100 {
            s.tick();
            assert!(s.offset() >= last);
            last = s.offset();
        }
        assert_eq!(s.offset(), 100);
        assert_eq!(s.offset(), s.target());
    }

    #[test]
    fn decelerates_on_the_way_back() {
        let mut s = SmoothScroll::new(0.5);
        s.jump_to(64);
        s.scroll_to(0);
        s.tick();
        let first = 64 - s.offset();
        s.tick();
        let second = 32 - s.offset();
        assert!(first > second);
    }
}
