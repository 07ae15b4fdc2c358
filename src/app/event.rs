//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Ticks
//! drive the scroll animation and the spinners.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Consecutive terminal errors tolerated before the reader gives up.
const MAX_FAILURE_STREAK: u32 = 20;

/// Backoff for a run of failing terminal calls (e.g. stdin closed).
#[derive(Debug, Default)]
struct FailureStreak(u32);

impl FailureStreak {
    /// Record a failure.  Returns how long to sleep, or `None` once the
    /// streak is long enough to give up.
    fn record(&mut self, base: Duration) -> Option<Duration> {
        self.0 += 1;
        if self.0 >= MAX_FAILURE_STREAK {
            return None;
        }
        Some(base.saturating_mul(self.0.min(10)))
    }

    fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Spawns a blocking reader that polls the terminal and sends events through
/// the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        let mut failures = FailureStreak::default();
        loop {
            // Wait at most until the next tick is due, so held keys cannot
            // starve the animations.
            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            let polled = match event::poll(timeout) {
                Ok(true) => event::read().map(|ev| match ev {
                    // Release events would double every key press on
                    // terminals that report them.
                    CtEvent::Key(k) if k.kind != KeyEventKind::Release => Some(AppEvent::Key(k)),
                    CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
                    CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                    _ => None,
                }),
                Ok(false) => Ok(None),
                Err(e) => Err(e),
            };
            let app_event = match polled {
                Ok(ev) => {
                    failures.reset();
                    ev
                }
                Err(e) => match failures.record(tick_rate) {
                    Some(backoff) => {
                        tracing::warn!(error = %e, ?backoff, "terminal input failed");
                        std::thread::sleep(backoff);
                        None
                    }
                    None => {
                        tracing::error!(error = %e, "terminal input keeps failing, stopping reader");
                        break;
                    }
                },
            };
            if let Some(app_event) = app_event {
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
