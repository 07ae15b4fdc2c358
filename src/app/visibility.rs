//! Per-frame proximity checks: lazy stylesheet loading, gallery growth and
//! header hiding all key off the same scroll position.

use std::sync::Arc;

use crate::core::assets::LoadOutcome;
use crate::core::proximity::ProximityObserver;
use crate::core::session::SessionEvent;
use crate::ui::layout::{GridGeometry, ROW_PX};

use super::state::{AppState, SentinelKey};

/// Compare observed regions against the current viewport and act on every
/// crossing.  Call once per frame, before drawing.
pub fn poll_visibility(state: &mut AppState) {
    let geom = state.geometry();
    if state.needs_watch_sync || state.last_geometry != Some(geom) {
        sync_watchers(state, &geom);
        state.last_geometry = Some(geom);
        state.needs_watch_sync = false;
    }

    let scroll_rows = state.scroll.offset();
    let scroll_px = scroll_rows * ROW_PX;
    if state.last_scroll_px != Some(scroll_px) {
        state.last_scroll_px = Some(scroll_px);
        state.dispatch(SessionEvent::Scrolled(scroll_px));
    }

    let viewport = geom.viewport(scroll_rows);
    for index in state.card_watch.poll(viewport) {
        state.card_watch.unobserve(&index);
        let Some(font) = state
            .session
            .items()
            .get(index)
            .map(|item| Arc::clone(&item.descriptor))
        else {
            continue;
        };
        if state.loader.on_intersect(&font) == LoadOutcome::Injected {
            // Other cards of this family no longer need watching.
            state.needs_watch_sync = true;
        }
    }

    if !state.sentinel_watch.poll(viewport).is_empty() {
        state.dispatch(SessionEvent::SentinelNear);
    }
}

/// (Re-)register every card that still shows fallback glyphs, plus the
/// sentinel below the last card.  Unchanged regions keep their crossing
/// state.
fn sync_watchers(state: &mut AppState, geom: &GridGeometry) {
    let items = state.session.items();
    for (index, item) in items.iter().enumerate() {
        if state.loader.is_loaded(&item.descriptor.family) {
            state.card_watch.unobserve(&index);
        } else {
            state.card_watch.observe(index, geom.card_region(index));
        }
    }
    state
        .sentinel_watch
        .observe(SentinelKey, geom.sentinel_region(items.len()));
    tracing::trace!(cards = state.card_watch.len(), "observers synced");
}
