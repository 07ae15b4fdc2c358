//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::runtime;
use super::state::{ActiveView, AppState};

const FONT_SIZES: &[u16] = &[24, 32, 48, 64, 96];
const TIMEOUTS_SECS: &[u64] = &[5, 10, 20, 30];

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle backed by accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value as shown next to the label (empty for submenus).
    pub fn display_value(&self, state: &AppState) -> String {
        match self {
            Self::Submenu { .. } => String::new(),
            Self::Toggle { get, .. } => if get(state) { "ON" } else { "OFF" }.to_string(),
            Self::Cycle { value, .. } => value(state),
        }
    }
}

/// Next entry after `current`, wrapping; unknown values restart at `default`.
fn next_in<T: Copy + PartialEq>(values: &[T], current: T, default: usize) -> T {
    let idx = values.iter().position(|v| *v == current).unwrap_or(default);
    values[(idx + 1) % values.len()]
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Offline Mode",
        get: |s| s.config.offline,
        set: |s, v| {
            s.config.offline = v;
            s.persist_config();
            // Already loaded families stay loaded; only new ones change route.
            s.loader.set_sink(runtime::sink_for(v));
            s.flash(if v { "Offline: no network requests" } else { "Online" });
        },
    },
    SettingsItem::Cycle {
        label: "Default Font Size",
        value: |s| format!("{}px", s.config.font_size),
        cycle: |s| {
            s.config.font_size = next_in(FONT_SIZES, s.config.font_size, 1);
            s.font_size = s.config.font_size;
            s.needs_watch_sync = true;
            s.persist_config();
            s.flash(format!("Default font size: {}px", s.config.font_size));
        },
    },
    SettingsItem::Cycle {
        label: "AI Timeout",
        value: |s| format!("{}s", s.config.request_timeout_secs),
        cycle: |s| {
            s.config.request_timeout_secs = next_in(TIMEOUTS_SECS, s.config.request_timeout_secs, 0);
            s.persist_config();
            s.flash(format!("AI timeout: {}s", s.config.request_timeout_secs));
        },
    },
];
