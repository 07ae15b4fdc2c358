//! User configuration: keybindings, preview defaults and AI settings.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/fontdoom/config.toml` (default
//! `~/.config/fontdoom/config.toml`).  Unknown keys are ignored and missing
//! keys keep their defaults, so old files keep working.

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ai::DEFAULT_MODEL;

pub const MIN_FONT_SIZE: u16 = 12;
pub const MAX_FONT_SIZE: u16 = 120;
pub const DEFAULT_FONT_SIZE: u16 = 48;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the gallery view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    PickCategory,
    RandomVibe,
    Reset,
    EditText,
    FontSizeUp,
    FontSizeDown,
    CopyCss,
    OpenSpecimen,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::PageUp,
        Action::PageDown,
        Action::PickCategory,
        Action::RandomVibe,
        Action::Reset,
        Action::EditText,
        Action::FontSizeUp,
        Action::FontSizeDown,
        Action::CopyCss,
        Action::OpenSpecimen,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "Card Up",
            Action::MoveDown => "Card Down",
            Action::MoveLeft => "Card Left",
            Action::MoveRight => "Card Right",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::PickCategory => "Pick Category",
            Action::RandomVibe => "Random Vibe",
            Action::Reset => "Reset Gallery",
            Action::EditText => "Edit Sample Text",
            Action::FontSizeUp => "Bigger Preview",
            Action::FontSizeDown => "Smaller Preview",
            Action::CopyCss => "Copy CSS",
            Action::OpenSpecimen => "Open Specimen",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::PickCategory => "pick_category",
            Action::RandomVibe => "random_vibe",
            Action::Reset => "reset",
            Action::EditText => "edit_text",
            Action::FontSizeUp => "font_size_up",
            Action::FontSizeDown => "font_size_down",
            Action::CopyCss => "copy_css",
            Action::OpenSpecimen => "open_specimen",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A key code plus modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Only these modifiers take part in matching.
fn modifier_mask() -> KeyModifiers {
    KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Shift is ignored for character
    /// keys, since terminals already fold it into the character (`+`, `?`).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = modifier_mask();
        if matches!(self.code, KeyCode::Char(_)) {
            mask -= KeyModifiers::SHIFT;
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & modifier_mask(),
        }
    }

    /// Modifier prefix + key name.  `pretty` uses arrows for the UI; the
    /// plain form is what the config file stores.
    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        let name: String = match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".into(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::PageUp, true) => "PgUp".into(),
            (KeyCode::PageDown, true) => "PgDn".into(),
            (KeyCode::Backspace, true) => "Bksp".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&name);
        s
    }

    /// User-friendly display string (e.g. `"Alt+↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        // `+` itself is a valid key, so split off modifiers from the left.
        let mut rest = s;
        loop {
            let Some((head, tail)) = rest.split_once('+') else {
                break;
            };
            if tail.is_empty() {
                break;
            }
            match head.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
            rest = tail;
        }

        let code = match rest.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => KeyCode::F(lower[1..].parse().ok()?),
            _ if rest.chars().count() == 1 => KeyCode::Char(rest.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Keybindings together with preview and AI settings.
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Skip all network traffic (AI requests and stylesheet fetches).
    pub offline: bool,
    /// Preview size the gallery starts with.
    pub font_size: u16,
    /// Client-side timeout for text-model calls.
    pub request_timeout_secs: u64,
    /// Text model name.
    pub model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            offline: false,
            font_size: DEFAULT_FONT_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(MoveLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(MoveRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(
            Action::PageDown,
            vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)],
        );
        m.insert(PickCategory, vec![KeyBind::new(Char('c'), n), KeyBind::new(Enter, n)]);
        m.insert(RandomVibe, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Reset, vec![KeyBind::new(Char('x'), n)]);
        m.insert(EditText, vec![KeyBind::new(Char('e'), n), KeyBind::new(Char('/'), n)]);
        m.insert(FontSizeUp, vec![KeyBind::new(Char('+'), n), KeyBind::new(Char('='), n)]);
        m.insert(FontSizeDown, vec![KeyBind::new(Char('-'), n)]);
        m.insert(CopyCss, vec![KeyBind::new(Char('y'), n)]);
        m.insert(OpenSpecimen, vec![KeyBind::new(Char('o'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Add a binding for `action`.  Removes this key from any other action
    /// to prevent conflicts, then appends it to `action`'s bindings.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Restore all bindings to the built-in defaults.
    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: category | {}: random vibe | {}: edit text | {}/{}: size | {}: copy css | {}: settings",
            self.short_binding(Action::PickCategory),
            self.short_binding(Action::RandomVibe),
            self.short_binding(Action::EditText),
            self.short_binding(Action::FontSizeDown),
            self.short_binding(Action::FontSizeUp),
            self.short_binding(Action::CopyCss),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "could not read config");
                }
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "offline" => {
                    config.offline = value == "true";
                    continue;
                }
                "font_size" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.font_size = v.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                    }
                    continue;
                }
                "request_timeout_secs" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.request_timeout_secs = v.clamp(1, 120);
                    }
                    continue;
                }
                "model" => {
                    let model = value.trim_matches('"');
                    if !model.is_empty() {
                        config.model = model.to_string();
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            // Entries are comma separated, so a bare `,` binding is not
            // expressible; everything else (including `+`) round-trips.
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# fontdoom configuration".to_string(),
            String::new(),
            "# Preview / AI settings".to_string(),
            format!("offline = {}", self.offline),
            format!("font_size = {}", self.font_size),
            format!("request_timeout_secs = {}", self.request_timeout_secs),
            format!("model = \"{}\"", self.model),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.render(false)).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/fontdoom/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("fontdoom").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use rstest::rstest;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut ev = KeyEvent::new(code, modifiers);
        ev.kind = KeyEventKind::Press;
        ev
    }

    #[rstest]
    #[case("q", KeyCode::Char('q'), KeyModifiers::NONE)]
    #[case("+", KeyCode::Char('+'), KeyModifiers::NONE)]
    #[case("Ctrl++", KeyCode::Char('+'), KeyModifiers::CONTROL)]
    #[case("Alt+Up", KeyCode::Up, KeyModifiers::ALT)]
    #[case("PageDown", KeyCode::PageDown, KeyModifiers::NONE)]
    #[case("Space", KeyCode::Char(' '), KeyModifiers::NONE)]
    #[case("F5", KeyCode::F(5), KeyModifiers::NONE)]
    fn parses_key_strings(#[case] raw: &str, #[case] code: KeyCode, #[case] modifiers: KeyModifiers) {
        assert_eq!(KeyBind::parse(raw), Some(KeyBind::new(code, modifiers)));
    }

    #[test]
    fn rejects_unknown_modifier() {
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("nonsense"), None);
    }

    #[test]
    fn default_bindings_resolve() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(press(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Action::RandomVibe)
        );
        // Shifted punctuation still matches a plain binding.
        assert_eq!(
            config.match_key(press(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(Action::OpenSettings)
        );
        assert_eq!(
            config.match_key(press(KeyCode::Char('z'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.offline = true;
        config.font_size = 96;
        config.request_timeout_secs = 20;
        config.add_binding(Action::Reset, KeyBind::new(KeyCode::Char('r'), KeyModifiers::CONTROL));

        let restored = AppConfig::parse(&config.serialise());
        assert!(restored.offline);
        assert_eq!(restored.font_size, 96);
        assert_eq!(restored.request_timeout_secs, 20);
        assert_eq!(restored.model, DEFAULT_MODEL);
        for &action in Action::ALL {
            assert_eq!(restored.bindings.get(&action), config.bindings.get(&action), "{action:?}");
        }
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = AppConfig::parse("font_size = 4\nrequest_timeout_secs = 9000\n");
        assert_eq!(config.font_size, MIN_FONT_SIZE);
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn add_binding_steals_key_from_other_action() {
        let mut config = AppConfig::default();
        config.add_binding(Action::Quit, KeyBind::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(
            config.match_key(press(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(config.display_bindings(Action::Reset), "unbound");
    }
}
