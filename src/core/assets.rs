//! Lazy font-asset loading.
//!
//! Cards ask the [`LazyAssetLoader`] for their family once they come near
//! the viewport.  The first request for a family issues exactly one
//! stylesheet injection through an [`AssetSink`]; every later request for the
//! same family is a no-op.  Loaded families are remembered for the lifetime
//! of the process and never evicted.

use std::collections::HashSet;

use super::catalog::FontDescriptor;

pub const STYLESHEET_BASE: &str = "https://fonts.googleapis.com/css2";
pub const SPECIMEN_BASE: &str = "https://fonts.google.com/specimen";

/// Replace each run of whitespace in `s` with a single `sep`.
fn collapse_whitespace(s: &str, sep: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                out.push(sep);
            }
            in_ws = true;
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

/// Registry identifier for a family, e.g. `"font-Open-Sans"`.
pub fn link_id(family: &str) -> String {
    format!("font-{}", collapse_whitespace(family, '-'))
}

/// Family name as used in font-delivery URLs, e.g. `"Open+Sans"`.
pub fn url_family(family: &str) -> String {
    collapse_whitespace(family, '+')
}

pub fn stylesheet_url(family: &str) -> String {
    format!("{STYLESHEET_BASE}?family={}&display=swap", url_family(family))
}

pub fn specimen_url(family: &str) -> String {
    format!("{SPECIMEN_BASE}/{}", url_family(family))
}

/// CSS declaration binding an element to the family.
pub fn font_family_declaration(font: &FontDescriptor) -> String {
    format!("font-family: '{}', {};", font.family, font.category)
}

/// Snippet placed on the clipboard by the copy action.
pub fn css_snippet(font: &FontDescriptor) -> String {
    format!(
        "@import url('{}');\n{}",
        stylesheet_url(&font.family),
        font_family_declaration(font)
    )
}

// ───────────────────────────────────────── sink ──────────────

/// A stylesheet reference to be attached for one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetLink {
    pub id: String,
    pub family: String,
    pub href: String,
}

impl StylesheetLink {
    pub fn for_family(family: &str) -> Self {
        Self {
            id: link_id(family),
            family: family.to_string(),
            href: stylesheet_url(family),
        }
    }
}

/// Where injected stylesheets go.  Injection is fire-and-forget: there is no
/// success or failure reported back, and a failed load just leaves the
/// fallback rendering in place.
pub trait AssetSink {
    fn inject(&mut self, link: &StylesheetLink);
}

// ───────────────────────────────────────── registry ──────────

/// Families that already had their stylesheet injected.
#[derive(Debug, Default, Clone)]
pub struct LoadedFontRegistry {
    ids: HashSet<String>,
}

impl LoadedFontRegistry {
    pub fn contains(&self, family: &str) -> bool {
        self.ids.contains(&link_id(family))
    }

    /// Record a link id; returns `false` if it was already present.
    fn insert(&mut self, id: String) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

// ───────────────────────────────────────── loader ────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stylesheet was injected for the first time.
    Injected,
    /// The family was already loaded; nothing was issued.
    AlreadyLoaded,
}

pub struct LazyAssetLoader {
    registry: LoadedFontRegistry,
    sink: Box<dyn AssetSink>,
}

impl LazyAssetLoader {
    pub fn new(sink: Box<dyn AssetSink>) -> Self {
        Self {
            registry: LoadedFontRegistry::default(),
            sink,
        }
    }

    /// Swap the delivery backend (e.g. when toggling offline mode).  Already
    /// loaded families stay loaded.
    pub fn set_sink(&mut self, sink: Box<dyn AssetSink>) {
        self.sink = sink;
    }

    /// Called when a card for `font` comes near the viewport.
    pub fn on_intersect(&mut self, font: &FontDescriptor) -> LoadOutcome {
        let link = StylesheetLink::for_family(&font.family);
        if !self.registry.insert(link.id.clone()) {
            return LoadOutcome::AlreadyLoaded;
        }
        tracing::debug!(family = %font.family, href = %link.href, "injecting stylesheet");
        self.sink.inject(&link);
        LoadOutcome::Injected
    }

    pub fn is_loaded(&self, family: &str) -> bool {
        self.registry.contains(family)
    }

    pub fn registry(&self) -> &LoadedFontRegistry {
        &self.registry
    }
}

/// Sink that records injections in memory.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub links: std::sync::Arc<std::sync::Mutex<Vec<StylesheetLink>>>,
}

#[cfg(test)]
impl AssetSink for RecordingSink {
    fn inject(&mut self, link: &StylesheetLink) {
        if let Ok(mut links) = self.links.lock() {
            links.push(link.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_and_urls_collapse_whitespace() {
        assert_eq!(link_id("Open Sans"), "font-Open-Sans");
        assert_eq!(link_id("Press  Start\t2P"), "font-Press-Start-2P");
        assert_eq!(
            stylesheet_url("Open Sans"),
            "https://fonts.googleapis.com/css2?family=Open+Sans&display=swap"
        );
        assert_eq!(specimen_url("Fira Code"), "https://fonts.google.com/specimen/Fira+Code");
    }

    #[test]
    fn css_snippet_has_import_and_declaration() {
        let font = FontDescriptor::new("Space Mono", "monospace", &[]);
        assert_eq!(
            css_snippet(&font),
            "@import url('https://fonts.googleapis.com/css2?family=Space+Mono&display=swap');\n\
             font-family: 'Space Mono', monospace;"
        );
    }

    #[test]
    fn loading_twice_injects_once() {
        let sink = RecordingSink::default();
        let links = sink.links.clone();
        let mut loader = LazyAssetLoader::new(Box::new(sink));
        let font = FontDescriptor::new("Open Sans", "sans-serif", &[]);

        assert!(!loader.is_loaded("Open Sans"));
        assert_eq!(loader.on_intersect(&font), LoadOutcome::Injected);
        assert_eq!(loader.on_intersect(&font), LoadOutcome::AlreadyLoaded);
        assert!(loader.is_loaded("Open Sans"));

        let links = links.lock().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].id, "font-Open-Sans");
        assert_eq!(loader.registry().len(), 1);
    }

    #[test]
    fn swapping_sink_keeps_registry() {
        let first = RecordingSink::default();
        let second = RecordingSink::default();
        let second_links = second.links.clone();
        let mut loader = LazyAssetLoader::new(Box::new(first));
        let lora = FontDescriptor::new("Lora", "serif", &[]);
        let inter = FontDescriptor::new("Inter", "sans-serif", &[]);

        loader.on_intersect(&lora);
        loader.set_sink(Box::new(second));
        assert_eq!(loader.on_intersect(&lora), LoadOutcome::AlreadyLoaded);
        assert_eq!(loader.on_intersect(&inter), LoadOutcome::Injected);
        assert_eq!(second_links.lock().unwrap().len(), 1);
    }
}
