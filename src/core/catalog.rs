//! Font catalog: the static, ordered list of font descriptors.
//!
//! The catalog is read-only once built.  Descriptors are shared behind
//! [`Arc`] so filtered pools and render items can hold them without copying
//! strings around on every scroll step.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

// ───────────────────────────────────────── types ─────────────

/// A single web font as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FontDescriptor {
    /// Family name, unique within the catalog (e.g. `"Open Sans"`).
    pub family: String,
    /// Coarse classification: `sans-serif`, `serif`, `monospace`,
    /// `handwriting` or `display`.
    pub category: String,
    /// Free-form vibe tags (`cyber`, `retro`, ...).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FontDescriptor {
    pub fn new(family: &str, category: &str, tags: &[&str]) -> Self {
        Self {
            family: family.to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog entry {index} has an empty family name")]
    EmptyFamily { index: usize },
    #[error("duplicate font family {family:?} in catalog")]
    DuplicateFamily { family: String },
}

/// Ordered, validated collection of [`FontDescriptor`]s.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fonts: Vec<Arc<FontDescriptor>>,
}

impl Catalog {
    /// Validate and wrap a list of descriptors.  Family names must be
    /// non-empty, free of surrounding whitespace, and unique.
    pub fn new(fonts: Vec<FontDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (index, font) in fonts.iter().enumerate() {
            if font.family.trim().is_empty() || font.family.trim() != font.family {
                return Err(CatalogError::EmptyFamily { index });
            }
            if !seen.insert(font.family.as_str()) {
                return Err(CatalogError::DuplicateFamily {
                    family: font.family.clone(),
                });
            }
        }
        Ok(Self {
            fonts: fonts.into_iter().map(Arc::new).collect(),
        })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        let fonts = BUILTIN_FONTS
            .iter()
            .map(|(family, category, tags)| Arc::new(FontDescriptor::new(family, category, tags)))
            .collect();
        Self { fonts }
    }

    /// Load a catalog from a JSON array of `{ family, category, tags? }`.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let fonts: Vec<FontDescriptor> = serde_json::from_str(raw)?;
        Self::new(fonts)
    }

    pub fn fonts(&self) -> &[Arc<FontDescriptor>] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Comma-separated family list (used in recommendation prompts).
    pub fn family_list(&self) -> String {
        self.fonts
            .iter()
            .map(|f| f.family.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ───────────────────────────────────────── built-in list ─────

type Entry = (&'static str, &'static str, &'static [&'static str]);

const BUILTIN_FONTS: &[Entry] = &[
    ("Inter", "sans-serif", &["minimal", "modern", "tech"]),
    ("Roboto", "sans-serif", &["modern", "tech"]),
    ("Open Sans", "sans-serif", &["minimal"]),
    ("Lato", "sans-serif", &["minimal", "elegant"]),
    ("Montserrat", "sans-serif", &["modern", "minimal"]),
    ("Poppins", "sans-serif", &["modern", "playful"]),
    ("Work Sans", "sans-serif", &["minimal", "modern"]),
    ("Manrope", "sans-serif", &["modern", "tech"]),
    ("DM Sans", "sans-serif", &["minimal"]),
    ("Space Grotesk", "sans-serif", &["tech", "futuristic", "weird"]),
    ("Archivo Black", "sans-serif", &["brutal"]),
    ("Barlow Condensed", "sans-serif", &["gaming", "tech"]),
    ("Rajdhani", "sans-serif", &["cyber", "gaming", "futuristic"]),
    ("Exo 2", "sans-serif", &["futuristic", "gaming"]),
    ("Titillium Web", "sans-serif", &["tech", "futuristic"]),
    ("Chakra Petch", "sans-serif", &["cyber", "gaming"]),
    ("Syne", "sans-serif", &["weird", "modern"]),
    ("Unbounded", "sans-serif", &["futuristic", "brutal"]),
    ("Lexend", "sans-serif", &["minimal"]),
    ("Outfit", "sans-serif", &["modern", "minimal"]),
    ("Oswald", "sans-serif", &["brutal", "retro"]),
    ("Anton", "sans-serif", &["brutal"]),
    ("Bebas Neue", "sans-serif", &["brutal", "modern"]),
    ("Josefin Sans", "sans-serif", &["retro", "elegant"]),
    ("Quicksand", "sans-serif", &["playful", "minimal"]),
    ("Nunito", "sans-serif", &["playful"]),
    ("Kanit", "sans-serif", &["gaming", "modern"]),
    ("Saira", "sans-serif", &["tech", "gaming"]),
    ("Playfair Display", "serif", &["elegant"]),
    ("Merriweather", "serif", &["elegant"]),
    ("Lora", "serif", &["elegant"]),
    ("EB Garamond", "serif", &["elegant", "gothic"]),
    ("Cormorant Garamond", "serif", &["elegant"]),
    ("Libre Baskerville", "serif", &["elegant"]),
    ("Crimson Text", "serif", &["elegant"]),
    ("DM Serif Display", "serif", &["elegant", "modern"]),
    ("Bodoni Moda", "serif", &["elegant"]),
    ("Cinzel", "serif", &["gothic", "elegant"]),
    ("Abril Fatface", "serif", &["retro", "elegant"]),
    ("Alfa Slab One", "serif", &["brutal", "retro"]),
    ("Roboto Slab", "serif", &["tech"]),
    ("Zilla Slab", "serif", &["modern"]),
    ("Fraunces", "serif", &["weird", "retro"]),
    ("Young Serif", "serif", &["retro"]),
    ("IM Fell English", "serif", &["gothic"]),
    ("Spectral", "serif", &["minimal", "elegant"]),
    ("JetBrains Mono", "monospace", &["tech", "cyber"]),
    ("Fira Code", "monospace", &["tech"]),
    ("Source Code Pro", "monospace", &["tech", "minimal"]),
    ("IBM Plex Mono", "monospace", &["tech", "modern"]),
    ("Space Mono", "monospace", &["retro", "weird", "tech"]),
    ("Roboto Mono", "monospace", &["tech", "minimal"]),
    ("Share Tech Mono", "monospace", &["cyber", "tech"]),
    ("VT323", "monospace", &["retro", "gaming", "cyber"]),
    ("Major Mono Display", "monospace", &["weird", "futuristic"]),
    ("Courier Prime", "monospace", &["retro"]),
    ("Anonymous Pro", "monospace", &["tech"]),
    ("Syne Mono", "monospace", &["weird", "cyber"]),
    ("Dancing Script", "handwriting", &["elegant", "playful"]),
    ("Pacifico", "handwriting", &["retro", "playful"]),
    ("Caveat", "handwriting", &["playful"]),
    ("Satisfy", "handwriting", &["elegant", "retro"]),
    ("Great Vibes", "handwriting", &["elegant"]),
    ("Indie Flower", "handwriting", &["playful"]),
    ("Shadows Into Light", "handwriting", &["playful"]),
    ("Permanent Marker", "handwriting", &["brutal", "playful"]),
    ("Homemade Apple", "handwriting", &["weird"]),
    ("Rock Salt", "handwriting", &["brutal", "weird"]),
    ("Sacramento", "handwriting", &["elegant", "minimal"]),
    ("Kalam", "handwriting", &["playful"]),
    ("Orbitron", "display", &["futuristic", "cyber", "gaming"]),
    ("Press Start 2P", "display", &["retro", "gaming"]),
    ("Audiowide", "display", &["futuristic", "retro"]),
    ("Monoton", "display", &["retro", "weird"]),
    ("Bungee", "display", &["brutal", "gaming"]),
    ("Bungee Shade", "display", &["retro", "weird"]),
    ("Black Ops One", "display", &["gaming", "brutal"]),
    ("Russo One", "display", &["gaming", "futuristic"]),
    ("Michroma", "display", &["futuristic", "tech", "minimal"]),
    ("Righteous", "display", &["retro", "playful"]),
    ("Lobster", "display", &["retro", "playful"]),
    ("Bangers", "display", &["playful", "gaming"]),
    ("Creepster", "display", &["gothic", "weird"]),
    ("UnifrakturMaguntia", "display", &["gothic"]),
    ("Pirata One", "display", &["gothic"]),
    ("Metal Mania", "display", &["gothic", "brutal"]),
    ("Nosifer", "display", &["gothic", "weird"]),
    ("Rubik Glitch", "display", &["cyber", "weird"]),
    ("Rubik Mono One", "display", &["brutal", "modern"]),
    ("Silkscreen", "display", &["retro", "gaming", "cyber"]),
    ("Tilt Neon", "display", &["cyber", "retro"]),
    ("Wallpoet", "display", &["cyber", "brutal"]),
    ("Syncopate", "display", &["futuristic", "minimal"]),
    ("Bowlby One SC", "display", &["brutal"]),
    ("Fredoka", "display", &["playful"]),
    ("Luckiest Guy", "display", &["playful", "gaming"]),
    ("Climate Crisis", "display", &["brutal", "modern", "weird"]),
];

// ───────────────────────────────────────── tests ─────────────
