//! Category ids, their labels, and the vibe phrases sent to the text model.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
}

const fn cat(id: &'static str, label: &'static str) -> Category {
    Category { id, label }
}

/// Plain typographic classes (the first entry disables filtering).
pub const STANDARD_CATEGORIES: &[Category] = &[
    cat("all", "All Types"),
    cat("sans-serif", "Sans Serif"),
    cat("serif", "Serif"),
    cat("monospace", "Monospace"),
    cat("handwriting", "Handwriting"),
    cat("display", "Display"),
];

/// Mood tags; the random-vibe action draws from these only.
pub const VIBE_CATEGORIES: &[Category] = &[
    cat("cyber", "Cyberpunk"),
    cat("retro", "Retro"),
    cat("minimal", "Minimalist"),
    cat("elegant", "Elegant"),
    cat("playful", "Playful"),
    cat("brutal", "Brutalist"),
    cat("weird", "Weird"),
    cat("futuristic", "Futuristic"),
    cat("tech", "Technical"),
    cat("gothic", "Gothic"),
    cat("gaming", "Gaming"),
    cat("modern", "Modern"),
];

/// Picker groups in display order.
pub const CATEGORY_GROUPS: &[(&str, &[Category])] =
    &[("Standard", STANDARD_CATEGORIES), ("Vibe", VIBE_CATEGORIES)];

/// Sample sentences available without the text model.  The first one is the
/// default and is restored on reset.
pub const PRESET_TEXTS: &[&str] = &[
    "Sphinx of black quartz, judge my vow.",
    "Pack my box with five dozen liquor jugs.",
    "How vexingly quick daft zebras jump!",
];

/// Every category in picker order.
pub fn all_categories() -> impl Iterator<Item = Category> {
    CATEGORY_GROUPS
        .iter()
        .flat_map(|(_, items)| items.iter().copied())
}

pub fn label_for(id: &str) -> &str {
    all_categories()
        .find(|c| c.id == id)
        .map(|c| c.label)
        .unwrap_or(id)
}

/// Prompt fragment describing the mood of a category.  Unknown ids are
/// passed through unchanged.
pub fn vibe_phrase(id: &str) -> &str {
    match id {
        "all" => "general typography",
        "sans-serif" => "modern tech",
        "serif" => "classic literature",
        "monospace" => "coding terminal hacker",
        "handwriting" => "personal handwriting note",
        "display" => "loud magazine headline",
        "cyber" => "neo-tokyo cyberpunk neon",
        "retro" => "80s arcade vintage aesthetic",
        "minimal" => "clean swiss minimalism",
        "elegant" => "luxury fashion boutique",
        "playful" => "childhood toy brand",
        "brutal" => "concrete brutalist architecture",
        "weird" => "abstract glitchy experimental",
        "futuristic" => "interstellar space journey",
        "tech" => "blueprints and engineering",
        "gothic" => "dark medieval castle",
        "gaming" => "esports tournament UI",
        "modern" => "contemporary art gallery",
        other => other,
    }
}

/// Uniformly pick one of the vibe categories.
pub fn random_vibe<R: Rng + ?Sized>(rng: &mut R) -> Category {
    *VIBE_CATEGORIES
        .choose(rng)
        .unwrap_or(&VIBE_CATEGORIES[0])
}
