//! Category / tag filtering over the catalog.

use std::sync::Arc;

use super::catalog::{Catalog, FontDescriptor};

/// Category id that disables filtering.
pub const ALL: &str = "all";

/// Ordered subsequence of the catalog, recomputed on every category change.
pub type FilteredPool = Vec<Arc<FontDescriptor>>;

/// Select the fonts matching `selected`.
///
/// `"all"` returns the whole catalog.  Anything else matches a descriptor
/// whose category equals `selected` or whose tags contain it, compared
/// case-insensitively.  Catalog order is preserved and each descriptor is
/// yielded at most once, even when both category and a tag match.
pub fn filter(catalog: &Catalog, selected: &str) -> FilteredPool {
    if selected == ALL {
        return catalog.fonts().to_vec();
    }

    let needle = selected.to_lowercase();
    catalog
        .fonts()
        .iter()
        .filter(|font| {
            font.category.to_lowercase() == needle
                || font.tags.iter().any(|tag| tag.to_lowercase() == needle)
        })
        .cloned()
        .collect()
}
