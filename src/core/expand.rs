//! Pool expansion.  Turns a small filtered pool into an endless-looking
//! render list.
//!
//! Each growth step appends one *page* of [`PAGE_SIZE`] items.  Page 0 is the
//! pool as-is; later pages reorder it with a cheap deterministic scramble:
//!
//! 1. rotate left by `(m * 17) mod len`
//! 2. reverse when `m` is even
//! 3. for `m > 2`, stable-sort by `(family_len + m) mod 3`
//!
//! and then cycle the reordered pool until the page is full.  The whole list
//! is rebuilt from `(pool, growth)` every time, so the same inputs always
//! produce the same output and growing never disturbs earlier pages.

use std::sync::Arc;

use super::catalog::FontDescriptor;

/// Items emitted per growth step.
pub const PAGE_SIZE: usize = 50;

const ROTATION_STEP: usize = 17;
const BUCKETS: usize = 3;

/// One entry in the render list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderItem {
    pub descriptor: Arc<FontDescriptor>,
    /// Which growth step produced this item.
    pub page_index: usize,
    /// Index within its page (`0..PAGE_SIZE`).
    pub position_in_page: usize,
    /// Unique across the whole list even though descriptors repeat.
    pub unique_key: String,
}

/// Ordering of the pool used for page `m`.
pub fn page_pool(pool: &[Arc<FontDescriptor>], m: usize) -> Vec<Arc<FontDescriptor>> {
    let mut current = pool.to_vec();
    if m == 0 || current.is_empty() {
        return current;
    }

    let rotation = (m * ROTATION_STEP) % current.len();
    current.rotate_left(rotation);

    if m % 2 == 0 {
        current.reverse();
    }

    if m > 2 {
        // `sort_by_key` is stable, so equal buckets keep the order above.
        current.sort_by_key(|font| (font.family.chars().count() + m) % BUCKETS);
    }

    current
}

/// Build the render list for `growth` pages of `pool`.
pub fn expand(pool: &[Arc<FontDescriptor>], growth: usize) -> Vec<RenderItem> {
    if pool.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::with_capacity(growth * PAGE_SIZE);
    for m in 0..growth {
        let current = page_pool(pool, m);
        for i in 0..PAGE_SIZE {
            let descriptor = Arc::clone(&current[i % current.len()]);
            let unique_key = format!("{}-v{m}-i{i}", descriptor.family);
            items.push(RenderItem {
                descriptor,
                page_index: m,
                position_in_page: i,
                unique_key,
            });
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn pool_of(families: &[&str]) -> Vec<Arc<FontDescriptor>> {
        families
            .iter()
            .map(|f| Arc::new(FontDescriptor::new(f, "display", &[])))
            .collect()
    }

    fn names(pool: &[Arc<FontDescriptor>]) -> Vec<String> {
        pool.iter().map(|f| f.family.clone()).collect()
    }

    #[test]
    fn first_page_is_the_pool_cycled() {
        let pool = pool_of(&["A", "B", "C"]);
        let items = expand(&pool, 1);
        assert_eq!(items.len(), PAGE_SIZE);
        assert_eq!(items[0].descriptor.family, "A");
        assert_eq!(items[3].descriptor.family, "A");
        assert_eq!(items[49].descriptor.family, "B");
        assert_eq!(items[49].unique_key, "B-v0-i49");
    }

    #[test]
    fn page_one_rotates_by_seventeen() {
        let pool = pool_of(&["A", "B", "C", "D", "E"]);
        assert_eq!(names(&page_pool(&pool, 1)), vec!["C", "D", "E", "A", "B"]);

        let items = expand(&pool, 2);
        let second: Vec<&str> = items[PAGE_SIZE..PAGE_SIZE + 5]
            .iter()
            .map(|i| i.descriptor.family.as_str())
            .collect();
        assert_eq!(second, vec!["C", "D", "E", "A", "B"]);
        assert_eq!(items[PAGE_SIZE].unique_key, "C-v1-i0");
        assert_eq!(items[PAGE_SIZE].page_index, 1);
    }

    #[test]
    fn even_pages_are_reversed() {
        // m = 2: rotation (34 % 5) = 4 → [E,A,B,C,D], reversed.
        let pool = pool_of(&["A", "B", "C", "D", "E"]);
        assert_eq!(names(&page_pool(&pool, 2)), vec!["D", "C", "B", "A", "E"]);
    }

    #[test]
    fn later_pages_bucket_by_family_length() {
        // m = 3: rotation (51 % 4) = 3 → [dddd, a, bb, ccc]; odd, no reverse;
        // keys (len + 3) % 3 → dddd:1, a:1, bb:2, ccc:0.
        let pool = pool_of(&["a", "bb", "ccc", "dddd"]);
        assert_eq!(names(&page_pool(&pool, 3)), vec!["ccc", "dddd", "a", "bb"]);
    }

    #[test]
    fn empty_pool_never_grows() {
        assert!(expand(&[], 0).is_empty());
        assert!(expand(&[], 7).is_empty());
    }

    fn arb_pool() -> impl Strategy<Value = Vec<Arc<FontDescriptor>>> {
        prop::collection::hash_set("[A-Z][a-z]{0,9}( [A-Z][a-z]{1,6})?", 1..40).prop_map(|set| {
            let mut families: Vec<String> = set.into_iter().collect();
            families.sort();
            families
                .iter()
                .map(|f| Arc::new(FontDescriptor::new(f, "serif", &[])))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn expansion_is_deterministic(pool in arb_pool(), growth in 0usize..8) {
            prop_assert_eq!(expand(&pool, growth), expand(&pool, growth));
        }

        #[test]
        fn every_page_holds_exactly_page_size(pool in arb_pool(), growth in 0usize..8) {
            prop_assert_eq!(expand(&pool, growth).len(), growth * PAGE_SIZE);
        }

        #[test]
        fn keys_are_unique(pool in arb_pool(), growth in 1usize..8) {
            let items = expand(&pool, growth);
            let keys: HashSet<&str> = items.iter().map(|i| i.unique_key.as_str()).collect();
            prop_assert_eq!(keys.len(), items.len());
        }

        #[test]
        fn growing_only_appends(pool in arb_pool(), growth in 0usize..8) {
            let before = expand(&pool, growth);
            let after = expand(&pool, growth + 1);
            prop_assert_eq!(&after[..before.len()], &before[..]);
        }

        #[test]
        fn each_page_is_a_permutation_of_the_pool(pool in arb_pool(), m in 0usize..12) {
            let mut reordered = names(&page_pool(&pool, m));
            let mut original = names(&pool);
            reordered.sort();
            original.sort();
            prop_assert_eq!(reordered, original);
        }
    }
}
