//! Deterministic mock-data generators.
//!
//! These stand in for the backend whenever a real call fails. They are
//! pure functions of the filter parameters: the same input reproduces the
//! same filtered, sorted ordering, which the hook tests rely on.

pub mod listings;
pub mod offers;
pub mod swaps;
pub mod transactions;

/// Shared catalog vocabulary across resources
pub(crate) const TITLES: [&str; 5] = [
    "Vintage Denim Jacket",
    "Retro Armchair",
    "Classic Leather Boots",
    "Mid-century Lamp",
    "Silk Scarf",
];
pub(crate) const PRICES: [f64; 5] = [65.0, 240.0, 120.0, 90.0, 35.0];
pub(crate) const SELLERS: [&str; 4] = ["Ava", "Liam", "Mia", "Noah"];

/// Slice out one page: start at `(page-1)*page_size`, return at most
/// `page_size` items.
pub(crate) fn page_slice<T>(items: Vec<T>, page: usize, page_size: usize) -> Vec<T> {
    let page = page.max(1);
    let size = if page_size == 0 { 20 } else { page_size };
    items.into_iter().skip((page - 1) * size).take(size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_slice_math() {
        let items: Vec<usize> = (0..24).collect();

        let page = page_slice(items.clone(), 1, 10);
        assert_eq!(page, (0..10).collect::<Vec<_>>());

        let page = page_slice(items.clone(), 2, 10);
        assert_eq!(page, (10..20).collect::<Vec<_>>());

        // Last page holds the remainder
        let page = page_slice(items.clone(), 3, 10);
        assert_eq!(page, (20..24).collect::<Vec<_>>());

        // Past the end is empty, page 0 is treated as page 1
        assert!(page_slice(items.clone(), 4, 10).is_empty());
        assert_eq!(page_slice(items, 0, 10).len(), 10);
    }
}
