use chrono::Utc;

use super::page_slice;
use crate::domain::models::{ListingSnapshot, Swap, SwapFilters, SwapSide, SwapStatus};

const NOTES: [&str; 4] = [
    "Let's trade?",
    "Looks cool!",
    "Interested in swapping?",
    "Can add cash on top.",
];
const STATUSES: [SwapStatus; 4] = [
    SwapStatus::Open,
    SwapStatus::Accepted,
    SwapStatus::Declined,
    SwapStatus::Open,
];
const SIDES: [SwapSide; 4] = [SwapSide::Mine, SwapSide::Theirs, SwapSide::Mine, SwapSide::Theirs];

/// Size of the synthetic swap list
pub const SWAP_COUNT: usize = 10;

/// Build a single swap; `side` decides which listing is presented as mine.
pub fn build_swap(
    id: &str,
    my_listing_id: &str,
    their_listing_id: &str,
    status: SwapStatus,
    note: &str,
    side: SwapSide,
) -> Swap {
    let now = Utc::now();
    let listing_a = ListingSnapshot {
        id: my_listing_id.to_string(),
        title: "Vintage Denim Jacket".to_string(),
        image: format!("https://picsum.photos/seed/swap-a-{my_listing_id}/600/600"),
        price: 75.0,
        currency: "USD".to_string(),
    };
    let listing_b = ListingSnapshot {
        id: their_listing_id.to_string(),
        title: "Retro Armchair".to_string(),
        image: format!("https://picsum.photos/seed/swap-b-{their_listing_id}/600/600"),
        price: 240.0,
        currency: "USD".to_string(),
    };

    let (mine, theirs) = match side {
        SwapSide::Mine => (listing_a, listing_b),
        SwapSide::Theirs => (listing_b, listing_a),
    };

    Swap {
        id: id.to_string(),
        mine,
        theirs,
        status,
        note: note.to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Generate the swap page for the given filters. Every mock swap carries
/// both sides, so only the status filter can exclude items; the side
/// filter shapes the query and the listing orientation.
pub fn swap_page(filters: &SwapFilters) -> (Vec<Swap>, usize) {
    let mut items: Vec<Swap> = (0..SWAP_COUNT)
        .map(|index| {
            build_swap(
                &format!("swap-{}", index + 1),
                &format!("mock-{}", index % 5 + 1),
                &format!("mock-{}", (index + 1) % 5 + 1),
                STATUSES[index % 4],
                NOTES[index % 4],
                SIDES[index % 4],
            )
        })
        .collect();

    if let Some(status) = filters.status {
        items.retain(|swap| swap.status == status);
    }

    let total = items.len();
    (page_slice(items, filters.page, filters.page_size), total)
}

/// Detail fallback for a single swap
pub fn swap_detail(id: &str) -> Swap {
    build_swap(id, "mock-1", "mock-2", SwapStatus::Open, "", SwapSide::Mine)
}

/// Synthetic result for a proposal that could not reach the backend
pub fn created_swap(my_listing_id: &str, their_listing_id: &str, note: &str) -> Swap {
    build_swap(
        &format!("swap-{}", Utc::now().timestamp_millis()),
        my_listing_id,
        their_listing_id,
        SwapStatus::Open,
        note,
        SwapSide::Mine,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_and_total() {
        let (items, total) = swap_page(&SwapFilters::default());
        assert_eq!(total, SWAP_COUNT);
        assert_eq!(items.len(), SWAP_COUNT);

        let mut filters = SwapFilters::default();
        filters.set_status(Some(SwapStatus::Accepted));
        let (items, total) = swap_page(&filters);
        assert!(total < SWAP_COUNT);
        assert!(items.iter().all(|s| s.status == SwapStatus::Accepted));
    }

    #[test]
    fn test_side_decides_listing_orientation() {
        let swap = build_swap("s1", "a", "b", SwapStatus::Open, "", SwapSide::Theirs);
        assert_eq!(swap.mine.id, "b");
        assert_eq!(swap.theirs.id, "a");
    }

    #[test]
    fn test_created_swap_is_open_and_mine_first() {
        let swap = created_swap("mock-4", "mock-2", "deal?");
        assert!(swap.id.starts_with("swap-"));
        assert_eq!(swap.status, SwapStatus::Open);
        assert_eq!(swap.mine.id, "mock-4");
        assert_eq!(swap.note, "deal?");
    }
}
