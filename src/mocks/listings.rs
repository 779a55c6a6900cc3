use chrono::{Duration, Utc};
use std::collections::HashMap;

use super::{page_slice, PRICES, SELLERS, TITLES};
use crate::domain::models::{Listing, ListingDraft, ListingFilters, Seller, SortKey};

const CONDITIONS: [&str; 3] = ["Excellent", "Good", "Fair"];
const CATEGORIES: [&str; 3] = ["Clothing", "Furniture", "Accessories"];

/// Size of the synthetic catalog
pub const CATALOG_SIZE: usize = 24;

/// Deterministic stand-in for per-item popularity
fn likes_for(index: usize) -> u32 {
    ((index as u32) * 37 + 11) % 200
}

fn catalog_listing(index: usize, region: &str) -> Listing {
    let n = index + 1;
    Listing {
        id: format!("mock-{n}"),
        title: format!("{} #{n}", TITLES[index % 5]),
        price: PRICES[index % 5],
        currency: "USD".to_string(),
        region: region.to_string(),
        category: CATEGORIES[index % 3].to_string(),
        condition: CONDITIONS[index % 3].to_string(),
        description: "A lovely vintage item with character and charm.".to_string(),
        images: vec![format!("https://picsum.photos/seed/vintage-{index}/600/600")],
        seller: Seller {
            id: format!("seller-{}", index % 4 + 1),
            name: SELLERS[index % 4].to_string(),
        },
        likes: likes_for(index),
        created_at: Utc::now() - Duration::days(index as i64),
        measurements: None,
    }
}

/// Generate the listing page for the given filters: fixed catalog,
/// case-insensitive title search, sort, then page slice.
pub fn listing_page(filters: &ListingFilters) -> (Vec<Listing>, usize) {
    let mut filtered: Vec<Listing> = (0..CATALOG_SIZE)
        .map(|index| catalog_listing(index, &filters.region))
        .collect();

    if !filters.search.is_empty() {
        let needle = filters.search.to_lowercase();
        filtered.retain(|listing| listing.title.to_lowercase().contains(&needle));
    }

    match filters.sort {
        SortKey::PriceLowHigh => filtered.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHighLow => filtered.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Popular => filtered.sort_by(|a, b| b.likes.cmp(&a.likes)),
        SortKey::Newest => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    let total = filtered.len();
    (page_slice(filtered, filters.page, filters.page_size), total)
}

/// Detail fallback for a single listing
pub fn listing_detail(id: &str) -> Listing {
    Listing {
        id: id.to_string(),
        title: "Vintage Denim Jacket".to_string(),
        price: 75.0,
        currency: "USD".to_string(),
        region: "Global".to_string(),
        category: "Clothing".to_string(),
        condition: "Good".to_string(),
        description: "Classic piece from the 80s, well preserved and stylish.".to_string(),
        images: vec!["https://picsum.photos/seed/vintage-detail/800/800".to_string()],
        seller: Seller {
            id: "seller-1".to_string(),
            name: "Ava".to_string(),
        },
        likes: 42,
        created_at: Utc::now(),
        measurements: Some(HashMap::from([
            ("chest".to_string(), "40in".to_string()),
            ("length".to_string(), "25in".to_string()),
        ])),
    }
}

/// Synthetic result for a create that could not reach the backend
pub fn created_listing(draft: &ListingDraft) -> Listing {
    Listing {
        id: format!("mock-{}", Utc::now().timestamp_millis()),
        title: draft.title.clone(),
        price: draft.price,
        currency: draft.currency.clone().unwrap_or_else(|| "USD".to_string()),
        region: draft.region.clone().unwrap_or_else(|| "Global".to_string()),
        category: draft.category.clone().unwrap_or_default(),
        condition: draft.condition.clone().unwrap_or_default(),
        description: draft.description.clone().unwrap_or_default(),
        images: draft.images.clone(),
        seller: Seller {
            id: "seller-you".to_string(),
            name: "You".to_string(),
        },
        likes: 0,
        created_at: Utc::now(),
        measurements: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_and_total() {
        let filters = ListingFilters {
            page: 2,
            page_size: 10,
            ..ListingFilters::default()
        };
        let (items, total) = listing_page(&filters);
        assert_eq!(total, CATALOG_SIZE);
        assert_eq!(items.len(), 10);

        let filters = ListingFilters {
            page: 3,
            page_size: 10,
            ..ListingFilters::default()
        };
        let (items, _) = listing_page(&filters);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_sort_orders() {
        let base = ListingFilters {
            page_size: CATALOG_SIZE,
            ..ListingFilters::default()
        };

        let (items, _) = listing_page(&ListingFilters {
            sort: SortKey::PriceLowHigh,
            ..base.clone()
        });
        assert!(items.windows(2).all(|w| w[0].price <= w[1].price));

        let (items, _) = listing_page(&ListingFilters {
            sort: SortKey::PriceHighLow,
            ..base.clone()
        });
        assert!(items.windows(2).all(|w| w[0].price >= w[1].price));

        let (items, _) = listing_page(&ListingFilters {
            sort: SortKey::Popular,
            ..base.clone()
        });
        assert!(items.windows(2).all(|w| w[0].likes >= w[1].likes));

        let (items, _) = listing_page(&ListingFilters {
            sort: SortKey::Newest,
            ..base
        });
        assert!(items.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filters = ListingFilters {
            search: "LAMP".to_string(),
            page_size: CATALOG_SIZE,
            ..ListingFilters::default()
        };
        let (items, total) = listing_page(&filters);
        assert!(total > 0);
        assert!(items.iter().all(|l| l.title.contains("Mid-century Lamp")));
    }

    #[test]
    fn test_identical_filters_reproduce_identical_ordering() {
        let filters = ListingFilters {
            sort: SortKey::Popular,
            page_size: CATALOG_SIZE,
            ..ListingFilters::default()
        };
        let (first, first_total) = listing_page(&filters);
        let (second, second_total) = listing_page(&filters);
        assert_eq!(first_total, second_total);
        let ids: Vec<&str> = first.iter().map(|l| l.id.as_str()).collect();
        let again: Vec<&str> = second.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, again);
        assert_eq!(
            first.iter().map(|l| l.likes).collect::<Vec<_>>(),
            second.iter().map(|l| l.likes).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_created_listing_carries_the_draft() {
        let draft = ListingDraft {
            title: "Lamp".to_string(),
            price: 50.0,
            ..ListingDraft::default()
        };
        let created = created_listing(&draft);
        assert!(created.id.starts_with("mock-"));
        assert_eq!(created.title, "Lamp");
        assert_eq!(created.price, 50.0);
        assert_eq!(created.likes, 0);
        assert_eq!(created.currency, "USD");
    }
}
