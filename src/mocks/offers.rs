use chrono::{Duration, Utc};

use super::{page_slice, PRICES, SELLERS, TITLES};
use crate::domain::models::{
    LastMessage, LatestOffer, ListingSnapshot, OfferFilters, OfferMessage, OfferThread,
    Participants, Party, Role, ThreadStatus,
};

const LAST_MESSAGES: [&str; 4] = [
    "Is this still available?",
    "Could you do a better price?",
    "Can you ship to EU?",
    "Thanks!",
];
const OFFER_AMOUNTS: [f64; 5] = [55.0, 220.0, 100.0, 80.0, 30.0];
const ROLES: [Role; 2] = [Role::Buyer, Role::Seller];
const STATUSES: [ThreadStatus; 3] = [ThreadStatus::Open, ThreadStatus::Accepted, ThreadStatus::Declined];

/// Size of the synthetic thread inbox
pub const INBOX_SIZE: usize = 14;

fn inbox_thread(index: usize) -> OfferThread {
    let when = Utc::now() - Duration::hours(index as i64);
    OfferThread {
        id: format!("thread-{}", index + 1),
        listing: ListingSnapshot {
            id: format!("mock-{}", index + 1),
            title: TITLES[index % 5].to_string(),
            image: format!("https://picsum.photos/seed/offers-{index}/600/600"),
            price: PRICES[index % 5],
            currency: "USD".to_string(),
        },
        participants: Participants {
            buyer: Some(Party { name: "You".to_string() }),
            seller: Some(Party { name: SELLERS[index % 4].to_string() }),
        },
        status: STATUSES[index % 3],
        latest_offer: Some(LatestOffer {
            amount: OFFER_AMOUNTS[index % 5],
            currency: "USD".to_string(),
            by: Some(ROLES[index % 2]),
        }),
        last_message: Some(LastMessage {
            text: LAST_MESSAGES[index % 4].to_string(),
            created_at: when,
        }),
        updated_at: when,
        role: Some(ROLES[index % 2]),
    }
}

/// Generate the thread page for the given filters
pub fn offer_page(filters: &OfferFilters) -> (Vec<OfferThread>, usize) {
    let mut items: Vec<OfferThread> = (0..INBOX_SIZE).map(inbox_thread).collect();

    if let Some(role) = filters.role {
        items.retain(|thread| thread.role == Some(role));
    }
    if let Some(status) = filters.status {
        items.retain(|thread| thread.status == status);
    }

    let total = items.len();
    (page_slice(items, filters.page, filters.page_size), total)
}

/// Fixed 3-message conversation used as the thread fallback
pub fn thread(thread_id: &str) -> (OfferThread, Vec<OfferMessage>) {
    let now = Utc::now();
    let thread = OfferThread {
        id: thread_id.to_string(),
        listing: ListingSnapshot {
            id: "mock-1".to_string(),
            title: "Vintage Denim Jacket".to_string(),
            image: "https://picsum.photos/seed/offer-thread/800/800".to_string(),
            price: 75.0,
            currency: "USD".to_string(),
        },
        participants: Participants {
            buyer: Some(Party { name: "You".to_string() }),
            seller: Some(Party { name: "Ava".to_string() }),
        },
        status: ThreadStatus::Open,
        latest_offer: Some(LatestOffer {
            amount: 60.0,
            currency: "USD".to_string(),
            by: Some(Role::Buyer),
        }),
        last_message: None,
        updated_at: now,
        role: None,
    };

    let messages = vec![
        OfferMessage {
            id: "m1".to_string(),
            by: Role::Buyer,
            text: "Hi! Would you take 60?".to_string(),
            amount: Some(60.0),
            currency: "USD".to_string(),
            created_at: now - Duration::seconds(3600),
        },
        OfferMessage {
            id: "m2".to_string(),
            by: Role::Seller,
            text: "Could you do 68?".to_string(),
            amount: Some(68.0),
            currency: "USD".to_string(),
            created_at: now - Duration::seconds(3200),
        },
        OfferMessage {
            id: "m3".to_string(),
            by: Role::Buyer,
            text: "Meet at 65?".to_string(),
            amount: Some(65.0),
            currency: "USD".to_string(),
            created_at: now - Duration::seconds(3000),
        },
    ];

    (thread, messages)
}

/// Synthetic thread for an offer that could not reach the backend
pub fn created_thread(listing_id: &str, amount: f64, currency: &str, note: &str) -> OfferThread {
    let now = Utc::now();
    OfferThread {
        id: format!("thread-{}", now.timestamp_millis()),
        listing: ListingSnapshot {
            id: listing_id.to_string(),
            title: "Vintage Item".to_string(),
            image: format!("https://picsum.photos/seed/listing-{listing_id}/600/600"),
            price: (amount * 1.3).floor(),
            currency: currency.to_string(),
        },
        participants: Participants {
            buyer: Some(Party { name: "You".to_string() }),
            seller: Some(Party { name: "Ava".to_string() }),
        },
        status: ThreadStatus::Open,
        latest_offer: Some(LatestOffer {
            amount,
            currency: currency.to_string(),
            by: Some(Role::Buyer),
        }),
        last_message: Some(LastMessage {
            text: if note.is_empty() { "Offer created".to_string() } else { note.to_string() },
            created_at: now,
        }),
        updated_at: now,
        role: Some(Role::Buyer),
    }
}
