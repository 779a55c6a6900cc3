use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{page_slice, PRICES, TITLES};
use crate::domain::models::{
    CheckoutSession, ListingSnapshot, Role, Transaction, TransactionFilters, TransactionStatus,
};

const LIST_STATUSES: [TransactionStatus; 3] = [
    TransactionStatus::Processing,
    TransactionStatus::Succeeded,
    TransactionStatus::Failed,
];
const DETAIL_STATUSES: [TransactionStatus; 4] = [
    TransactionStatus::Processing,
    TransactionStatus::Succeeded,
    TransactionStatus::Refunded,
    TransactionStatus::Failed,
];
const ROLES: [Role; 2] = [Role::Buyer, Role::Seller];

/// Size of the synthetic history
pub const HISTORY_SIZE: usize = 12;

fn history_transaction(index: usize) -> Transaction {
    Transaction {
        id: format!("txn_{}", index + 1),
        listing: ListingSnapshot {
            id: format!("mock-{}", index + 1),
            title: TITLES[index % 5].to_string(),
            image: format!("https://picsum.photos/seed/txn-{index}/600/600"),
            price: PRICES[index % 5],
            currency: "USD".to_string(),
        },
        role: ROLES[index % 2],
        status: LIST_STATUSES[index % 3],
        total: PRICES[index % 5],
        currency: "USD".to_string(),
        created_at: Utc::now() - Duration::days(index as i64),
    }
}

/// Generate the transaction page for the given filters
pub fn transaction_page(filters: &TransactionFilters) -> (Vec<Transaction>, usize) {
    let mut items: Vec<Transaction> = (0..HISTORY_SIZE).map(history_transaction).collect();

    if let Some(role) = filters.role {
        items.retain(|txn| txn.role == role);
    }

    let total = items.len();
    (page_slice(items, filters.page, filters.page_size), total)
}

/// Detail fallback; the status is a fixed function of the id so repeated
/// lookups agree with each other.
pub fn transaction_detail(id: &str) -> Transaction {
    let ordinal: usize = id
        .split('_')
        .nth(1)
        .and_then(|n| n.parse().ok())
        .unwrap_or(1);
    Transaction {
        id: id.to_string(),
        listing: ListingSnapshot {
            id: format!("listing-{ordinal}"),
            title: "Vintage Denim Jacket".to_string(),
            image: "https://picsum.photos/seed/txn/640/640".to_string(),
            price: 75.0,
            currency: "USD".to_string(),
        },
        role: Role::Buyer,
        status: DETAIL_STATUSES[id.bytes().map(usize::from).sum::<usize>() % 4],
        total: 75.0,
        currency: "USD".to_string(),
        created_at: Utc::now(),
    }
}

/// Synthetic checkout handle when the backend is unreachable
pub fn checkout_session(listing_id: &str, amount: f64, currency: &str) -> CheckoutSession {
    CheckoutSession {
        client_secret: format!("mock_secret_{}", Utc::now().timestamp_millis()),
        transaction_id: synthetic_transaction_id(),
        listing_id: listing_id.to_string(),
        amount,
        currency: currency.to_string(),
    }
}

/// Short opaque id in the backend's `txn_xxxxxxx` shape
pub fn synthetic_transaction_id() -> String {
    let alphabet = Uuid::new_v4().simple().to_string();
    format!("txn_{}", &alphabet[..7])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_filter() {
        let (items, total) = transaction_page(&TransactionFilters::default());
        assert_eq!(total, HISTORY_SIZE);
        assert_eq!(items.len(), HISTORY_SIZE);

        let mut filters = TransactionFilters::default();
        filters.set_role(Some(Role::Seller));
        let (items, total) = transaction_page(&filters);
        assert_eq!(total, HISTORY_SIZE / 2);
        assert!(items.iter().all(|t| t.role == Role::Seller));
    }

    #[test]
    fn test_detail_status_is_stable_per_id() {
        let first = transaction_detail("txn_3");
        let second = transaction_detail("txn_3");
        assert_eq!(first.status, second.status);
        assert_eq!(first.listing.id, "listing-3");
    }

    #[test]
    fn test_checkout_session_shape() {
        let session = checkout_session("mock-2", 50.0, "USD");
        assert!(session.client_secret.starts_with("mock_secret_"));
        assert!(session.transaction_id.starts_with("txn_"));
        assert_eq!(session.transaction_id.len(), "txn_".len() + 7);
        assert_eq!(session.listing_id, "mock-2");
        assert_eq!(session.amount, 50.0);
    }
}
