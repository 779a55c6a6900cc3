use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::offer::{ListingSnapshot, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Processing,
    Succeeded,
    Refunded,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Processing => "processing",
            TransactionStatus::Succeeded => "succeeded",
            TransactionStatus::Refunded => "refunded",
            TransactionStatus::Failed => "failed",
        }
    }
}

/// A purchase record from either side of the trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub listing: ListingSnapshot,
    pub role: Role,
    pub status: TransactionStatus,
    pub total: f64,
    #[serde(default)]
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Checkout initiation payload (`POST /transactions/checkout`)
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub listing_id: String,
    pub amount: f64,
    pub currency: String,
}

/// Payment-intent handle returned by checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub client_secret: String,
    pub transaction_id: String,
    #[serde(default)]
    pub listing_id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
}

/// Filter and pagination state owned by the transactions hook
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilters {
    /// None means "all"
    pub role: Option<Role>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TransactionFilters {
    fn default() -> Self {
        Self {
            role: None,
            page: 1,
            page_size: 20,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionOverrides {
    pub role: Option<Option<Role>>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl TransactionFilters {
    pub fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }

    pub fn merged(&self, overrides: &TransactionOverrides) -> TransactionFilters {
        TransactionFilters {
            role: overrides.role.unwrap_or(self.role),
            page: overrides.page.unwrap_or(self.page),
            page_size: overrides.page_size.unwrap_or(self.page_size),
        }
    }

    /// The transactions endpoint takes snake_case pagination and an empty
    /// `mine` when no role filter applies.
    pub fn to_query(&self) -> String {
        format!(
            "mine={}&page={}&page_size={}",
            if self.role.is_some() { "true" } else { "" },
            self.page,
            self.page_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_keeps_empty_mine() {
        let filters = TransactionFilters::default();
        assert_eq!(filters.to_query(), "mine=&page=1&page_size=20");

        let mut filters = TransactionFilters::default();
        filters.set_role(Some(Role::Seller));
        filters.set_page(2);
        assert_eq!(filters.to_query(), "mine=true&page=2&page_size=20");
    }

    #[test]
    fn test_role_setter_resets_page() {
        let mut filters = TransactionFilters::default();
        filters.set_page(3);
        filters.set_role(None);
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_checkout_session_wire_names() {
        let session: CheckoutSession = serde_json::from_str(
            r#"{"clientSecret":"cs_1","transactionId":"txn_9","listingId":"mock-2","amount":50.0,"currency":"USD"}"#,
        )
        .unwrap();
        assert_eq!(session.client_secret, "cs_1");
        assert_eq!(session.transaction_id, "txn_9");
    }
}
