use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of a negotiation acted or is being filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }
}

/// Negotiation thread lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadStatus {
    Open,
    Accepted,
    Declined,
}

impl ThreadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadStatus::Open => "open",
            ThreadStatus::Accepted => "accepted",
            ThreadStatus::Declined => "declined",
        }
    }
}

/// Denormalized listing summary embedded in threads, swaps and transactions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListingSnapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Party {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Participants {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<Party>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestOffer {
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A negotiation thread pairing a listing with its offer exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferThread {
    pub id: String,
    #[serde(default)]
    pub listing: ListingSnapshot,
    #[serde(default)]
    pub participants: Participants,
    pub status: ThreadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_offer: Option<LatestOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<LastMessage>,
    pub updated_at: DateTime<Utc>,
    /// Which side the current user is on; only the mock catalog carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// One message in a thread; appended, never edited or removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferMessage {
    pub id: String,
    pub by: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// The backend's bare offer record (snake_case wire shape). The hook
/// normalizes it into a thread-like structure for the UI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OfferRecord {
    pub id: String,
    #[serde(default)]
    pub listing_id: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: ThreadStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OfferRecord {
    /// Normalize to a thread-like structure; participants are unknown
    /// without additional endpoints.
    pub fn into_thread(self) -> OfferThread {
        let currency = self.currency.clone().unwrap_or_else(|| "USD".to_string());
        OfferThread {
            id: self.id,
            listing: ListingSnapshot {
                id: self.listing_id,
                title: "Listing".to_string(),
                image: String::new(),
                price: self.amount,
                currency: currency.clone(),
            },
            participants: Participants::default(),
            status: self.status,
            latest_offer: Some(LatestOffer {
                amount: self.amount,
                currency,
                by: None,
            }),
            last_message: None,
            updated_at: self.updated_at.or(self.created_at).unwrap_or_else(Utc::now),
            role: None,
        }
    }
}

/// Filter and pagination state owned by the offers hook
#[derive(Debug, Clone, PartialEq)]
pub struct OfferFilters {
    /// None means "all"; the default mirrors the buyer-first inbox view
    pub role: Option<Role>,
    pub status: Option<ThreadStatus>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for OfferFilters {
    fn default() -> Self {
        Self {
            role: Some(Role::Buyer),
            status: None,
            page: 1,
            page_size: 20,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OfferOverrides {
    pub role: Option<Option<Role>>,
    pub status: Option<Option<ThreadStatus>>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl OfferFilters {
    pub fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
        self.page = 1;
    }

    pub fn set_status(&mut self, status: Option<ThreadStatus>) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }

    pub fn merged(&self, overrides: &OfferOverrides) -> OfferFilters {
        OfferFilters {
            role: overrides.role.unwrap_or(self.role),
            status: overrides.status.unwrap_or(self.status),
            page: overrides.page.unwrap_or(self.page),
            page_size: overrides.page_size.unwrap_or(self.page_size),
        }
    }

    /// The backend supports `status` and a `mine` boolean; any non-"all"
    /// role maps to `mine=true`.
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        if let Some(status) = self.status {
            pairs.push(format!("status={}", status.as_str()));
        }
        if self.role.is_some() {
            pairs.push("mine=true".to_string());
        }
        pairs.join("&")
    }
}
