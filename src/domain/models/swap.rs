use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::offer::ListingSnapshot;

/// Swap proposal lifecycle. Transitions are monotonic in practice but not
/// enforced as a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Open,
    Accepted,
    Declined,
    Cancelled,
}

impl SwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Open => "open",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Declined => "declined",
            SwapStatus::Cancelled => "cancelled",
        }
    }
}

/// Whose listing anchors the swap from the current user's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapSide {
    Mine,
    Theirs,
}

/// A proposed barter between two listings owned by different parties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    pub id: String,
    pub mine: ListingSnapshot,
    pub theirs: ListingSnapshot,
    pub status: SwapStatus,
    #[serde(default)]
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filter and pagination state owned by the swaps hook
#[derive(Debug, Clone, PartialEq)]
pub struct SwapFilters {
    /// None means "all"
    pub side: Option<SwapSide>,
    pub status: Option<SwapStatus>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for SwapFilters {
    fn default() -> Self {
        Self {
            side: None,
            status: None,
            page: 1,
            page_size: 20,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SwapOverrides {
    pub side: Option<Option<SwapSide>>,
    pub status: Option<Option<SwapStatus>>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl SwapFilters {
    pub fn set_side(&mut self, side: Option<SwapSide>) {
        self.side = side;
        self.page = 1;
    }

    pub fn set_status(&mut self, status: Option<SwapStatus>) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }

    pub fn merged(&self, overrides: &SwapOverrides) -> SwapFilters {
        SwapFilters {
            side: overrides.side.unwrap_or(self.side),
            status: overrides.status.unwrap_or(self.status),
            page: overrides.page.unwrap_or(self.page),
            page_size: overrides.page_size.unwrap_or(self.page_size),
        }
    }

    /// Same `mine`/`status` mapping as offers.
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        if let Some(status) = self.status {
            pairs.push(format!("status={}", status.as_str()));
        }
        if self.side.is_some() {
            pairs.push("mine=true".to_string());
        }
        pairs.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_mapping() {
        let filters = SwapFilters::default();
        assert_eq!(filters.to_query(), "");

        let mut filters = SwapFilters::default();
        filters.set_status(Some(SwapStatus::Cancelled));
        filters.set_side(Some(SwapSide::Mine));
        assert_eq!(filters.to_query(), "status=cancelled&mine=true");
    }

    #[test]
    fn test_setters_reset_page() {
        let mut filters = SwapFilters::default();
        filters.set_page(7);
        filters.set_side(Some(SwapSide::Theirs));
        assert_eq!(filters.page, 1);

        filters.set_page(2);
        filters.set_page_size(5);
        assert_eq!(filters.page, 2);
    }
}
