use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Seller attribution embedded in a listing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Seller {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A marketplace listing as the API and the mock catalog shape it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub description: String,
    /// Ordered image URLs, first one is the cover
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub seller: Seller,
    #[serde(default)]
    pub likes: u32,
    pub created_at: DateTime<Utc>,
    /// Detail-only field, absent from list responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<HashMap<String, String>>,
}

/// Payload for creating a listing from the form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial edit applied by the update action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ListingPatch {
    /// Merge the present fields into an existing listing
    pub fn apply(&self, listing: &mut Listing) {
        if let Some(title) = &self.title {
            listing.title = title.clone();
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(currency) = &self.currency {
            listing.currency = currency.clone();
        }
        if let Some(region) = &self.region {
            listing.region = region.clone();
        }
        if let Some(category) = &self.category {
            listing.category = category.clone();
        }
        if let Some(condition) = &self.condition {
            listing.condition = condition.clone();
        }
        if let Some(description) = &self.description {
            listing.description = description.clone();
        }
        if let Some(images) = &self.images {
            listing.images = images.clone();
        }
    }
}

/// Supported listing sort orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Newest,
    PriceLowHigh,
    PriceHighLow,
    Popular,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceLowHigh => "price_low_high",
            SortKey::PriceHighLow => "price_high_low",
            SortKey::Popular => "popular",
        }
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_low_high" => Ok(SortKey::PriceLowHigh),
            "price_high_low" => Ok(SortKey::PriceHighLow),
            "popular" => Ok(SortKey::Popular),
            _ => Ok(SortKey::Newest), // Default to newest
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Newest
    }
}

/// Filter and pagination state owned by the listings hook
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilters {
    pub region: String,
    pub search: String,
    pub sort: SortKey,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListingFilters {
    fn default() -> Self {
        Self {
            region: "Global".to_string(),
            search: String::new(),
            sort: SortKey::Newest,
            page: 1,
            page_size: 20,
        }
    }
}

/// Per-call overrides merged into the current filters by `fetch`
#[derive(Debug, Clone, Default)]
pub struct ListingOverrides {
    pub region: Option<String>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListingFilters {
    /// Setters reset the page so new criteria start from the first page.
    pub fn set_region(&mut self, region: String) {
        self.region = region;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Changing page keeps the other filters untouched.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }

    pub fn merged(&self, overrides: &ListingOverrides) -> ListingFilters {
        ListingFilters {
            region: overrides.region.clone().unwrap_or_else(|| self.region.clone()),
            search: overrides.search.clone().unwrap_or_else(|| self.search.clone()),
            sort: overrides.sort.unwrap_or(self.sort),
            page: overrides.page.unwrap_or(self.page),
            page_size: overrides.page_size.unwrap_or(self.page_size),
        }
    }

    /// Query string for `GET /listings`; all keys are always present,
    /// matching what the backend expects.
    pub fn to_query(&self) -> String {
        format!(
            "q={}&region={}&sort={}&page={}&pageSize={}",
            urlencoding::encode(&self.search),
            urlencoding::encode(&self.region),
            self.sort.as_str(),
            self.page,
            self.page_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_reset_page_except_pagination() {
        let mut filters = ListingFilters::default();
        filters.set_page(4);
        assert_eq!(filters.page, 4);

        filters.set_search("lamp".into());
        assert_eq!(filters.search, "lamp");
        assert_eq!(filters.page, 1);

        filters.set_page(3);
        filters.set_sort(SortKey::Popular);
        assert_eq!(filters.page, 1);

        filters.set_page(2);
        filters.set_page_size(10);
        // page_size does not reset page
        assert_eq!(filters.page, 2);
        assert_eq!(filters.page_size, 10);
    }

    #[test]
    fn test_merged_overrides_win() {
        let filters = ListingFilters {
            search: "boots".into(),
            page: 3,
            ..ListingFilters::default()
        };
        let merged = filters.merged(&ListingOverrides {
            page: Some(1),
            sort: Some(SortKey::PriceHighLow),
            ..ListingOverrides::default()
        });
        assert_eq!(merged.search, "boots");
        assert_eq!(merged.page, 1);
        assert_eq!(merged.sort, SortKey::PriceHighLow);
        assert_eq!(merged.region, "Global");
    }

    #[test]
    fn test_query_string_encodes_search() {
        let mut filters = ListingFilters::default();
        filters.set_search("denim jacket".into());
        assert_eq!(
            filters.to_query(),
            "q=denim%20jacket&region=Global&sort=newest&page=1&pageSize=20"
        );
    }

    #[test]
    fn test_sort_key_round_trip_with_default() {
        assert_eq!("price_low_high".parse::<SortKey>(), Ok(SortKey::PriceLowHigh));
        assert_eq!("anything-else".parse::<SortKey>(), Ok(SortKey::Newest));
        assert_eq!(SortKey::Popular.as_str(), "popular");
    }

    #[test]
    fn test_patch_applies_present_fields_only() {
        let mut listing = Listing {
            id: "mock-1".into(),
            title: "Vintage Denim Jacket".into(),
            price: 65.0,
            currency: "USD".into(),
            region: "Global".into(),
            category: "Clothing".into(),
            condition: "Good".into(),
            description: String::new(),
            images: vec![],
            seller: Seller::default(),
            likes: 3,
            created_at: chrono::Utc::now(),
            measurements: None,
        };

        let patch = ListingPatch {
            price: Some(58.0),
            ..ListingPatch::default()
        };
        patch.apply(&mut listing);

        assert_eq!(listing.price, 58.0);
        assert_eq!(listing.title, "Vintage Denim Jacket");
    }
}
