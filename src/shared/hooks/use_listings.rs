//! Listings hook: paged catalog state with filters, CRUD actions, and a
//! synthetic-catalog fallback whenever the backend cannot be reached.

use dioxus::prelude::*;
use serde_json::Value;

use super::use_api_client;
use crate::domain::models::{Listing, ListingDraft, ListingFilters, ListingOverrides, ListingPatch, SortKey};
use crate::mocks;
use crate::shared::errors::{ApiError, ApiResult};
use crate::shared::logging;
use crate::shared::services::http::{decode_list, ApiClient};

/// Signal bundle owned by the listings hook
#[derive(Clone)]
pub struct ListingsState {
    pub listings: Signal<Vec<Listing>>,
    pub total: Signal<usize>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<ApiError>>,
    pub filters: Signal<ListingFilters>,
    client: ApiClient,
}

/// Fetch a listing page, falling back to the synthetic catalog when the
/// request fails. List failures never surface as errors.
pub async fn load_listings(client: &ApiClient, filters: &ListingFilters) -> (Vec<Listing>, usize) {
    let path = format!("/listings?{}", filters.to_query());
    match client.get(&path).await {
        Ok(response) => {
            let (items, total) = decode_list(response.json());
            logging::log_fetch_success("listings", items.len(), total);
            (items, total)
        }
        Err(err) => {
            logging::log_mock_fallback("listings", &err);
            mocks::listings::listing_page(filters)
        }
    }
}

/// Fetch one listing, falling back to a synthetic detail record.
pub async fn load_listing(client: &ApiClient, id: &str) -> Listing {
    match client.get(&format!("/listings/{id}")).await {
        Ok(response) => response
            .decode()
            .unwrap_or_else(|_| mocks::listings::listing_detail(id)),
        Err(err) => {
            logging::log_mock_fallback("listings", &err);
            mocks::listings::listing_detail(id)
        }
    }
}

/// Send a listing edit; the backend exposes edits as `PUT /listings/{id}`.
pub async fn send_listing_update(
    client: &ApiClient,
    id: &str,
    patch: &ListingPatch,
) -> ApiResult<Listing> {
    let body = serde_json::to_value(patch).unwrap_or(Value::Null);
    let response = client.put(&format!("/listings/{id}"), Some(&body)).await?;
    response.decode()
}

fn insert_created(items: &mut Vec<Listing>, total: &mut usize, created: Listing) {
    items.insert(0, created);
    *total += 1;
}

fn patch_in_place(items: &mut [Listing], id: &str, patch: &ListingPatch) -> Option<Listing> {
    let listing = items.iter_mut().find(|listing| listing.id == id)?;
    patch.apply(listing);
    Some(listing.clone())
}

fn remove_listing(items: &mut Vec<Listing>, total: &mut usize, id: &str) {
    let before = items.len();
    items.retain(|listing| listing.id != id);
    if items.len() < before {
        *total = total.saturating_sub(1);
    }
}

impl ListingsState {
    /// Fetch with the current filters merged with per-call overrides.
    pub async fn fetch(&mut self, overrides: ListingOverrides) {
        self.loading.set(true);
        self.error.set(None);

        let params = self.filters.peek().merged(&overrides);
        let (items, total) = load_listings(&self.client, &params).await;

        self.listings.set(items);
        self.total.set(total);
        self.loading.set(false);
    }

    /// Fetch a single listing by id.
    pub async fn get(&mut self, id: &str) -> Listing {
        self.loading.set(true);
        self.error.set(None);
        let listing = load_listing(&self.client, id).await;
        self.loading.set(false);
        listing
    }

    /// Create a listing. On success the page is refetched so server-side
    /// ordering applies; on failure a synthetic listing is prepended.
    pub async fn create(&mut self, draft: ListingDraft) -> Listing {
        self.loading.set(true);
        self.error.set(None);

        let body = serde_json::to_value(&draft).unwrap_or(Value::Null);
        let created = match self.client.post("/listings", Some(&body)).await {
            Ok(response) => {
                let created = response
                    .decode()
                    .unwrap_or_else(|_| mocks::listings::created_listing(&draft));
                self.fetch(ListingOverrides::default()).await;
                created
            }
            Err(err) => {
                logging::log_mutation_fallback("listings", "create", &err);
                let created = mocks::listings::created_listing(&draft);
                {
                    let mut items = self.listings.write();
                    let mut total = self.total.write();
                    insert_created(&mut items, &mut total, created.clone());
                }
                created
            }
        };

        self.loading.set(false);
        created
    }

    /// Apply a partial edit. On failure the patch is applied locally so the
    /// UI still reflects the edit.
    pub async fn update(&mut self, id: &str, patch: ListingPatch) -> Option<Listing> {
        self.loading.set(true);
        self.error.set(None);

        let updated = match send_listing_update(&self.client, id, &patch).await {
            Ok(listing) => {
                let mut items = self.listings.write();
                if let Some(slot) = items.iter_mut().find(|l| l.id == id) {
                    *slot = listing.clone();
                }
                Some(listing)
            }
            Err(err) => {
                logging::log_mutation_fallback("listings", "update", &err);
                patch_in_place(&mut self.listings.write(), id, &patch)
            }
        };

        self.loading.set(false);
        updated
    }

    /// Delete a listing; the item is removed locally even when the request
    /// fails.
    pub async fn delete(&mut self, id: &str) {
        self.loading.set(true);
        self.error.set(None);

        if let Err(err) = self.client.delete(&format!("/listings/{id}")).await {
            logging::log_mutation_fallback("listings", "delete", &err);
        }
        {
            let mut items = self.listings.write();
            let mut total = self.total.write();
            remove_listing(&mut items, &mut total, id);
        }

        self.loading.set(false);
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.filters.with_mut(|f| f.set_region(region.into()));
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.with_mut(|f| f.set_search(search.into()));
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.filters.with_mut(|f| f.set_sort(sort));
    }

    pub fn set_page(&mut self, page: usize) {
        self.filters.with_mut(|f| f.set_page(page));
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.filters.with_mut(|f| f.set_page_size(page_size));
    }
}

/// Listings hook; refetches automatically whenever the filters change.
pub fn use_listings() -> ListingsState {
    let client = use_api_client();
    let state = ListingsState {
        listings: use_signal(Vec::new),
        total: use_signal(|| 0usize),
        loading: use_signal(|| false),
        error: use_signal(|| None),
        filters: use_signal(ListingFilters::default),
        client,
    };

    use_effect({
        let state = state.clone();
        move || {
            // Reading the filters subscribes the effect to them.
            let _ = state.filters.read().clone();
            let mut state = state.clone();
            spawn(async move {
                state.fetch(ListingOverrides::default()).await;
            });
        }
    });

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::CredentialStore;

    fn unreachable_client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:9", CredentialStore::new())
    }

    #[tokio::test]
    async fn test_load_falls_back_to_the_synthetic_catalog() {
        let filters = ListingFilters::default();
        let (items, total) = load_listings(&unreachable_client(), &filters).await;
        let (expected, expected_total) = mocks::listings::listing_page(&filters);

        assert_eq!(total, expected_total);
        let ids: Vec<&str> = items.iter().map(|l| l.id.as_str()).collect();
        let expected_ids: Vec<&str> = expected.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, expected_ids);
    }

    #[tokio::test]
    async fn test_detail_falls_back_with_the_requested_id() {
        let listing = load_listing(&unreachable_client(), "mock-7").await;
        assert_eq!(listing.id, "mock-7");
        assert!(listing.measurements.is_some());
    }

    #[test]
    fn test_created_fallback_prepends_and_counts() {
        let mut items = vec![mocks::listings::listing_detail("mock-1")];
        let mut total = 24;
        let created = mocks::listings::created_listing(&ListingDraft {
            title: "Lamp".into(),
            price: 50.0,
            ..ListingDraft::default()
        });

        insert_created(&mut items, &mut total, created);
        assert_eq!(items.len(), 2);
        assert_eq!(total, 25);
        assert!(items[0].id.starts_with("mock-"));
        assert_eq!(items[0].title, "Lamp");
    }

    #[tokio::test]
    async fn test_update_goes_out_as_a_put() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 2048];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let body = r#"{"id":"mock-9","title":"Edited","price":58.0,"createdAt":"2024-05-01T12:00:00Z"}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            request
        });

        let client = ApiClient::new(format!("http://{addr}"), CredentialStore::new());
        let patch = ListingPatch {
            price: Some(58.0),
            ..ListingPatch::default()
        };
        let updated = send_listing_update(&client, "mock-9", &patch).await.unwrap();

        let request = server.await.unwrap();
        assert!(
            request.starts_with("PUT /listings/mock-9"),
            "unexpected request line: {request}"
        );
        assert_eq!(updated.id, "mock-9");
        assert_eq!(updated.price, 58.0);
    }

    #[test]
    fn test_update_fallback_patches_matching_item_only() {
        let mut items = vec![
            mocks::listings::listing_detail("mock-1"),
            mocks::listings::listing_detail("mock-2"),
        ];
        let patch = ListingPatch {
            price: Some(58.0),
            ..ListingPatch::default()
        };

        let updated = patch_in_place(&mut items, "mock-2", &patch);
        assert_eq!(updated.map(|l| l.price), Some(58.0));
        assert_eq!(items[0].price, 75.0);
        assert_eq!(items[1].price, 58.0);

        assert!(patch_in_place(&mut items, "missing", &patch).is_none());
    }

    #[test]
    fn test_delete_fallback_removes_and_saturates() {
        let mut items = vec![mocks::listings::listing_detail("mock-1")];
        let mut total = 1;

        remove_listing(&mut items, &mut total, "mock-1");
        assert!(items.is_empty());
        assert_eq!(total, 0);

        // Deleting something absent leaves the total alone.
        remove_listing(&mut items, &mut total, "mock-1");
        assert_eq!(total, 0);
    }
}
