//! Swaps hook: barter proposals between listings, with status transitions
//! and the usual synthetic fallback when the backend is unreachable.

use chrono::Utc;
use dioxus::prelude::*;
use serde_json::json;

use super::use_api_client;
use crate::domain::models::{Swap, SwapFilters, SwapOverrides, SwapSide, SwapStatus};
use crate::mocks;
use crate::shared::errors::ApiError;
use crate::shared::logging;
use crate::shared::services::http::{decode_list, ApiClient};

/// Signal bundle owned by the swaps hook
#[derive(Clone)]
pub struct SwapsState {
    pub swaps: Signal<Vec<Swap>>,
    pub total: Signal<usize>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<ApiError>>,
    pub filters: Signal<SwapFilters>,
    client: ApiClient,
}

/// Fetch the swap list, falling back to the synthetic swaps on failure.
pub async fn load_swaps(client: &ApiClient, filters: &SwapFilters) -> (Vec<Swap>, usize) {
    let query = filters.to_query();
    let path = if query.is_empty() {
        "/swaps".to_string()
    } else {
        format!("/swaps?{query}")
    };

    match client.get(&path).await {
        Ok(response) => {
            let (items, total) = decode_list(response.json());
            logging::log_fetch_success("swaps", items.len(), total);
            (items, total)
        }
        Err(err) => {
            logging::log_mock_fallback("swaps", &err);
            mocks::swaps::swap_page(filters)
        }
    }
}

/// Fetch one swap, falling back to a synthetic detail record.
pub async fn load_swap(client: &ApiClient, id: &str) -> Swap {
    match client.get(&format!("/swaps/{id}")).await {
        Ok(response) => response
            .decode()
            .unwrap_or_else(|_| mocks::swaps::swap_detail(id)),
        Err(err) => {
            logging::log_mock_fallback("swaps", &err);
            mocks::swaps::swap_detail(id)
        }
    }
}

fn mark_swap_status(items: &mut [Swap], id: &str, status: SwapStatus) {
    if let Some(swap) = items.iter_mut().find(|swap| swap.id == id) {
        swap.status = status;
        swap.updated_at = Utc::now();
    }
}

impl SwapsState {
    pub async fn fetch(&mut self, overrides: SwapOverrides) {
        self.loading.set(true);
        self.error.set(None);

        let params = self.filters.peek().merged(&overrides);
        let (items, total) = load_swaps(&self.client, &params).await;

        self.swaps.set(items);
        self.total.set(total);
        self.loading.set(false);
    }

    pub async fn get(&mut self, id: &str) -> Swap {
        self.loading.set(true);
        self.error.set(None);
        let swap = load_swap(&self.client, id).await;
        self.loading.set(false);
        swap
    }

    /// Propose a swap between my listing and theirs. On failure a synthetic
    /// open swap is prepended.
    pub async fn create_swap(&mut self, my_listing_id: &str, their_listing_id: &str, note: &str) -> Swap {
        self.loading.set(true);
        self.error.set(None);

        let body = json!({
            "proposer_listing_id": my_listing_id,
            "recipient_listing_id": their_listing_id,
            "notes": note,
        });
        let swap = match self.client.post("/swaps", Some(&body)).await {
            Ok(response) => {
                let swap = response.decode().unwrap_or_else(|_| {
                    mocks::swaps::created_swap(my_listing_id, their_listing_id, note)
                });
                self.fetch(SwapOverrides::default()).await;
                swap
            }
            Err(err) => {
                logging::log_mutation_fallback("swaps", "create", &err);
                let swap = mocks::swaps::created_swap(my_listing_id, their_listing_id, note);
                {
                    let mut items = self.swaps.write();
                    items.insert(0, swap.clone());
                }
                self.total.with_mut(|t| *t += 1);
                swap
            }
        };

        self.loading.set(false);
        swap
    }

    /// Move a swap to a new status. Accept and decline have dedicated
    /// endpoints; cancel (and reopen) are local-only transitions.
    pub async fn update_status(&mut self, id: &str, status: SwapStatus) -> SwapStatus {
        self.loading.set(true);
        self.error.set(None);

        let action = match status {
            SwapStatus::Accepted => Some("accept"),
            SwapStatus::Declined => Some("decline"),
            _ => None,
        };

        if let Some(action) = action {
            match self.client.post(&format!("/swaps/{id}/{action}"), None).await {
                Ok(_) => {
                    mark_swap_status(&mut self.swaps.write(), id, status);
                    self.fetch(SwapOverrides::default()).await;
                }
                Err(err) => {
                    logging::log_mutation_fallback("swaps", action, &err);
                    mark_swap_status(&mut self.swaps.write(), id, status);
                }
            }
        } else {
            mark_swap_status(&mut self.swaps.write(), id, status);
        }

        self.loading.set(false);
        status
    }

    pub fn set_side(&mut self, side: Option<SwapSide>) {
        self.filters.with_mut(|f| f.set_side(side));
    }

    pub fn set_status(&mut self, status: Option<SwapStatus>) {
        self.filters.with_mut(|f| f.set_status(status));
    }

    pub fn set_page(&mut self, page: usize) {
        self.filters.with_mut(|f| f.set_page(page));
    }
}

/// Swaps hook; refetches whenever the filters change.
pub fn use_swaps() -> SwapsState {
    let client = use_api_client();
    let state = SwapsState {
        swaps: use_signal(Vec::new),
        total: use_signal(|| 0usize),
        loading: use_signal(|| false),
        error: use_signal(|| None),
        filters: use_signal(SwapFilters::default),
        client,
    };

    use_effect({
        let state = state.clone();
        move || {
            let _ = state.filters.read().clone();
            let mut state = state.clone();
            spawn(async move {
                state.fetch(SwapOverrides::default()).await;
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
    async fn test_list_falls_back_to_the_synthetic_swaps() {
        let filters = SwapFilters::default();
        let (items, total) = load_swaps(&unreachable_client(), &filters).await;
        assert_eq!(total, mocks::swaps::SWAP_COUNT);
        assert_eq!(items.len(), mocks::swaps::SWAP_COUNT);
    }

    #[tokio::test]
    async fn test_detail_falls_back_with_the_requested_id() {
        let swap = load_swap(&unreachable_client(), "swap-4").await;
        assert_eq!(swap.id, "swap-4");
        assert_eq!(swap.status, SwapStatus::Open);
    }

    #[test]
    fn test_mark_swap_status_touches_only_the_match() {
        let (mut items, _) = mocks::swaps::swap_page(&SwapFilters::default());
        let untouched = items[1].status;

        mark_swap_status(&mut items, "swap-1", SwapStatus::Cancelled);
        assert_eq!(items[0].status, SwapStatus::Cancelled);
        assert_eq!(items[1].status, untouched);

        // No panic on a missing id
        mark_swap_status(&mut items, "missing", SwapStatus::Accepted);
    }
}
