// Custom Dioxus hooks, one per resource
pub mod use_auth;
pub mod use_listings;
pub mod use_offers;
pub mod use_swaps;
pub mod use_transactions;

pub use use_auth::{use_auth, AuthPhase, AuthState};
pub use use_listings::{use_listings, ListingsState};
pub use use_offers::{use_offers, OffersState};
pub use use_swaps::{use_swaps, SwapsState};
pub use use_transactions::{use_transactions, TransactionsState};

use dioxus::prelude::*;

use crate::shared::services::http::ApiClient;
use crate::shared::storage::CredentialStore;

/// Shared API client for the hooks. The app root provides one through
/// context so every hook sees the same credential store; hooks used in
/// isolation fall back to a client built from the environment.
pub fn use_api_client() -> ApiClient {
    use_hook(|| {
        try_consume_context::<ApiClient>()
            .unwrap_or_else(|| ApiClient::from_env(CredentialStore::new()))
    })
}
