//! Application root and the marketplace home page.

use dioxus::prelude::*;

use crate::app::components::{ErrorBanner, ListingCard, LoadingIndicator, OfferRow};
use crate::domain::models::SortKey;
use crate::shared::hooks::{use_auth, use_listings, use_offers, AuthPhase};
use crate::shared::services::http::ApiClient;
use crate::shared::storage::CredentialStore;

/// App root: provides the shared API client so every hook resolves the
/// same credential store.
#[component]
pub fn App() -> Element {
    use_context_provider(|| ApiClient::from_env(CredentialStore::new()));

    rsx! {
        main { class: "market-app",
            MarketHome {}
        }
    }
}

#[component]
pub fn MarketHome() -> Element {
    let listings = use_listings();
    let offers = use_offers();
    let auth = use_auth();

    let items = listings.listings.read().clone();
    let total = *listings.total.read();
    let loading = *listings.loading.read();
    let filters = listings.filters.read().clone();
    let page_count = total.div_ceil(filters.page_size.max(1)).max(1);
    let sort_value = filters.sort.as_str();

    let inbox = offers.offers.read().clone();
    let auth_error = auth.error.read().clone();

    let session_label = match auth.phase() {
        AuthPhase::Authenticated => auth
            .user
            .read()
            .as_ref()
            .map(|user| user.username.clone().unwrap_or_else(|| user.email.clone()))
            .unwrap_or_else(|| "signed in".to_string()),
        AuthPhase::Hydrating => "checking session…".to_string(),
        AuthPhase::Error => "session error".to_string(),
        AuthPhase::Anonymous => "guest".to_string(),
    };

    let mut search_state = listings.clone();
    let mut sort_state = listings.clone();
    let mut prev_state = listings.clone();
    let mut next_state = listings.clone();
    let prev_page = filters.page;
    let next_page = filters.page;

    rsx! {
        header { class: "market-header",
            h1 { "Vintage Market" }
            span { class: "session-label", "{session_label}" }
        }

        if let Some(error) = auth_error {
            ErrorBanner { error }
        }

        section { class: "market-controls",
            input {
                class: "search-input",
                r#type: "search",
                placeholder: "Search listings",
                value: "{filters.search}",
                oninput: move |evt| search_state.set_search(evt.value()),
            }
            select {
                class: "sort-select",
                value: "{sort_value}",
                onchange: move |evt| {
                    let sort = evt.value().parse::<SortKey>().unwrap_or_default();
                    sort_state.set_sort(sort);
                },
                option { value: "newest", "Newest" }
                option { value: "price_low_high", "Price: low to high" }
                option { value: "price_high_low", "Price: high to low" }
                option { value: "popular", "Popular" }
            }
        }

        if loading {
            LoadingIndicator {}
        }

        section { class: "listing-grid",
            for listing in items {
                ListingCard { key: "{listing.id}", listing }
            }
        }

        nav { class: "pager",
            button {
                disabled: filters.page <= 1,
                onclick: move |_| prev_state.set_page(prev_page.saturating_sub(1).max(1)),
                "Previous"
            }
            span { "Page {filters.page} of {page_count} ({total} items)" }
            button {
                disabled: filters.page >= page_count,
                onclick: move |_| next_state.set_page(next_page + 1),
                "Next"
            }
        }

        section { class: "offer-inbox",
            h2 { "Your offers" }
            for thread in inbox {
                OfferRow { key: "{thread.id}", thread }
            }
        }
    }
}
