//! Small presentational components shared by the pages.

use dioxus::prelude::*;

use crate::domain::models::{Listing, OfferThread};
use crate::shared::errors::ApiError;

#[component]
pub fn ListingCard(listing: Listing) -> Element {
    let cover = listing.images.first().cloned().unwrap_or_default();
    rsx! {
        div { class: "listing-card",
            img { class: "listing-card-cover", src: "{cover}", alt: "{listing.title}" }
            div { class: "listing-card-body",
                h3 { "{listing.title}" }
                p { class: "listing-card-price", "{listing.price} {listing.currency}" }
                p { class: "listing-card-seller", "by {listing.seller.name} · {listing.likes} likes" }
            }
        }
    }
}

#[component]
pub fn OfferRow(thread: OfferThread) -> Element {
    let amount = thread
        .latest_offer
        .as_ref()
        .map(|offer| format!("{} {}", offer.amount, offer.currency))
        .unwrap_or_default();
    let status = thread.status.as_str();
    rsx! {
        div { class: "offer-row",
            span { class: "offer-row-title", "{thread.listing.title}" }
            span { class: "offer-row-amount", "{amount}" }
            span { class: "offer-row-status", "{status}" }
        }
    }
}

/// Inline error banner; the resource hooks rarely set one, auth does.
#[component]
pub fn ErrorBanner(error: ApiError) -> Element {
    rsx! {
        div { class: "error-banner", role: "alert", "{error}" }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div { class: "loading-indicator", "Loading…" }
    }
}
