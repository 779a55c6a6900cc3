//! Offers hook: negotiation inbox, thread view, accept/decline actions and
//! counter-offer messages. List and resolve failures fall back to synthetic
//! data; sending a counter surfaces its error instead.

use chrono::Utc;
use dioxus::prelude::*;
use serde_json::json;

use super::use_api_client;
use crate::domain::models::{
    LastMessage, LatestOffer, OfferFilters, OfferMessage, OfferOverrides, OfferRecord, OfferThread,
    Role, ThreadStatus,
};
use crate::mocks;
use crate::shared::errors::{ApiError, ApiResult};
use crate::shared::logging;
use crate::shared::services::http::{decode_list, ApiClient};

/// Signal bundle owned by the offers hook
#[derive(Clone)]
pub struct OffersState {
    pub offers: Signal<Vec<OfferThread>>,
    pub total: Signal<usize>,
    pub thread: Signal<Option<OfferThread>>,
    pub thread_messages: Signal<Vec<OfferMessage>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<ApiError>>,
    pub filters: Signal<OfferFilters>,
    client: ApiClient,
}

/// Fetch the thread inbox, falling back to the synthetic inbox on failure.
pub async fn load_offers(client: &ApiClient, filters: &OfferFilters) -> (Vec<OfferThread>, usize) {
    let query = filters.to_query();
    let path = if query.is_empty() {
        "/offers".to_string()
    } else {
        format!("/offers?{query}")
    };

    match client.get(&path).await {
        Ok(response) => {
            let (records, total): (Vec<OfferRecord>, usize) = decode_list(response.json());
            let items: Vec<OfferThread> = records.into_iter().map(OfferRecord::into_thread).collect();
            logging::log_fetch_success("offers", items.len(), total);
            (items, total)
        }
        Err(err) => {
            logging::log_mock_fallback("offers", &err);
            mocks::offers::offer_page(filters)
        }
    }
}

/// Fetch one thread. The bare offer endpoint carries no messages, so a
/// server answer yields an empty conversation; failures fall back to the
/// fixed synthetic one.
pub async fn load_thread(client: &ApiClient, thread_id: &str) -> (OfferThread, Vec<OfferMessage>) {
    match client.get(&format!("/offers/{thread_id}")).await {
        Ok(response) => match response.decode::<OfferRecord>() {
            Ok(record) => (record.into_thread(), Vec::new()),
            Err(_) => mocks::offers::thread(thread_id),
        },
        Err(err) => {
            logging::log_mock_fallback("offers", &err);
            mocks::offers::thread(thread_id)
        }
    }
}

fn mark_thread_status(items: &mut [OfferThread], id: &str, status: ThreadStatus) {
    if let Some(thread) = items.iter_mut().find(|thread| thread.id == id) {
        thread.status = status;
        thread.updated_at = Utc::now();
    }
}

/// Build the local message appended after a send. An empty text with an
/// amount reads as a counter-offer.
fn counter_message(text: &str, amount: Option<f64>, currency: &str) -> OfferMessage {
    let text = match (text.is_empty(), amount) {
        (true, Some(value)) => format!("Countered to {value}"),
        _ => text.to_string(),
    };
    OfferMessage {
        id: format!("msg-{}", Utc::now().timestamp_millis()),
        by: Role::Buyer,
        text,
        amount,
        currency: currency.to_string(),
        created_at: Utc::now(),
    }
}

impl OffersState {
    pub async fn fetch(&mut self, overrides: OfferOverrides) {
        self.loading.set(true);
        self.error.set(None);

        let params = self.filters.peek().merged(&overrides);
        let (items, total) = load_offers(&self.client, &params).await;

        self.offers.set(items);
        self.total.set(total);
        self.loading.set(false);
    }

    /// Open a thread: loads the thread header and its conversation.
    pub async fn get_thread(&mut self, thread_id: &str) -> (OfferThread, Vec<OfferMessage>) {
        self.loading.set(true);
        self.error.set(None);

        let (thread, messages) = load_thread(&self.client, thread_id).await;
        self.thread.set(Some(thread.clone()));
        self.thread_messages.set(messages.clone());
        self.loading.set(false);
        (thread, messages)
    }

    /// Start a negotiation on a listing. On failure a synthetic thread is
    /// prepended to the inbox.
    pub async fn create_offer(
        &mut self,
        listing_id: &str,
        amount: f64,
        currency: &str,
        note: &str,
    ) -> OfferThread {
        self.loading.set(true);
        self.error.set(None);

        let body = json!({ "amount": amount });
        let path = format!("/offers/listings/{listing_id}/offers");
        let thread = match self.client.post(&path, Some(&body)).await {
            Ok(response) => {
                let thread = response
                    .decode::<OfferRecord>()
                    .map(OfferRecord::into_thread)
                    .unwrap_or_else(|_| mocks::offers::created_thread(listing_id, amount, currency, note));
                self.fetch(OfferOverrides::default()).await;
                thread
            }
            Err(err) => {
                logging::log_mutation_fallback("offers", "create", &err);
                let thread = mocks::offers::created_thread(listing_id, amount, currency, note);
                {
                    let mut items = self.offers.write();
                    items.insert(0, thread.clone());
                }
                self.total.with_mut(|t| *t += 1);
                thread
            }
        };

        self.loading.set(false);
        thread
    }

    pub async fn accept(&mut self, offer_id: &str) -> ThreadStatus {
        self.resolve(offer_id, ThreadStatus::Accepted, "accept").await
    }

    pub async fn decline(&mut self, offer_id: &str) -> ThreadStatus {
        self.resolve(offer_id, ThreadStatus::Declined, "decline").await
    }

    async fn resolve(&mut self, offer_id: &str, target: ThreadStatus, action: &str) -> ThreadStatus {
        self.loading.set(true);
        self.error.set(None);

        let path = format!("/offers/{offer_id}/{action}");
        let status = match self.client.post(&path, None).await {
            Ok(response) => {
                let status = response
                    .decode::<OfferRecord>()
                    .map(|record| record.status)
                    .unwrap_or(target);
                self.apply_status(offer_id, status);
                self.fetch(OfferOverrides::default()).await;
                status
            }
            Err(err) => {
                logging::log_mutation_fallback("offers", action, &err);
                self.apply_status(offer_id, target);
                target
            }
        };

        self.loading.set(false);
        status
    }

    fn apply_status(&mut self, offer_id: &str, status: ThreadStatus) {
        mark_thread_status(&mut self.offers.write(), offer_id, status);
        if self.thread.peek().as_ref().is_some_and(|t| t.id == offer_id) {
            self.thread.with_mut(|thread| {
                if let Some(thread) = thread {
                    thread.status = status;
                    thread.updated_at = Utc::now();
                }
            });
        }
    }

    /// Send a message into the open thread. A message with an amount is a
    /// counter-offer and goes to the backend; its failure is surfaced, not
    /// swallowed. Plain text messages are local-only.
    pub async fn send_message(
        &mut self,
        thread_id: &str,
        text: &str,
        amount: Option<f64>,
        currency: &str,
    ) -> ApiResult<OfferMessage> {
        self.loading.set(true);
        self.error.set(None);

        let result = match amount {
            Some(value) => {
                let body = json!({ "amount": value });
                let path = format!("/offers/{thread_id}/counter");
                match self.client.post(&path, Some(&body)).await {
                    Ok(_) => {
                        let message = counter_message(text, Some(value), currency);
                        self.append_message(message.clone());
                        Ok(message)
                    }
                    Err(err) => {
                        self.error.set(Some(err.clone()));
                        Err(err)
                    }
                }
            }
            None => {
                let message = counter_message(text, None, currency);
                self.append_message(message.clone());
                Ok(message)
            }
        };

        self.loading.set(false);
        result
    }

    fn append_message(&mut self, message: OfferMessage) {
        self.thread.with_mut(|thread| {
            if let Some(thread) = thread {
                thread.updated_at = message.created_at;
                thread.last_message = Some(LastMessage {
                    text: message.text.clone(),
                    created_at: message.created_at,
                });
                if let Some(amount) = message.amount {
                    thread.latest_offer = Some(LatestOffer {
                        amount,
                        currency: message.currency.clone(),
                        by: Some(message.by),
                    });
                }
            }
        });
        self.thread_messages.with_mut(|messages| messages.push(message));
    }

    pub fn set_role(&mut self, role: Option<Role>) {
        self.filters.with_mut(|f| f.set_role(role));
    }

    pub fn set_status(&mut self, status: Option<ThreadStatus>) {
        self.filters.with_mut(|f| f.set_status(status));
    }

    pub fn set_page(&mut self, page: usize) {
        self.filters.with_mut(|f| f.set_page(page));
    }
}

/// Offers hook; refetches the inbox whenever the filters change.
pub fn use_offers() -> OffersState {
    let client = use_api_client();
    let state = OffersState {
        offers: use_signal(Vec::new),
        total: use_signal(|| 0usize),
        thread: use_signal(|| None),
        thread_messages: use_signal(Vec::new),
        loading: use_signal(|| false),
        error: use_signal(|| None),
        filters: use_signal(OfferFilters::default),
        client,
    };

    use_effect({
        let state = state.clone();
        move || {
            let _ = state.filters.read().clone();
            let mut state = state.clone();
            spawn(async move {
                state.fetch(OfferOverrides::default()).await;
            });
        }
    });

    state
}
