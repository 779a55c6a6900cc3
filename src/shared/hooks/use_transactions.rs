//! Transactions hook: purchase history and checkout initiation. History
//! reads fall back to synthetic data; checkout answers a synthetic session
//! when the backend cannot mint one.

use dioxus::prelude::*;
use serde_json::Value;

use super::use_api_client;
use crate::domain::models::{
    CheckoutRequest, CheckoutSession, Role, Transaction, TransactionFilters, TransactionOverrides,
};
use crate::mocks;
use crate::shared::errors::ApiError;
use crate::shared::logging;
use crate::shared::services::http::{decode_list, ApiClient};

/// Signal bundle owned by the transactions hook
#[derive(Clone)]
pub struct TransactionsState {
    pub transactions: Signal<Vec<Transaction>>,
    pub total: Signal<usize>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<ApiError>>,
    pub filters: Signal<TransactionFilters>,
    client: ApiClient,
}

/// Fetch the purchase history, falling back to synthetic history on failure.
pub async fn load_transactions(
    client: &ApiClient,
    filters: &TransactionFilters,
) -> (Vec<Transaction>, usize) {
    let path = format!("/transactions?{}", filters.to_query());
    match client.get(&path).await {
        Ok(response) => {
            let (items, total) = decode_list(response.json());
            logging::log_fetch_success("transactions", items.len(), total);
            (items, total)
        }
        Err(err) => {
            logging::log_mock_fallback("transactions", &err);
            mocks::transactions::transaction_page(filters)
        }
    }
}

/// Fetch one transaction, falling back to a synthetic record whose status
/// is stable for the id.
pub async fn load_transaction(client: &ApiClient, id: &str) -> Transaction {
    match client.get(&format!("/transactions/{id}")).await {
        Ok(response) => response
            .decode()
            .unwrap_or_else(|_| mocks::transactions::transaction_detail(id)),
        Err(err) => {
            logging::log_mock_fallback("transactions", &err);
            mocks::transactions::transaction_detail(id)
        }
    }
}

/// Read a checkout session out of a server body, tolerating both camelCase
/// and snake_case field names; missing pieces are filled synthetically.
fn session_from_value(body: Option<&Value>, request: &CheckoutRequest) -> CheckoutSession {
    let field = |camel: &str, snake: &str| -> Option<String> {
        body.and_then(|v| v.get(camel).or_else(|| v.get(snake)))
            .and_then(Value::as_str)
            .map(str::to_owned)
    };

    let fallback = mocks::transactions::checkout_session(
        &request.listing_id,
        request.amount,
        &request.currency,
    );

    CheckoutSession {
        client_secret: field("clientSecret", "client_secret").unwrap_or(fallback.client_secret),
        transaction_id: field("transactionId", "transaction_id").unwrap_or(fallback.transaction_id),
        listing_id: request.listing_id.clone(),
        amount: request.amount,
        currency: request.currency.clone(),
    }
}

impl TransactionsState {
    pub async fn fetch(&mut self, overrides: TransactionOverrides) {
        self.loading.set(true);
        self.error.set(None);

        let params = self.filters.peek().merged(&overrides);
        let (items, total) = load_transactions(&self.client, &params).await;

        self.transactions.set(items);
        self.total.set(total);
        self.loading.set(false);
    }

    pub async fn get(&mut self, id: &str) -> Transaction {
        self.loading.set(true);
        self.error.set(None);
        let transaction = load_transaction(&self.client, id).await;
        self.loading.set(false);
        transaction
    }

    /// Start a checkout for a listing. Always yields a usable session;
    /// failures produce a synthetic one so the payment flow can render.
    pub async fn checkout(&mut self, listing_id: &str, amount: f64, currency: &str) -> CheckoutSession {
        self.loading.set(true);
        self.error.set(None);

        let request = CheckoutRequest {
            listing_id: listing_id.to_string(),
            amount,
            currency: currency.to_string(),
        };
        let body = serde_json::to_value(&request).unwrap_or(Value::Null);

        let session = match self.client.post("/transactions/checkout", Some(&body)).await {
            Ok(response) => session_from_value(response.json(), &request),
            Err(err) => {
                logging::log_mutation_fallback("transactions", "checkout", &err);
                mocks::transactions::checkout_session(listing_id, amount, currency)
            }
        };

        self.loading.set(false);
        session
    }

    pub fn set_role(&mut self, role: Option<Role>) {
        self.filters.with_mut(|f| f.set_role(role));
    }

    pub fn set_page(&mut self, page: usize) {
        self.filters.with_mut(|f| f.set_page(page));
    }
}

/// Transactions hook; refetches the history whenever the filters change.
pub fn use_transactions() -> TransactionsState {
    let client = use_api_client();
    let state = TransactionsState {
        transactions: use_signal(Vec::new),
        total: use_signal(|| 0usize),
        loading: use_signal(|| false),
        error: use_signal(|| None),
        filters: use_signal(TransactionFilters::default),
        client,
    };

    use_effect({
        let state = state.clone();
        move || {
            let _ = state.filters.read().clone();
            let mut state = state.clone();
            spawn(async move {
                state.fetch(TransactionOverrides::default()).await;
            });
        }
    });

    state
}
