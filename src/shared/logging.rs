//! Structured logging helpers for the data layer.
//!
//! Provides consistent, contextual logging across the resource hooks.
//! Uses structured tracing fields so fallback engagement is visible in
//! the console even though it is invisible in the UI.

use crate::shared::errors::ApiError;

/// Log areas for the data layer operations
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    ListFetch,
    MockFallback,
    Mutation,
    Auth,
    Storage,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::ListFetch => "list_fetch",
            LogOperation::MockFallback => "mock_fallback",
            LogOperation::Mutation => "mutation",
            LogOperation::Auth => "auth",
            LogOperation::Storage => "storage",
        }
    }
}

/// Log a successful list fetch
pub fn log_fetch_success(resource: &str, returned: usize, total: usize) {
    tracing::debug!(
        operation = LogOperation::ListFetch.as_str(),
        resource = resource,
        returned = returned,
        total = total,
        "List fetch completed"
    );
}

/// Log a list fetch falling back to the synthetic catalog
pub fn log_mock_fallback(resource: &str, error: &ApiError) {
    tracing::warn!(
        operation = LogOperation::MockFallback.as_str(),
        resource = resource,
        error = %error,
        "Backend unavailable, serving mock data"
    );
}

/// Log a mutation falling back to a local optimistic update
pub fn log_mutation_fallback(resource: &str, action: &str, error: &ApiError) {
    tracing::warn!(
        operation = LogOperation::Mutation.as_str(),
        resource = resource,
        action = action,
        error = %error,
        "Mutation failed, applying local update"
    );
}

/// Log an auth state transition (login, logout, hydrate, register)
pub fn log_auth_event(event: &str) {
    tracing::info!(
        operation = LogOperation::Auth.as_str(),
        event = event,
        "Auth state changed"
    );
}

/// Log inaccessible persistent storage (always non-fatal)
pub fn log_storage_unavailable(action: &str) {
    tracing::warn!(
        operation = LogOperation::Storage.as_str(),
        action = action,
        "Persistent storage unavailable, continuing without it"
    );
}
