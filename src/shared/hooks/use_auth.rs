//! Auth hook: session state (token + profile) over `AuthService`. Unlike
//! the resource hooks, auth failures are surfaced to the caller.

use dioxus::prelude::*;

use super::use_api_client;
use crate::domain::models::{RegisterPayload, UserProfile};
use crate::shared::errors::{ApiError, ApiResult};
use crate::shared::services::auth::AuthService;

/// Coarse session phase for render decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Hydrating,
    Authenticated,
    Error,
}

/// Phase from the three signals; errors win, then a token still being
/// verified, then a settled token.
pub fn phase_for(has_token: bool, loading: bool, has_error: bool) -> AuthPhase {
    if has_error {
        AuthPhase::Error
    } else if has_token && loading {
        AuthPhase::Hydrating
    } else if has_token {
        AuthPhase::Authenticated
    } else {
        AuthPhase::Anonymous
    }
}

/// Signal bundle owned by the auth hook
#[derive(Clone)]
pub struct AuthState {
    pub token: Signal<Option<String>>,
    pub user: Signal<Option<UserProfile>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<ApiError>>,
    service: AuthService,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn phase(&self) -> AuthPhase {
        phase_for(
            self.token.read().is_some(),
            *self.loading.read(),
            self.error.read().is_some(),
        )
    }

    /// Verify a stored token against `/auth/me` on mount. No token means
    /// nothing to do; an invalid one is dropped.
    pub async fn hydrate(&mut self) {
        if self.token.peek().is_none() {
            self.loading.set(false);
            return;
        }

        match self.service.current_user().await {
            Ok(profile) => {
                self.user.set(Some(profile));
            }
            Err(err) => {
                self.user.set(None);
                if err.is_unauthorized() {
                    // The service already cleared the store.
                    self.token.set(None);
                } else {
                    self.error.set(Some(err));
                }
            }
        }
        self.loading.set(false);
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ApiResult<String> {
        self.loading.set(true);
        self.error.set(None);

        let result = self.service.login(email, password).await;
        match &result {
            Ok(token) => {
                self.token.set(Some(token.clone()));
                if let Ok(profile) = self.service.current_user().await {
                    self.user.set(Some(profile));
                }
            }
            Err(err) => self.error.set(Some(err.clone())),
        }

        self.loading.set(false);
        result
    }

    /// Register and, when a token comes back, enter the session directly.
    pub async fn register(&mut self, payload: RegisterPayload) -> ApiResult<Option<String>> {
        self.loading.set(true);
        self.error.set(None);

        let result = self.service.register(&payload).await;
        match &result {
            Ok(Some(token)) => {
                self.token.set(Some(token.clone()));
                if let Ok(profile) = self.service.current_user().await {
                    self.user.set(Some(profile));
                }
            }
            Ok(None) => {}
            Err(err) => self.error.set(Some(err.clone())),
        }

        self.loading.set(false);
        result
    }

    /// Synchronous; clears token, profile and any stale error.
    pub fn logout(&mut self) {
        self.service.logout();
        self.token.set(None);
        self.user.set(None);
        self.error.set(None);
    }
}

/// Auth hook; hydrates the session from the stored token on mount.
pub fn use_auth() -> AuthState {
    let client = use_api_client();
    let service = AuthService::new(client);

    let stored = use_hook({
        let credentials = service.credentials().clone();
        move || credentials.token()
    });
    let has_token = stored.is_some();

    let state = AuthState {
        token: use_signal(move || stored),
        user: use_signal(|| None),
        // Loading starts true only when there is a token to verify.
        loading: use_signal(move || has_token),
        error: use_signal(|| None),
        service,
    };

    use_effect({
        let state = state.clone();
        move || {
            let mut state = state.clone();
            spawn(async move {
                state.hydrate().await;
            });
        }
    });

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_precedence() {
        assert_eq!(phase_for(false, false, false), AuthPhase::Anonymous);
        assert_eq!(phase_for(true, true, false), AuthPhase::Hydrating);
        assert_eq!(phase_for(true, false, false), AuthPhase::Authenticated);
        assert_eq!(phase_for(true, false, true), AuthPhase::Error);
        assert_eq!(phase_for(false, false, true), AuthPhase::Error);
        // Loading without a token still renders as anonymous.
        assert_eq!(phase_for(false, true, false), AuthPhase::Anonymous);
    }
}
