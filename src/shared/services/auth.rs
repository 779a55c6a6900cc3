//! Auth flows over the request layer.
//!
//! The service owns no state of its own; the token lives in the shared
//! `CredentialStore` and the profile in the auth hook's signals. Auth is
//! the one place where errors are surfaced instead of absorbed.

use serde_json::{json, Value};

use crate::domain::models::{RegisterPayload, UserProfile};
use crate::shared::errors::{ApiError, ApiResult};
use crate::shared::logging;
use crate::shared::services::http::ApiClient;
use crate::shared::storage::CredentialStore;

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn credentials(&self) -> &CredentialStore {
        self.client.credentials()
    }

    /// `POST /auth/login`. A reply without a token is a fatal error for
    /// this call; on success the token is persisted.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let body = json!({ "email": email, "password": password });
        let response = self.client.post("/auth/login", Some(&body)).await?;
        let token = complete_login(self.credentials(), response.json())?;
        logging::log_auth_event("login");
        Ok(token)
    }

    /// `POST /auth/register`. If the backend hands back a token it is
    /// treated like a login; otherwise auto-login with the submitted
    /// credentials is attempted and its failure is non-fatal.
    pub async fn register(&self, payload: &RegisterPayload) -> ApiResult<Option<String>> {
        let body = payload.to_request_body();
        let response = self.client.post("/auth/register", Some(&body)).await?;
        logging::log_auth_event("register");

        if let Ok(token) = complete_login(self.credentials(), response.json()) {
            return Ok(Some(token));
        }

        match self.login(&payload.email, &payload.password).await {
            Ok(token) => Ok(Some(token)),
            Err(err) => {
                // The account exists; the user can log in manually.
                tracing::warn!(error = %err, "auto-login after registration failed");
                Ok(None)
            }
        }
    }

    /// `GET /auth/me`. A 401/403 invalidates the stored token.
    pub async fn current_user(&self) -> ApiResult<UserProfile> {
        match self.client.get("/auth/me").await {
            Ok(response) => response.decode::<UserProfile>(),
            Err(err) => {
                if err.is_unauthorized() {
                    self.credentials().clear();
                    logging::log_auth_event("token_invalidated");
                }
                Err(err)
            }
        }
    }

    /// Synchronous: clears the token, no network call.
    pub fn logout(&self) {
        self.credentials().clear();
        logging::log_auth_event("logout");
    }
}

/// Pull the bearer token out of a login-shaped response body; both
/// `access_token` and `token` spellings are accepted.
pub fn extract_token(value: Option<&Value>) -> Option<String> {
    let value = value?;
    ["access_token", "token"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_owned)
}

fn complete_login(credentials: &CredentialStore, body: Option<&Value>) -> ApiResult<String> {
    let token = extract_token(body)
        .ok_or_else(|| ApiError::Validation("no token returned from login".to_string()))?;
    credentials.store(&token);
    Ok(token)
}
