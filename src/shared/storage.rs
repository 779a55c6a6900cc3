//! Single owner of the persisted bearer token.
//!
//! Both the request layer and the auth hook go through one shared
//! `CredentialStore` instead of each reading localStorage on their own.
//! On wasm the store is a stateless handle over `localStorage`; off-wasm
//! it is an in-memory cell so tests and tooling share one credential per
//! store instance.

use crate::shared::logging;

/// localStorage key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "auth_token";

#[derive(Clone, Default)]
pub struct CredentialStore {
    #[cfg(not(target_arch = "wasm32"))]
    token: std::sync::Arc<std::sync::RwLock<Option<String>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or clear depending on presence, mirroring a login/logout pair.
    pub fn set(&self, token: Option<&str>) {
        match token {
            Some(token) => self.store(token),
            None => self.clear(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl CredentialStore {
    pub fn token(&self) -> Option<String> {
        match local_storage() {
            Some(storage) => storage.get_item(TOKEN_KEY).ok().flatten(),
            None => {
                logging::log_storage_unavailable("read");
                None
            }
        }
    }

    pub fn store(&self, token: &str) {
        match local_storage() {
            Some(storage) => {
                if storage.set_item(TOKEN_KEY, token).is_err() {
                    logging::log_storage_unavailable("write");
                }
            }
            None => logging::log_storage_unavailable("write"),
        }
    }

    pub fn clear(&self) {
        match local_storage() {
            Some(storage) => {
                let _ = storage.remove_item(TOKEN_KEY);
            }
            None => logging::log_storage_unavailable("clear"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

#[cfg(not(target_arch = "wasm32"))]
impl CredentialStore {
    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(_) => {
                logging::log_storage_unavailable("read");
                None
            }
        }
    }

    pub fn store(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        } else {
            logging::log_storage_unavailable("write");
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        } else {
            logging::log_storage_unavailable("clear");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_clear_round_trip() {
        let store = CredentialStore::new();
        assert_eq!(store.token(), None);

        store.store("tok-123");
        assert_eq!(store.token(), Some("tok-123".to_string()));

        store.clear();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_clones_share_the_credential() {
        let store = CredentialStore::new();
        let handle = store.clone();

        store.store("shared");
        assert_eq!(handle.token(), Some("shared".to_string()));

        handle.set(None);
        assert_eq!(store.token(), None);
    }
}
