use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The authenticated user's profile as `/auth/me` returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Registration form fields as the UI collects them
#[derive(Debug, Clone, Default)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

impl RegisterPayload {
    /// Map UI field names to the backend schema. A missing username
    /// defaults to the email's local part.
    pub fn to_request_body(&self) -> Value {
        let username = self
            .username
            .clone()
            .or_else(|| self.email.split('@').next().map(str::to_owned));
        json!({
            "email": self.email,
            "username": username,
            "full_name": self.full_name,
            "password": self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_body_defaults_username_from_email() {
        let payload = RegisterPayload {
            email: "ava@example.com".into(),
            password: "hunter2".into(),
            username: None,
            full_name: Some("Ava Vintage".into()),
        };
        let body = payload.to_request_body();
        assert_eq!(body["username"], "ava");
        assert_eq!(body["full_name"], "Ava Vintage");
        assert_eq!(body["email"], "ava@example.com");
    }

    #[test]
    fn test_register_body_keeps_explicit_username() {
        let payload = RegisterPayload {
            email: "ava@example.com".into(),
            password: "hunter2".into(),
            username: Some("ava_v".into()),
            full_name: None,
        };
        let body = payload.to_request_body();
        assert_eq!(body["username"], "ava_v");
        assert!(body["full_name"].is_null());
    }
}
