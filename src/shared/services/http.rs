//! Centralized HTTP client with base URL from configuration, Authorization
//! header injection, and unified error normalization.
//!
//! The transport is `gloo-net` in the browser and `reqwest` off-wasm so the
//! same layer is exercised by native tests. Everything after the transport
//! (body decoding, error normalization, tolerant list decoding) is shared.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config;
use crate::shared::errors::{ApiError, ApiResult};
use crate::shared::storage::CredentialStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Parsed response body: JSON when the content type says so, raw text
/// otherwise, `Empty` for empty bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Normalized response shape `{ data, status, headers, url }`
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub data: ResponseBody,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub url: String,
}

impl ApiResponse {
    pub fn json(&self) -> Option<&Value> {
        self.data.as_json()
    }

    /// Decode the JSON body into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> ApiResult<T> {
        match &self.data {
            ResponseBody::Json(value) => serde_json::from_value(value.clone())
                .map_err(|err| ApiError::Validation(format!("unexpected response shape: {err}"))),
            _ => Err(ApiError::Validation("expected a JSON body".to_string())),
        }
    }
}

/// List endpoints may answer with a bare array or `{ items, total }`.
/// This union decodes both, with `total` falling back to the item count.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paged {
        items: Vec<T>,
        #[serde(default)]
        total: Option<usize>,
    },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_page(self) -> (Vec<T>, usize) {
        match self {
            ListPayload::Paged { items, total } => {
                let total = total.unwrap_or(items.len());
                (items, total)
            }
            ListPayload::Bare(items) => {
                let total = items.len();
                (items, total)
            }
        }
    }
}

/// Decode either list shape out of a response body. Unknown shapes become
/// an empty page rather than an error; the caller decides what that means.
pub fn decode_list<T: DeserializeOwned>(value: Option<&Value>) -> (Vec<T>, usize) {
    match value {
        Some(value) => match serde_json::from_value::<ListPayload<T>>(value.clone()) {
            Ok(payload) => payload.into_page(),
            Err(_) => (Vec::new(), 0),
        },
        None => (Vec::new(), 0),
    }
}

/// Minimal HTTP client with get/post/put/patch/delete
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    credentials: CredentialStore,
    // One pooled client per ApiClient; clones share the pool.
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: CredentialStore) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::new(),
        }
    }

    /// Client pointed at the configured API origin.
    pub fn from_env(credentials: CredentialStore) -> Self {
        Self::new(config::api_base_url(), credentials)
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> ApiResult<ApiResponse> {
        self.request(Method::Get, path, None).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<ApiResponse> {
        self.request(Method::Delete, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<&Value>) -> ApiResult<ApiResponse> {
        self.request(Method::Post, path, body).await
    }

    pub async fn put(&self, path: &str, body: Option<&Value>) -> ApiResult<ApiResponse> {
        self.request(Method::Put, path, body).await
    }

    pub async fn patch(&self, path: &str, body: Option<&Value>) -> ApiResult<ApiResponse> {
        self.request(Method::Patch, path, body).await
    }

    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<ApiResponse> {
        let raw = self.send(method, path, body).await?;
        normalize(raw)
    }
}

/// Transport-agnostic response snapshot
struct RawResponse {
    status: u16,
    url: String,
    headers: HashMap<String, String>,
    body: String,
}

fn normalize(raw: RawResponse) -> ApiResult<ApiResponse> {
    if !(200..300).contains(&raw.status) {
        return Err(normalize_error(raw));
    }

    let content_type = raw.headers.get("content-type").cloned().unwrap_or_default();
    Ok(ApiResponse {
        data: decode_body(&content_type, raw.body),
        status: raw.status,
        headers: raw.headers,
        url: raw.url,
    })
}

/// A JSON parse failure on a 2xx body degrades to raw text; it does not
/// fail the request.
fn decode_body(content_type: &str, text: String) -> ResponseBody {
    if text.is_empty() {
        return ResponseBody::Empty;
    }
    if content_type.contains("application/json") {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    } else {
        ResponseBody::Text(text)
    }
}

/// Non-2xx responses become a uniform error: message from a JSON
/// `message`/`detail` field when present, raw text otherwise, and the
/// status code always attached.
fn normalize_error(raw: RawResponse) -> ApiError {
    let mut message = "request failed".to_string();
    let mut details = None;

    if !raw.body.is_empty() {
        match serde_json::from_str::<Value>(&raw.body) {
            Ok(json) => {
                if let Some(text) = json
                    .get("message")
                    .and_then(Value::as_str)
                    .or_else(|| json.get("detail").and_then(Value::as_str))
                {
                    message = text.to_string();
                }
                details = Some(json);
            }
            Err(_) => message = raw.body,
        }
    }

    ApiError::Http {
        status: raw.status,
        message,
        details,
        url: raw.url,
    }
}

#[cfg(target_arch = "wasm32")]
impl ApiClient {
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<RawResponse> {
        use gloo_net::http::Request;

        let url = self.url_for(path);
        let mut builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };

        if let Some(token) = self.credentials.token() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(json.to_string())
                .map_err(|err| ApiError::Network(err.to_string()))?,
            None => builder
                .build()
                .map_err(|err| ApiError::Network(err.to_string()))?,
        };

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        Ok(RawResponse {
            status: response.status(),
            url: response.url(),
            headers: response.headers().entries().collect(),
            body: response.text().await.unwrap_or_default(),
        })
    }

    /// Multipart form upload; the body passes through untouched so the
    /// browser sets the boundary header itself.
    pub async fn post_form(&self, path: &str, form: web_sys::FormData) -> ApiResult<ApiResponse> {
        use gloo_net::http::Request;

        let url = self.url_for(path);
        let mut builder = Request::post(&url);
        if let Some(token) = self.credentials.token() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let request = builder
            .body(form)
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        normalize(RawResponse {
            status: response.status(),
            url: response.url(),
            headers: response.headers().entries().collect(),
            body: response.text().await.unwrap_or_default(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ApiClient {
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<RawResponse> {
        let url = self.url_for(path);
        let reqwest_method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut request = self.http.request(reqwest_method, &url);
        if let Some(token) = self.credentials.token() {
            request = request.bearer_auth(token);
        }
        if let Some(json) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status().as_u16();
        let response_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_ascii_lowercase(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        Ok(RawResponse {
            status,
            url: response_url,
            headers,
            body: response.text().await.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(status: u16, content_type: &str, body: &str) -> RawResponse {
        let mut headers = HashMap::new();
        if !content_type.is_empty() {
            headers.insert("content-type".to_string(), content_type.to_string());
        }
        RawResponse {
            status,
            url: "/listings".to_string(),
            headers,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success_parses_json_by_content_type() {
        let res = normalize(raw(200, "application/json; charset=utf-8", r#"{"ok":true}"#)).unwrap();
        assert_eq!(res.status, 200);
        assert_eq!(res.json(), Some(&json!({"ok": true})));
    }

    #[test]
    fn test_success_keeps_raw_text_and_empty() {
        let res = normalize(raw(200, "text/plain", "pong")).unwrap();
        assert_eq!(res.data, ResponseBody::Text("pong".into()));

        let res = normalize(raw(204, "", "")).unwrap();
        assert_eq!(res.data, ResponseBody::Empty);
    }

    #[test]
    fn test_invalid_json_degrades_to_text() {
        let res = normalize(raw(200, "application/json", "not-json")).unwrap();
        assert_eq!(res.data, ResponseBody::Text("not-json".into()));
    }

    #[test]
    fn test_error_message_from_json_fields() {
        let err = normalize(raw(422, "application/json", r#"{"detail":"price required"}"#)).unwrap_err();
        match err {
            ApiError::Http { status, message, details, url } => {
                assert_eq!(status, 422);
                assert_eq!(message, "price required");
                assert_eq!(details, Some(json!({"detail": "price required"})));
                assert_eq!(url, "/listings");
            }
            other => panic!("expected Http error, got {other:?}"),
        }

        let err = normalize(raw(400, "application/json", r#"{"message":"bad filter"}"#)).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 400: bad filter");
    }

    #[test]
    fn test_error_falls_back_to_raw_text_then_default() {
        let err = normalize(raw(502, "text/html", "Bad Gateway")).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = normalize(raw(500, "", "")).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: request failed");
    }

    #[test]
    fn test_decode_list_accepts_both_shapes() {
        let paged = json!({"items": [{"v": 1}, {"v": 2}], "total": 9});
        let (items, total) = decode_list::<Value>(Some(&paged));
        assert_eq!(items.len(), 2);
        assert_eq!(total, 9);

        let bare = json!([{"v": 1}]);
        let (items, total) = decode_list::<Value>(Some(&bare));
        assert_eq!(items.len(), 1);
        assert_eq!(total, 1);

        let unknown = json!({"whatever": true});
        let (items, total) = decode_list::<Value>(Some(&unknown));
        assert!(items.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn test_paged_without_total_counts_items() {
        let paged = json!({"items": [{"v": 1}, {"v": 2}, {"v": 3}]});
        let (items, total) = decode_list::<Value>(Some(&paged));
        assert_eq!(items.len(), 3);
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_native_transport_reuses_one_client() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut requests = Vec::new();
            for _ in 0..2 {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 2048];
                let n = socket.read(&mut buf).await.unwrap();
                requests.push(String::from_utf8_lossy(&buf[..n]).to_lowercase());

                let body = r#"{"ok":true}"#;
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
            }
            requests
        });

        let credentials = CredentialStore::new();
        credentials.store("T");
        let client = ApiClient::new(format!("http://{addr}"), credentials);

        // Two calls through the same client, the second via a clone.
        let first = client.get("/listings").await.unwrap();
        let second = client.clone().get("/auth/me").await.unwrap();
        assert_eq!(first.json(), Some(&json!({"ok": true})));
        assert_eq!(second.status, 200);

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("get /listings"));
        assert!(requests.iter().all(|r| r.contains("authorization: bearer t")));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        // Port 9 (discard) is never bound in the test environment.
        let client = ApiClient::new("http://127.0.0.1:9", CredentialStore::new());
        let err = client.get("/listings").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.status(), None);
    }
}
