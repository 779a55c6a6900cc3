//! API origin configuration.
//!
//! A single environment variable selects the backend origin. When it is
//! absent the client issues same-origin relative requests, which is what
//! the dev proxy and the hosted deployment both expect.

use once_cell::sync::Lazy;

/// Environment variable naming the API origin, e.g. `https://api.example.com`.
pub const API_BASE_URL_ENV: &str = "VINTAGE_API_BASE_URL";

static BASE_URL: Lazy<String> = Lazy::new(resolve_base_url);

/// The configured API origin with any trailing slash removed.
/// Empty string means same-origin relative paths.
pub fn api_base_url() -> &'static str {
    &BASE_URL
}

fn resolve_base_url() -> String {
    // Runtime env only exists off-wasm; the wasm build bakes the value in
    // at compile time via option_env!.
    #[cfg(not(target_arch = "wasm32"))]
    if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
        return normalize(&url);
    }

    normalize(option_env!("VINTAGE_API_BASE_URL").unwrap_or(""))
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
