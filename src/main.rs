//! Vintage Market - Main Entry Point
//!
//! The app is a client-rendered SPA; the wasm build launches Dioxus,
//! the native build only exists so tests and tooling link.

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    dioxus::launch(vintage_market::app::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("vintage-market is a web client; build it with `dx serve --platform web`");
}
