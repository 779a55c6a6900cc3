// Public API exports (shared between wasm and native builds)
pub mod config;
pub mod domain;
pub mod mocks;
pub mod shared;

// App shell (thin; the data layer above is the real surface)
pub mod app;
