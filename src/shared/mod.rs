pub mod errors;
pub mod hooks;
pub mod logging;
pub mod services;
pub mod storage;
