//! MenuQR backend: owner accounts, menu management and the public menu view,
//! all over a single wide table.

pub mod config;
pub mod service;
pub mod storage;

pub use config::Config;
pub use service::MenuService;

/// Initializes structured logging from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
