//! Rental Server - bike-rental operations node
//!
//! # Architecture overview
//!
//! The server owns one in-memory application state value, persisted to a
//! JSON file and optionally mirrored to an upstream authority. Every
//! mutation funnels through a single commit function, which is what makes
//! the rental operations atomic without a database transaction.
//!
//! # Module structure
//!
//! ```text
//! rental-server/src/
//! ├── core/          # Configuration, state, server
//! ├── store/         # Application state + JSON persistence
//! ├── rentals/       # Rental lifecycle engine (manager, fleet, ledger, zones, money)
//! ├── auth/          # Admin registry, tokens, guard extractor
//! ├── api/           # HTTP routes and handlers
//! ├── services/      # Photo storage
//! ├── sync/          # Best-effort upstream sync
//! └── utils/         # Errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod rentals;
pub mod services;
pub mod store;
pub mod sync;
pub mod utils;

// Re-export public types
pub use auth::{AdminRegistry, CurrentAdmin};
pub use core::{Config, Server, ServerState};
pub use rentals::{RentalError, RentalManager};
pub use store::StateStore;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging; call once at startup.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ____  _ _         ____             _        _
  | __ )(_) | _____ |  _ \ ___ _ __ | |_ __ _| |
  |  _ \| | |/ / _ \| |_) / _ \ '_ \| __/ _` | |
  | |_) | |   <  __/|  _ <  __/ | | | || (_| | |
  |____/|_|_|\_\___||_| \_\___|_| |_|\__\__,_|_|
    "#
    );
}
