//! Sync bridge to the upstream authority
//!
//! Best-effort by contract: nothing here may fail a local rental operation.
//! [`SyncService`] is the HTTP client; [`SyncWorker`] watches state commits
//! and pushes the full state upstream with debounce and retry.

mod service;
mod worker;

pub use service::SyncService;
pub use worker::SyncWorker;
