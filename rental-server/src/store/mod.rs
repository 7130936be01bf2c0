//! StateStore - the single owner of the application state
//!
//! This module handles:
//! - In-memory `AppState` behind one RwLock
//! - Persistence to `<data_dir>/state.json` (pretty-printed JSON)
//! - The single-writer `commit` discipline that makes multi-collection
//!   mutations appear atomic
//! - Change notification for the sync worker (watch channel)
//!
//! # Commit Flow
//!
//! ```text
//! commit(f)
//!     ├─ 1. Clone current state (scratch copy)
//!     ├─ 2. Run f against the copy
//!     ├─ 3a. Err  → discard copy, state untouched
//!     └─ 3b. Ok   → install copy, save to disk (log-only), notify watchers
//! ```
//!
//! Because every writer goes through `commit` and the installed value is a
//! whole new `AppState`, a reader can never observe a half-applied
//! operation — the bike flip and the rental open/close land together or not
//! at all.

pub mod seed;

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use shared::AppState;
use thiserror::Error;
use tokio::sync::watch;

/// Store errors. Load failures are not here on purpose: a missing or corrupt
/// state file degrades to the seeded initial state rather than refusing to
/// start.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

pub struct StateStore {
    state: RwLock<AppState>,
    /// `None` for in-memory stores (tests)
    state_file: Option<PathBuf>,
    changes: watch::Sender<u64>,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("state_file", &self.state_file)
            .finish()
    }
}

impl StateStore {
    /// Open the store backed by `<data_dir>/state.json`.
    ///
    /// Loads the existing file if present and parseable, otherwise seeds the
    /// initial Belgrade state and writes it out.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;
        let state_file = data_dir.join("state.json");

        let (state, fresh) = match Self::load_file(&state_file) {
            Some(state) => (state, false),
            None => (seed::initial_state(), true),
        };

        let (changes, _) = watch::channel(0u64);
        let store = Self {
            state: RwLock::new(state),
            state_file: Some(state_file),
            changes,
        };

        if fresh {
            store.save(&store.state.read());
        }

        Ok(store)
    }

    /// Create a store with no file backing (for testing).
    pub fn in_memory(initial: AppState) -> Self {
        let (changes, _) = watch::channel(0u64);
        Self {
            state: RwLock::new(initial),
            state_file: None,
            changes,
        }
    }

    fn load_file(path: &Path) -> Option<AppState> {
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<AppState>(&raw) {
                Ok(state) => {
                    tracing::info!(
                        bikes = state.bikes.len(),
                        zones = state.parking_zones.len(),
                        rentals = state.rentals.len(),
                        "Loaded application state"
                    );
                    Some(state)
                }
                Err(e) => {
                    tracing::error!(error = %e, "state.json is not parseable, reseeding");
                    None
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to read state.json, reseeding");
                None
            }
        }
    }

    /// Read access without cloning the whole state.
    pub fn read<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.state.read())
    }

    /// Full clone of the current state (sync endpoints, workers).
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    /// Apply a mutation through the single-writer commit path.
    ///
    /// `f` runs against a scratch copy; only when it returns `Ok` does the
    /// copy become the current state. Persistence failure is logged and does
    /// not fail the operation (the in-memory result stands).
    pub fn commit<T, E>(&self, f: impl FnOnce(&mut AppState) -> Result<T, E>) -> Result<T, E> {
        let mut guard = self.state.write();
        let mut scratch = guard.clone();
        let value = f(&mut scratch)?;
        *guard = scratch;
        self.save(&guard);
        drop(guard);
        self.notify();
        Ok(value)
    }

    /// Replace the whole state value (full-state sync, last-write-wins).
    pub fn replace(&self, next: AppState) {
        let mut guard = self.state.write();
        *guard = next;
        self.save(&guard);
        drop(guard);
        self.notify();
    }

    /// Subscribe to commit notifications. The value is a monotonically
    /// increasing change counter; receivers only care that it moved.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        self.changes.send_modify(|n| *n += 1);
    }

    fn save(&self, state: &AppState) {
        let Some(path) = &self.state_file else {
            return;
        };
        let json = match serde_json::to_string_pretty(state) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize application state");
                return;
            }
        };
        if let Err(e) = fs::write(path, json) {
            tracing::error!(error = %e, path = %path.display(), "Failed to save application state");
        }
    }
}
