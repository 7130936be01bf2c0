//! SyncWorker — background worker that mirrors state to the upstream authority
//!
//! Watches the StateStore change channel, debounces commits, and pushes the
//! full state. Eventually consistent and not linearizable: the push is a
//! whole-state replace, last-write-wins upstream.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::store::StateStore;
use crate::sync::SyncService;

/// Debounce window for batching commits
const DEBOUNCE_MS: u64 = 500;
/// Max retry attempts per push
const MAX_RETRIES: u32 = 3;
/// Initial retry delay
const INITIAL_RETRY_DELAY_SECS: u64 = 5;

pub struct SyncWorker {
    store: Arc<StateStore>,
    sync_service: Arc<SyncService>,
    shutdown: CancellationToken,
}

impl SyncWorker {
    pub fn new(
        store: Arc<StateStore>,
        sync_service: Arc<SyncService>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            store,
            sync_service,
            shutdown,
        }
    }

    /// Run the sync worker
    ///
    /// 1. Reconcile on startup: adopt the upstream state (the authority is
    ///    the nominal source of truth); push ours instead if it is
    ///    unreachable
    /// 2. Watch for commits, debounce and push
    /// 3. Final flush on shutdown
    pub async fn run(self) {
        tracing::info!(upstream = %self.sync_service.base_url(), "SyncWorker started");

        match self.sync_service.pull_state().await {
            Ok(upstream) => {
                tracing::info!(
                    rentals = upstream.rentals.len(),
                    bikes = upstream.bikes.len(),
                    "Adopted upstream state"
                );
                self.store.replace(upstream);
            }
            Err(e) => {
                tracing::warn!("Upstream pull failed ({e}), pushing local state instead");
                if let Err(e) = self.push_with_retry().await {
                    tracing::error!("Initial state push failed: {e}");
                }
            }
        }

        // Subscribe after the reconcile so the replace above does not
        // immediately re-trigger a push of what we just pulled.
        let mut changes = self.store.subscribe();
        let mut dirty = false;
        let mut debounce_deadline: Option<Instant> = None;

        loop {
            let sleep_until =
                debounce_deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("SyncWorker shutting down");
                    if dirty && let Err(e) = self.push_with_retry().await {
                        tracing::error!("Final state push failed: {e}");
                    }
                    break;
                }

                _ = tokio::time::sleep_until(sleep_until), if debounce_deadline.is_some() => {
                    debounce_deadline = None;
                    dirty = false;
                    if let Err(e) = self.push_with_retry().await {
                        tracing::error!("State push failed after retries: {e}");
                    }
                }

                result = changes.changed() => {
                    match result {
                        Ok(()) => {
                            dirty = true;
                            debounce_deadline =
                                Some(Instant::now() + Duration::from_millis(DEBOUNCE_MS));
                        }
                        Err(_) => {
                            tracing::info!("Store change channel closed, SyncWorker stopping");
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("SyncWorker stopped");
    }

    /// Push the current state with exponential backoff retry.
    async fn push_with_retry(&self) -> Result<(), crate::utils::AppError> {
        let state = self.store.snapshot();
        let mut delay = Duration::from_secs(INITIAL_RETRY_DELAY_SECS);

        for attempt in 0..MAX_RETRIES {
            match self.sync_service.push_state(&state).await {
                Ok(()) => {
                    tracing::debug!(
                        rentals = state.rentals.len(),
                        bikes = state.bikes.len(),
                        "Pushed state upstream"
                    );
                    return Ok(());
                }
                Err(e) if attempt + 1 < MAX_RETRIES => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        delay_secs = delay.as_secs(),
                        "State push attempt failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(Duration::from_secs(60));
                }
                Err(e) => return Err(e),
            }
        }

        unreachable!()
    }
}
