use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::auth::AdminRegistry;
use crate::core::{Config, Result, ServerError};
use crate::rentals::RentalManager;
use crate::services::PhotoStore;
use crate::store::StateStore;
use crate::sync::{SyncService, SyncWorker};

/// Server state - shared references to every service singleton
///
/// Cloning is an Arc bump; axum hands a clone to every handler.
///
/// | Field | Role |
/// |-------|------|
/// | config | Immutable configuration |
/// | store | The application state (single writer via commit) |
/// | rentals | Rental lifecycle coordinator |
/// | admins | Console admin registry + tokens |
/// | photos | Upload storage under work_dir |
/// | sync | Upstream client, `None` in local-only mode |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<StateStore>,
    pub rentals: Arc<RentalManager>,
    pub admins: Arc<AdminRegistry>,
    pub photos: Arc<PhotoStore>,
    pub sync: Option<Arc<SyncService>>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("work_dir", &self.config.work_dir)
            .field("sync", &self.config.sync_url)
            .finish()
    }
}

impl ServerState {
    /// Initialize all services.
    ///
    /// Order: work-dir structure, state store (load or seed), admin
    /// registry, photo store, optional sync client, rental manager.
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(config.work_dir_path())?;

        let store = Arc::new(StateStore::open(&config.data_dir())?);
        let admins = Arc::new(AdminRegistry::open(
            &config.data_dir(),
            config.admin_token_ttl_ms(),
        )?);
        let photos = Arc::new(PhotoStore::open(&config.work_dir_path())?);

        let sync = match &config.sync_url {
            Some(url) => {
                let service = SyncService::new(url.clone())
                    .map_err(|e| ServerError::Internal(e.to_string()))?;
                tracing::info!(upstream = %url, "Sync bridge configured");
                Some(Arc::new(service))
            }
            None => {
                tracing::info!("No SYNC_URL configured, running local-only");
                None
            }
        };

        let rentals = Arc::new(RentalManager::with_sync(store.clone(), sync.clone()));

        Ok(Self {
            config: config.clone(),
            store,
            rentals,
            admins,
            photos,
            sync,
        })
    }

    /// Start background tasks. Must be called before `Server::run` serves
    /// traffic; currently this is only the sync worker.
    pub fn start_background_tasks(&self, shutdown: &CancellationToken) {
        if let Some(sync) = &self.sync {
            let worker = SyncWorker::new(self.store.clone(), sync.clone(), shutdown.clone());
            tokio::spawn(worker.run());
        }
    }
}
