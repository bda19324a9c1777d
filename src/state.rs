use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::favorites_service::FavoritesService;
use crate::services::identity_service::{IdentityStore, RestIdentityService};
use crate::services::notify_service::NotificationCenter;
use crate::services::otp_service::{OtpLedger, SystemClock};
use crate::services::recovery_service::RecoveryService;
use crate::services::session_service::SessionService;
use crate::services::storage_service::{FileStorageService, KeyValueStore};

/// Everything a UI shell needs, wired together once at process start. The
/// OTP ledger is owned here and only ever reached through the recovery
/// workflow; it is never ambient global state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub recovery: Arc<RecoveryService>,
    pub session: Arc<SessionService>,
    pub notifications: Arc<NotificationCenter>,
    pub favorites: Arc<FavoritesService>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let identity: Arc<dyn IdentityStore> =
            Arc::new(RestIdentityService::new(config.api_base_url.clone()));
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(FileStorageService::new(config.storage_path.clone()));
        Self::with_components(config, identity, storage)
    }

    /// Wire the services over caller-supplied collaborators, e.g. an
    /// in-memory storage for embedders that manage persistence themselves.
    pub fn with_components(
        config: AppConfig,
        identity: Arc<dyn IdentityStore>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let notifications = Arc::new(NotificationCenter::new());
        let ledger = Arc::new(OtpLedger::new(Arc::new(SystemClock), config.otp_ttl_secs));
        let recovery = Arc::new(RecoveryService::new(
            identity.clone(),
            ledger,
            notifications.clone(),
        ));
        let session = Arc::new(SessionService::new(identity, storage.clone()));
        let favorites = Arc::new(FavoritesService::new(storage));

        AppState {
            config,
            recovery,
            session,
            notifications,
            favorites,
        }
    }
}
