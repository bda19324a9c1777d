use std::sync::Arc;

use crate::errors::StorageError;
use crate::services::storage_service::KeyValueStore;

pub const FAVORITES_KEY: &str = "@MyApp:Favorites";

/// Persisted list of favorited product ids, sharing the same durable storage
/// abstraction as the session.
pub struct FavoritesService {
    storage: Arc<dyn KeyValueStore>,
}

impl FavoritesService {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// All favorited ids. Storage failures are logged and read as empty.
    pub async fn list(&self) -> Vec<String> {
        let raw = match self.storage.get(FAVORITES_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to get favorites: {}", e);
                return Vec::new();
            }
        };
        raw.and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub async fn contains(&self, product_id: &str) -> bool {
        self.list().await.iter().any(|id| id == product_id)
    }

    /// Add or remove an id; returns whether it is favorited afterwards.
    pub async fn toggle(&self, product_id: &str) -> Result<bool, StorageError> {
        let mut favorites = self.list().await;
        let now_favorite = if let Some(pos) = favorites.iter().position(|id| id == product_id) {
            favorites.remove(pos);
            false
        } else {
            favorites.push(product_id.to_string());
            true
        };

        let raw = serde_json::to_string(&favorites)?;
        self.storage.set(FAVORITES_KEY, &raw).await?;
        Ok(now_favorite)
    }
}
