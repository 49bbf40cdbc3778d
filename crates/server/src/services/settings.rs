//! Store configuration singleton.

use crate::error::Result;
use crate::models::StoreConfig;
use crate::store::Store;

/// Operations over the store configuration record.
pub struct ConfigService<'a> {
    store: &'a Store,
}

impl<'a> ConfigService<'a> {
    /// Create a new config service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// The current configuration (empty record when never written).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be read.
    pub async fn get(&self) -> Result<StoreConfig> {
        Ok(self.store.read().await?.config)
    }

    /// Merge a partial update into the configuration and return the
    /// resulting record. Omitted fields keep their prior values.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be written.
    pub async fn set(&self, patch: StoreConfig) -> Result<StoreConfig> {
        let config = self
            .store
            .update(move |doc| {
                doc.config.merge(patch);
                doc.config.clone()
            })
            .await?;

        Ok(config)
    }

    /// Apply the one-way branding default: set `logo_url` only when the
    /// configuration has none. Called once at startup.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be written.
    pub async fn apply_branding_default(&self, logo_url: &str) -> Result<()> {
        self.store
            .update(move |doc| {
                if doc.config.logo_url.is_none() {
                    doc.config.logo_url = Some(logo_url.to_owned());
                }
            })
            .await?;

        Ok(())
    }
}
