//! Payout settings.

use serde::Deserialize;

use outfitter_core::PayoutMethod;

use crate::error::{ApiError, Result};
use crate::models::Payout;
use crate::store::Store;

/// Payout update request. The method is required; destination fields
/// default to unset. The stored record is replaced wholesale.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayoutUpdate {
    pub method: Option<String>,
    pub email: Option<String>,
    pub account: Option<String>,
}

/// Operations over the payout record.
pub struct PayoutService<'a> {
    store: &'a Store,
}

impl<'a> PayoutService<'a> {
    /// Create a new payout service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// The current payout record; `None` means not configured yet, which
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be read.
    pub async fn get(&self) -> Result<Option<Payout>> {
        Ok(self.store.read().await?.payout)
    }

    /// Replace the payout record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the method is missing or not one
    /// of the known payout methods.
    pub async fn set(&self, update: PayoutUpdate) -> Result<Payout> {
        let method = update
            .method
            .ok_or_else(|| ApiError::Validation("method required".to_owned()))?;
        let method: PayoutMethod = method
            .parse()
            .map_err(|e: outfitter_core::PayoutMethodError| ApiError::Validation(e.to_string()))?;

        let payout = Payout {
            method,
            email: update.email,
            account: update.account,
        };

        let saved = payout.clone();
        self.store
            .update(move |doc| doc.payout = Some(payout))
            .await?;

        Ok(saved)
    }
}
