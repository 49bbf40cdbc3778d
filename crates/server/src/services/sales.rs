//! Append-only sales ledger.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use outfitter_core::{Money, ProductId, SaleId};

use crate::error::{ApiError, Result};
use crate::models::Sale;
use crate::store::Store;

/// Manually recorded sale. The ledger trusts its caller: the product
/// reference is not validated against the current catalog.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSale {
    pub product_id: Option<ProductId>,
    pub product_name: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
}

/// Operations over the sales collection.
pub struct SalesService<'a> {
    store: &'a Store,
}

impl<'a> SalesService<'a> {
    /// Create a new sales service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All sales in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<Sale>> {
        Ok(self.store.read().await?.sales)
    }

    /// Append a sale with a generated id and server-side timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the product reference or total
    /// is missing, or the total is negative.
    pub async fn record(&self, input: NewSale) -> Result<Sale> {
        let product_id = input
            .product_id
            .filter(|id| !id.as_str().is_empty())
            .ok_or_else(|| ApiError::Validation("productId and total required".to_owned()))?;
        let total = input
            .total
            .ok_or_else(|| ApiError::Validation("productId and total required".to_owned()))?;
        let total = Money::new(total).map_err(|e| ApiError::Validation(e.to_string()))?;

        let sale = Sale {
            id: SaleId::generate(),
            product_id,
            product_name: input.product_name.unwrap_or_default(),
            total,
            ts: Utc::now(),
            order_id: None,
        };

        let recorded = sale.clone();
        self.store.update(move |doc| doc.sales.push(sale)).await?;

        Ok(recorded)
    }

    /// Append the sale for a captured checkout order, keyed by the
    /// provider's order id.
    ///
    /// A retry with an order id that is already in the ledger returns the
    /// existing record instead of appending a duplicate, so capture
    /// resubmission is safe.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be written.
    pub async fn record_capture(
        &self,
        order_id: &str,
        product_id: Option<ProductId>,
        product_name: Option<String>,
        total: Money,
    ) -> Result<Sale> {
        let sale = self
            .store
            .update(move |doc| {
                if let Some(existing) = doc
                    .sales
                    .iter()
                    .find(|s| s.order_id.as_deref() == Some(order_id))
                {
                    return existing.clone();
                }

                let sale = Sale {
                    id: SaleId::generate(),
                    product_id: product_id.unwrap_or_else(|| ProductId::new("")),
                    product_name: product_name.unwrap_or_default(),
                    total,
                    ts: Utc::now(),
                    order_id: Some(order_id.to_owned()),
                };
                doc.sales.push(sale.clone());
                sale
            })
            .await?;

        Ok(sale)
    }
}
