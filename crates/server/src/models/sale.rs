//! Sales ledger record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use outfitter_core::{Money, ProductId, SaleId};

/// A completed purchase, appended to the ledger and never mutated.
///
/// `product_id` and `product_name` are informational snapshots; they are
/// not validated against the current catalog, and `total` is independent
/// of later price changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique, server-generated identifier.
    pub id: SaleId,
    /// Product reference at the time of sale (not validated).
    pub product_id: ProductId,
    /// Product name snapshot.
    #[serde(default)]
    pub product_name: String,
    /// Amount paid.
    pub total: Money,
    /// Server-side creation time (epoch milliseconds on the wire).
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub ts: DateTime<Utc>,
    /// Payment-provider order id when the sale was recorded by the
    /// checkout flow; used as an idempotency key for capture retries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}
