//! Catalog product record.

use serde::{Deserialize, Serialize};

use outfitter_core::{Money, ProductId};

/// A product in the catalog.
///
/// Optional presentation fields default to empty strings/lists; there is
/// no foreign-key relationship with recorded sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, server-generated identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price in the store currency.
    pub price: Money,
    /// Short description shown in listings.
    #[serde(default)]
    pub desc_short: String,
    /// Long description shown on the product page.
    #[serde(default)]
    pub desc_long: String,
    /// Free-text tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category labels.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Image reference (URL or data URI).
    #[serde(default)]
    pub img: String,
}
