//! Payout settings and the store configuration singleton.

use serde::{Deserialize, Serialize};

use outfitter_core::PayoutMethod;

/// How the store owner is paid out. At most one record exists; updates
/// replace it wholesale, so a method switch leaves no stale fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    /// Payout rail.
    pub method: PayoutMethod,
    /// Destination email (PayPal).
    pub email: Option<String>,
    /// Destination account number (direct deposit).
    pub account: Option<String>,
}

/// Store-wide configuration singleton.
///
/// All fields are optional; updates merge field-by-field so a partial
/// write never clears settings it did not mention. The game-server
/// connection fields live here alongside branding and payment settings
/// because the front end reads them from the same record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Game server host players connect to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fivem_host: Option<String>,
    /// Game server port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fivem_port: Option<String>,
    /// Game server connect password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fivem_password: Option<String>,
    /// PayPal client id exposed to the checkout front end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paypal_client_id: Option<String>,
    /// ISO 4217 currency code; defaults to USD on first write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Branding logo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl StoreConfig {
    /// Merge a partial update into this record.
    ///
    /// Fields the patch leaves unset keep their prior value. The currency
    /// gains a one-way `USD` default the first time the record is written
    /// without one.
    pub fn merge(&mut self, patch: Self) {
        merge_field(&mut self.fivem_host, patch.fivem_host);
        merge_field(&mut self.fivem_port, patch.fivem_port);
        merge_field(&mut self.fivem_password, patch.fivem_password);
        merge_field(&mut self.paypal_client_id, patch.paypal_client_id);
        merge_field(&mut self.currency, patch.currency);
        merge_field(&mut self.logo_url, patch.logo_url);

        if self.currency.is_none() {
            self.currency = Some("USD".to_owned());
        }
    }
}

fn merge_field(current: &mut Option<String>, update: Option<String>) {
    if let Some(value) = update {
        *current = Some(value);
    }
}
