// Party model
//
// A party is a billing counterparty (customer) with a running balance.
// The name acts as a case-insensitive natural key: invoices reference
// parties by name and resolution reuses an existing record when one
// matches. The balance is fully replaced by each invoice's trailing
// balance, never accumulated additively.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A billing counterparty with a running balance
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Party {
    /// Surrogate identifier, assigned by the store
    #[serde(skip_deserializing)]
    pub id: Option<i64>,

    /// Display name, also the case-insensitive resolution key
    pub name: String,

    pub address: Option<String>,

    pub contact: Option<String>,

    /// Running balance; equals the trailing balance of the party's most
    /// recently computed invoice
    #[serde(default)]
    pub balance_amount: Decimal,
}

impl Party {
    /// Create a new party with a zero opening balance
    pub fn new(name: String, address: Option<String>, contact: Option<String>) -> Self {
        Self {
            id: None,
            name,
            address,
            contact,
            balance_amount: Decimal::ZERO,
        }
    }

    /// Case-insensitive name comparison used by resolution
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Party descriptor embedded in an invoice create request.
///
/// Only the name is required; address and contact are used when the
/// descriptor results in a newly created party and are ignored when an
/// existing record wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyInput {
    pub name: String,
    pub address: Option<String>,
    pub contact: Option<String>,
}
