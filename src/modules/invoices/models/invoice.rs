// Invoice model
//
// An invoice is a billing document against exactly one party, composed of
// an ordered list of line items, an optional discount, and the payment
// received. The derived fields (sub_total, total_amount, balance_amount,
// previous_balance) stay unset until the calculator fills them; an invoice
// created with no items keeps them unset.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::parties::models::{Party, PartyInput};

use super::invoice_item::{InvoiceItem, InvoiceItemInput};

/// A billing document against a party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Surrogate identifier, assigned by the store
    pub id: Option<i64>,

    pub date: Option<NaiveDate>,

    /// Sum of item amounts before discount
    pub sub_total: Option<Decimal>,

    /// (sub_total - discount, when discount > 0) + previous_balance
    pub total_amount: Option<Decimal>,

    pub received_amount: Option<Decimal>,

    /// total_amount - received_amount; becomes the party's new running balance
    pub balance_amount: Option<Decimal>,

    /// Snapshot of the party's balance before this invoice's effect
    pub previous_balance: Option<Decimal>,

    /// Free text, taken as given and never derived
    pub amount_in_words: Option<String>,

    pub discount: Option<Decimal>,

    /// The billed party; set once resolution has run
    pub party_id: Option<i64>,

    /// Owned item list, insertion order preserved
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

/// Payload for POST /invoices
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub party: PartyInput,
    #[serde(default)]
    pub items: Vec<InvoiceItemInput>,
    pub date: Option<NaiveDate>,
    pub discount: Option<Decimal>,
    pub received_amount: Option<Decimal>,
    pub amount_in_words: Option<String>,
}

impl CreateInvoiceRequest {
    pub fn validate(&self) -> Result<()> {
        validate_discount(self.discount)?;
        validate_items(&self.items)
    }

    /// Build the unsaved invoice this request describes
    pub fn into_invoice(self) -> Invoice {
        Invoice {
            id: None,
            date: self.date,
            sub_total: None,
            total_amount: None,
            received_amount: self.received_amount,
            balance_amount: None,
            previous_balance: None,
            amount_in_words: self.amount_in_words,
            discount: self.discount,
            party_id: None,
            items: self.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Payload for PUT /invoices/{id}
///
/// The incoming item list fully replaces the stored one; date,
/// received_amount and discount overwrite the stored values as given.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub date: Option<NaiveDate>,
    pub received_amount: Option<Decimal>,
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub items: Vec<InvoiceItemInput>,
}

impl UpdateInvoiceRequest {
    pub fn validate(&self) -> Result<()> {
        validate_discount(self.discount)?;
        validate_items(&self.items)
    }
}

fn validate_discount(discount: Option<Decimal>) -> Result<()> {
    if let Some(discount) = discount {
        if discount < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Discount must be non-negative, got: {}",
                discount
            )));
        }
    }

    Ok(())
}

fn validate_items(items: &[InvoiceItemInput]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        if item.item_name.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Item {} name cannot be empty",
                index
            )));
        }
    }

    Ok(())
}

/// Invoice as returned by the API, with the billed party embedded
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub sub_total: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub received_amount: Option<Decimal>,
    pub balance_amount: Option<Decimal>,
    pub previous_balance: Option<Decimal>,
    pub amount_in_words: Option<String>,
    pub discount: Option<Decimal>,
    pub party: Party,
    pub items: Vec<InvoiceItem>,
}

impl InvoiceResponse {
    pub fn from_parts(invoice: Invoice, party: Party) -> Self {
        InvoiceResponse {
            id: invoice.id.unwrap_or_default(),
            date: invoice.date,
            sub_total: invoice.sub_total,
            total_amount: invoice.total_amount,
            received_amount: invoice.received_amount,
            balance_amount: invoice.balance_amount,
            previous_balance: invoice.previous_balance,
            amount_in_words: invoice.amount_in_words,
            discount: invoice.discount,
            party,
            items: invoice.items,
        }
    }
}
