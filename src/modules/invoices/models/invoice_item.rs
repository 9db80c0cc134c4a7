// InvoiceItem model
//
// One priced line entry on an invoice. Items are exclusively owned by
// their invoice: replacing an invoice's item list or deleting the invoice
// destroys the orphaned rows. The amount is taken as given input and is
// never recomputed from quantity × unit_price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single line entry on an invoice
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceItem {
    #[serde(skip_deserializing)]
    pub id: Option<i64>,

    /// Back-reference to the owning invoice
    #[serde(skip_deserializing)]
    pub invoice_id: Option<i64>,

    pub item_name: String,

    /// Tax classification code, carried as an opaque string
    pub hsn_sac: Option<String>,

    pub quantity: Option<Decimal>,

    pub unit: Option<String>,

    pub unit_price: Option<Decimal>,

    /// Line amount; required by the invoice computation
    pub amount: Option<Decimal>,
}

/// Line item payload on invoice create/update requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItemInput {
    pub item_name: String,
    pub hsn_sac: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub amount: Option<Decimal>,
}

impl From<InvoiceItemInput> for InvoiceItem {
    fn from(input: InvoiceItemInput) -> Self {
        InvoiceItem {
            id: None,
            invoice_id: None,
            item_name: input.item_name,
            hsn_sac: input.hsn_sac,
            quantity: input.quantity,
            unit: input.unit,
            unit_price: input.unit_price,
            amount: input.amount,
        }
    }
}
