use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::Invoice;
use crate::modules::parties::models::Party;

/// Computes an invoice's derived fields and rolls the party's balance
/// forward.
///
/// Ordering matters: sub_total is fixed before the discount is applied
/// (it always reflects the pre-discount item total), and previous_balance
/// snapshots the party's balance before this invoice changes it. After a
/// successful run the party's balance equals the invoice's trailing
/// balance; the caller persists both records together.
pub struct InvoiceCalculator;

impl InvoiceCalculator {
    /// Compute sub_total, total_amount, previous_balance and
    /// balance_amount, and set the party's new running balance.
    ///
    /// An invoice with no items is left completely untouched, party
    /// included. A missing item amount or missing received_amount fails
    /// the whole computation; defaulting to zero would corrupt the
    /// party's stored balance.
    pub fn compute_and_apply(invoice: &mut Invoice, party: &mut Party) -> Result<()> {
        if invoice.items.is_empty() {
            return Ok(());
        }

        // Attach ownership to every item first
        for item in &mut invoice.items {
            item.invoice_id = invoice.id;
        }

        let mut sub_total = Decimal::ZERO;
        for (index, item) in invoice.items.iter().enumerate() {
            let amount = item.amount.ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Item {} ('{}') has no amount",
                    index, item.item_name
                ))
            })?;
            sub_total += amount;
        }
        invoice.sub_total = Some(sub_total);

        // The discount reduces the working total only; sub_total stays
        // pre-discount
        let mut working_total = sub_total;
        if let Some(discount) = invoice.discount {
            if discount > Decimal::ZERO {
                working_total -= discount;
            }
        }

        let previous_balance = party.balance_amount;
        invoice.previous_balance = Some(previous_balance);

        let total_amount = working_total + previous_balance;
        invoice.total_amount = Some(total_amount);

        let received_amount = invoice.received_amount.ok_or_else(|| {
            AppError::invalid_input("received_amount is required when the invoice has items")
        })?;

        let balance_amount = total_amount - received_amount;
        invoice.balance_amount = Some(balance_amount);

        // The trailing balance replaces the party's running balance
        party.balance_amount = balance_amount;

        Ok(())
    }
}
