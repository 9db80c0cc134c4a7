// Property-based tests for the invoice calculation.
//
// Verifies, across a wide input range:
// - sub_total = sum of item amounts, independent of discount
// - total_amount = (sub_total - discount when discount > 0) + previous_balance
// - balance_amount = total_amount - received_amount
// - party balance equals the invoice's trailing balance after computation

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use billbook::invoices::models::{Invoice, InvoiceItem};
use billbook::invoices::services::InvoiceCalculator;
use billbook::parties::models::Party;

fn item(amount: u32) -> InvoiceItem {
    InvoiceItem {
        id: None,
        invoice_id: None,
        item_name: format!("item-{}", amount),
        hsn_sac: None,
        quantity: None,
        unit: None,
        unit_price: None,
        amount: Some(Decimal::from(amount)),
    }
}

fn invoice(amounts: &[u32], discount: Option<Decimal>, received: Decimal) -> Invoice {
    Invoice {
        id: Some(1),
        date: None,
        sub_total: None,
        total_amount: None,
        received_amount: Some(received),
        balance_amount: None,
        previous_balance: None,
        amount_in_words: None,
        discount,
        party_id: Some(1),
        items: amounts.iter().copied().map(item).collect(),
    }
}

fn party(balance: Decimal) -> Party {
    Party {
        id: Some(1),
        name: "Acme".to_string(),
        address: None,
        contact: None,
        balance_amount: balance,
    }
}

proptest! {
    /// sub_total is the item sum, no matter the discount
    #[test]
    fn test_sub_total_is_discount_independent(
        amounts in proptest::collection::vec(0u32..1_000_000, 1..8),
        discount in proptest::option::of(0u32..100_000),
        received in 0u32..1_000_000,
    ) {
        let expected: Decimal = amounts.iter().map(|a| Decimal::from(*a)).sum();

        let mut invoice = invoice(&amounts, discount.map(Decimal::from), Decimal::from(received));
        let mut party = party(Decimal::ZERO);
        InvoiceCalculator::compute_and_apply(&mut invoice, &mut party).unwrap();

        prop_assert_eq!(invoice.sub_total, Some(expected));
    }

    /// total = (sub_total - discount when positive) + previous balance
    #[test]
    fn test_total_amount_formula(
        amounts in proptest::collection::vec(0u32..1_000_000, 1..8),
        discount in proptest::option::of(0u32..100_000),
        previous in -1_000_000i64..1_000_000i64,
        received in 0u32..1_000_000,
    ) {
        let sub_total: Decimal = amounts.iter().map(|a| Decimal::from(*a)).sum();
        let discount = discount.map(Decimal::from);
        let previous = Decimal::from(previous);

        let mut expected = sub_total;
        if let Some(d) = discount {
            if d > Decimal::ZERO {
                expected -= d;
            }
        }
        expected += previous;

        let mut invoice = invoice(&amounts, discount, Decimal::from(received));
        let mut party = party(previous);
        InvoiceCalculator::compute_and_apply(&mut invoice, &mut party).unwrap();

        prop_assert_eq!(invoice.previous_balance, Some(previous));
        prop_assert_eq!(invoice.total_amount, Some(expected));
    }

    /// balance = total - received, and the party carries it forward
    #[test]
    fn test_balance_amount_and_party_handoff(
        amounts in proptest::collection::vec(0u32..1_000_000, 1..8),
        previous in 0i64..1_000_000i64,
        received in 0u32..1_000_000,
    ) {
        let mut invoice = invoice(&amounts, None, Decimal::from(received));
        let mut party = party(Decimal::from(previous));
        InvoiceCalculator::compute_and_apply(&mut invoice, &mut party).unwrap();

        let total = invoice.total_amount.unwrap();
        let expected_balance = total - Decimal::from(received);

        prop_assert_eq!(invoice.balance_amount, Some(expected_balance));
        prop_assert_eq!(party.balance_amount, expected_balance);
    }
}

#[test]
fn test_discount_never_reduces_sub_total() {
    let mut inv = invoice(&[100, 50], Some(dec!(30)), dec!(0));
    let mut p = party(Decimal::ZERO);
    InvoiceCalculator::compute_and_apply(&mut inv, &mut p).unwrap();

    assert_eq!(inv.sub_total, Some(dec!(150)));
    assert_eq!(inv.total_amount, Some(dec!(120)));
}

#[test]
fn test_missing_amount_fails_instead_of_coercing_to_zero() {
    let mut inv = invoice(&[100], None, dec!(0));
    inv.items.push(InvoiceItem {
        id: None,
        invoice_id: None,
        item_name: "no-amount".to_string(),
        hsn_sac: None,
        quantity: Some(dec!(2)),
        unit: Some("bag".to_string()),
        unit_price: Some(dec!(50)),
        amount: None,
    });
    let mut p = party(Decimal::ZERO);

    assert!(InvoiceCalculator::compute_and_apply(&mut inv, &mut p).is_err());
    assert_eq!(p.balance_amount, Decimal::ZERO);
}
