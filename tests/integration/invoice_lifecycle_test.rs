// Invoice lifecycle end-to-end through InvoiceService with in-memory
// stores: create, update with full item replacement, delete, and the
// empty-item-list short-circuit.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use billbook::core::AppError;
use billbook::invoices::models::{CreateInvoiceRequest, InvoiceItemInput, UpdateInvoiceRequest};
use billbook::invoices::repositories::{InMemoryInvoiceRepository, InvoiceRepository};
use billbook::invoices::services::InvoiceService;
use billbook::parties::models::PartyInput;
use billbook::parties::repositories::{InMemoryPartyRepository, PartyRepository};

fn setup() -> (
    InvoiceService,
    Arc<InMemoryInvoiceRepository>,
    Arc<InMemoryPartyRepository>,
) {
    let party_repo = Arc::new(InMemoryPartyRepository::new());
    let invoice_repo = Arc::new(InMemoryInvoiceRepository::new(party_repo.clone()));
    let service = InvoiceService::new(invoice_repo.clone(), party_repo.clone());
    (service, invoice_repo, party_repo)
}

fn party(name: &str) -> PartyInput {
    PartyInput {
        name: name.to_string(),
        address: None,
        contact: None,
    }
}

fn item(name: &str, amount: Decimal) -> InvoiceItemInput {
    InvoiceItemInput {
        item_name: name.to_string(),
        hsn_sac: None,
        quantity: None,
        unit: None,
        unit_price: None,
        amount: Some(amount),
    }
}

fn create_request(
    party_name: &str,
    items: Vec<InvoiceItemInput>,
    discount: Option<Decimal>,
    received: Option<Decimal>,
) -> CreateInvoiceRequest {
    CreateInvoiceRequest {
        party: party(party_name),
        items,
        date: None,
        discount,
        received_amount: received,
        amount_in_words: None,
    }
}

#[tokio::test]
async fn test_create_for_new_party() {
    // Scenario: new party, one item of 100, discount 0, received 40
    let (service, _, party_repo) = setup();

    let response = service
        .create_invoice(create_request(
            "Acme",
            vec![item("Cement", dec!(100))],
            Some(dec!(0)),
            Some(dec!(40)),
        ))
        .await
        .unwrap();

    assert_eq!(response.sub_total, Some(dec!(100)));
    assert_eq!(response.previous_balance, Some(dec!(0)));
    assert_eq!(response.total_amount, Some(dec!(100)));
    assert_eq!(response.balance_amount, Some(dec!(60)));
    assert_eq!(response.party.balance_amount, dec!(60));

    let stored = party_repo
        .find_by_id(response.party.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.balance_amount, dec!(60));
}

#[tokio::test]
async fn test_create_for_existing_party_chains_balance() {
    // Scenario: party already owes 60; items sum 200, discount 20, received 50
    let (service, _, _) = setup();

    service
        .create_invoice(create_request(
            "Acme",
            vec![item("Cement", dec!(100))],
            Some(dec!(0)),
            Some(dec!(40)),
        ))
        .await
        .unwrap();

    let response = service
        .create_invoice(create_request(
            "ACME",
            vec![item("Cement", dec!(150)), item("Sand", dec!(50))],
            Some(dec!(20)),
            Some(dec!(50)),
        ))
        .await
        .unwrap();

    assert_eq!(response.sub_total, Some(dec!(200)));
    assert_eq!(response.previous_balance, Some(dec!(60)));
    assert_eq!(response.total_amount, Some(dec!(240)));
    assert_eq!(response.balance_amount, Some(dec!(190)));
    assert_eq!(response.party.balance_amount, dec!(190));
}

#[tokio::test]
async fn test_update_replaces_items_entirely() {
    let (service, invoice_repo, _) = setup();

    let created = service
        .create_invoice(create_request(
            "Acme",
            vec![item("Cement", dec!(60)), item("Sand", dec!(40))],
            None,
            Some(dec!(0)),
        ))
        .await
        .unwrap();

    let updated = service
        .update_invoice(
            created.id,
            UpdateInvoiceRequest {
                date: None,
                received_amount: Some(dec!(0)),
                discount: None,
                items: vec![item("Bricks", dec!(75))],
            },
        )
        .await
        .unwrap();

    // sub_total recomputed purely from the new set
    assert_eq!(updated.sub_total, Some(dec!(75)));
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].item_name, "Bricks");

    // old items are gone from storage
    let stored = invoice_repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.items[0].item_name, "Bricks");
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (service, _, _) = setup();

    let result = service
        .update_invoice(
            999,
            UpdateInvoiceRequest {
                date: None,
                received_amount: Some(dec!(0)),
                discount: None,
                items: vec![item("Bricks", dec!(10))],
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_empty_item_list_leaves_everything_untouched() {
    // Scenario: empty item list on create; derived fields stay unset,
    // party balance stays where it was
    let (service, _, party_repo) = setup();

    service
        .create_invoice(create_request(
            "Acme",
            vec![item("Cement", dec!(100))],
            None,
            Some(dec!(40)),
        ))
        .await
        .unwrap();

    let response = service
        .create_invoice(create_request("Acme", vec![], Some(dec!(10)), None))
        .await
        .unwrap();

    assert!(response.sub_total.is_none());
    assert!(response.total_amount.is_none());
    assert!(response.balance_amount.is_none());
    assert!(response.previous_balance.is_none());
    // untouched, not zeroed
    assert_eq!(response.party.balance_amount, dec!(60));

    let stored = party_repo
        .find_by_id(response.party.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.balance_amount, dec!(60));
}

#[tokio::test]
async fn test_delete_then_get_returns_absent() {
    let (service, _, _) = setup();

    let created = service
        .create_invoice(create_request(
            "Acme",
            vec![item("Cement", dec!(100))],
            None,
            Some(dec!(100)),
        ))
        .await
        .unwrap();

    service.delete_invoice(created.id).await.unwrap();

    assert!(service.get_invoice(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let (service, _, _) = setup();

    let result = service.delete_invoice(404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_missing_received_amount_persists_nothing() {
    let (service, invoice_repo, _) = setup();

    let result = service
        .create_invoice(create_request(
            "Acme",
            vec![item("Cement", dec!(100))],
            None,
            None,
        ))
        .await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
    assert!(invoice_repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_invoices_embeds_party() {
    let (service, _, _) = setup();

    service
        .create_invoice(create_request(
            "Acme",
            vec![item("Cement", dec!(100))],
            None,
            Some(dec!(0)),
        ))
        .await
        .unwrap();
    service
        .create_invoice(create_request(
            "Globex",
            vec![item("Steel", dec!(300))],
            None,
            Some(dec!(300)),
        ))
        .await
        .unwrap();

    let invoices = service.list_invoices().await.unwrap();

    assert_eq!(invoices.len(), 2);
    assert_eq!(invoices[0].party.name, "Acme");
    assert_eq!(invoices[1].party.name, "Globex");
}
