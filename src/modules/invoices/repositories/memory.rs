// In-memory invoice repository
//
// Items live in an arena keyed by invoice id, mirroring the MySQL
// implementation's item table: save_with_party replaces the whole item
// list for the invoice, delete_by_id removes invoice and items together.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{Invoice, InvoiceItem};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::parties::models::Party;
use crate::modules::parties::repositories::{InMemoryPartyRepository, PartyRepository};

#[derive(Default)]
struct State {
    invoices: HashMap<i64, Invoice>,
    items: HashMap<i64, Vec<InvoiceItem>>,
    next_invoice_id: i64,
    next_item_id: i64,
}

/// In-memory implementation of [`InvoiceRepository`]
pub struct InMemoryInvoiceRepository {
    state: Mutex<State>,
    parties: Arc<InMemoryPartyRepository>,
}

impl InMemoryInvoiceRepository {
    /// The party repository is shared so save_with_party can commit the
    /// balance update alongside the invoice write.
    pub fn new(parties: Arc<InMemoryPartyRepository>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            parties,
        }
    }
}

fn with_items(state: &State, invoice: &Invoice) -> Invoice {
    let mut invoice = invoice.clone();
    invoice.items = state
        .items
        .get(&invoice.id.unwrap_or_default())
        .cloned()
        .unwrap_or_default();
    invoice
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn find_all(&self) -> Result<Vec<Invoice>> {
        let state = self.state.lock().await;
        let mut invoices: Vec<Invoice> = state
            .invoices
            .values()
            .map(|invoice| with_items(&state, invoice))
            .collect();
        invoices.sort_by_key(|i| i.id);
        Ok(invoices)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>> {
        let state = self.state.lock().await;
        Ok(state
            .invoices
            .get(&id)
            .map(|invoice| with_items(&state, invoice)))
    }

    async fn find_by_party(&self, party_id: i64) -> Result<Vec<Invoice>> {
        let state = self.state.lock().await;
        let mut invoices: Vec<Invoice> = state
            .invoices
            .values()
            .filter(|invoice| invoice.party_id == Some(party_id))
            .map(|invoice| with_items(&state, invoice))
            .collect();
        invoices.sort_by_key(|i| i.id);
        Ok(invoices)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let state = self.state.lock().await;
        Ok(state.invoices.contains_key(&id))
    }

    async fn save_with_party(&self, invoice: &Invoice, party: &Party) -> Result<Invoice> {
        if party.id.is_none() {
            return Err(AppError::internal("Cannot save invoice for an unsaved party"));
        }

        let saved = {
            let mut state = self.state.lock().await;

            let mut saved = invoice.clone();
            let invoice_id = match saved.id {
                Some(id) => id,
                None => {
                    state.next_invoice_id += 1;
                    let id = state.next_invoice_id;
                    saved.id = Some(id);
                    id
                }
            };

            // Full item replacement, fresh ids for the incoming list
            let mut items = Vec::with_capacity(saved.items.len());
            for item in &saved.items {
                state.next_item_id += 1;
                let mut item = item.clone();
                item.id = Some(state.next_item_id);
                item.invoice_id = Some(invoice_id);
                items.push(item);
            }
            saved.items = items.clone();
            state.items.insert(invoice_id, items);

            let mut record = saved.clone();
            record.items = Vec::new();
            state.invoices.insert(invoice_id, record);

            saved
        };

        self.parties.save(party).await?;

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().await;

        if state.invoices.remove(&id).is_none() {
            return Err(AppError::not_found(format!(
                "Invoice with id '{}' not found",
                id
            )));
        }
        state.items.remove(&id);

        Ok(())
    }
}
