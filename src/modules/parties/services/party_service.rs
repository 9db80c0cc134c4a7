use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::InvoiceResponse;
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::parties::models::Party;
use crate::modules::parties::repositories::PartyRepository;

/// Display-facing party queries.
///
/// The original object graph let a party lazily traverse to its invoices;
/// here that traversal is an explicit query against the invoice store.
pub struct PartyService {
    parties: Arc<dyn PartyRepository>,
    invoices: Arc<dyn InvoiceRepository>,
}

impl PartyService {
    pub fn new(parties: Arc<dyn PartyRepository>, invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { parties, invoices }
    }

    /// List all parties
    pub async fn list_parties(&self) -> Result<Vec<Party>> {
        self.parties.find_all().await
    }

    /// List all invoices billed against one party
    pub async fn list_invoices_for_party(&self, party_id: i64) -> Result<Vec<InvoiceResponse>> {
        let party = self
            .parties
            .find_by_id(party_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Party with id '{}' not found", party_id)))?;

        let invoices = self.invoices.find_by_party(party_id).await?;

        Ok(invoices
            .into_iter()
            .map(|invoice| InvoiceResponse::from_parts(invoice, party.clone()))
            .collect())
    }
}
