use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{
    CreateInvoiceRequest, Invoice, InvoiceResponse, UpdateInvoiceRequest,
};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::invoices::services::invoice_calculator::InvoiceCalculator;
use crate::modules::parties::models::Party;
use crate::modules::parties::repositories::PartyRepository;
use crate::modules::parties::services::{PartyLocks, PartyResolver};

/// Orchestrates the invoice lifecycle: party resolution, derived-field
/// computation and the persistence unit of work.
pub struct InvoiceService {
    invoice_repo: Arc<dyn InvoiceRepository>,
    party_repo: Arc<dyn PartyRepository>,
    resolver: PartyResolver,
    locks: PartyLocks,
}

impl InvoiceService {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        party_repo: Arc<dyn PartyRepository>,
    ) -> Self {
        Self {
            invoice_repo,
            party_repo: party_repo.clone(),
            resolver: PartyResolver::new(party_repo),
            locks: PartyLocks::new(),
        }
    }

    /// Create a new invoice.
    ///
    /// Resolves (or creates) the billed party, computes the derived
    /// fields, and persists invoice and party balance together. The
    /// party's lock is held across all three steps so overlapping
    /// requests against one party cannot lose a balance update.
    pub async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<InvoiceResponse> {
        request.validate()?;

        let lock = self.locks.lock_for(&request.party.name);
        let _guard = lock.lock().await;

        let mut party = self.resolver.resolve(&request.party).await?;

        let mut invoice = request.into_invoice();
        invoice.party_id = party.id;

        InvoiceCalculator::compute_and_apply(&mut invoice, &mut party)?;

        let saved = self.invoice_repo.save_with_party(&invoice, &party).await?;

        info!(
            invoice_id = saved.id,
            party_id = party.id,
            balance = %party.balance_amount,
            "Created invoice"
        );

        Ok(InvoiceResponse::from_parts(saved, party))
    }

    /// Update an existing invoice.
    ///
    /// The stored item list is fully replaced by the incoming one; date,
    /// received_amount and discount are overwritten as given. The
    /// previous balance is read from the invoice's already-associated
    /// party; the party is never re-resolved here.
    pub async fn update_invoice(
        &self,
        id: i64,
        request: UpdateInvoiceRequest,
    ) -> Result<InvoiceResponse> {
        request.validate()?;

        let mut invoice = self
            .invoice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Invoice with id '{}' not found", id)))?;

        // The lock key is the party name, so one fetch to learn it, then
        // a re-read under the lock for a clean balance snapshot
        let party_id = invoice
            .party_id
            .ok_or_else(|| AppError::internal("Invoice has no associated party"))?;
        let party_name = self.fetch_party(party_id).await?.name;

        let lock = self.locks.lock_for(&party_name);
        let _guard = lock.lock().await;

        let mut party = self.fetch_party(party_id).await?;

        invoice.date = request.date;
        invoice.received_amount = request.received_amount;
        invoice.discount = request.discount;
        invoice.items = request.items.into_iter().map(Into::into).collect();

        InvoiceCalculator::compute_and_apply(&mut invoice, &mut party)?;

        let saved = self.invoice_repo.save_with_party(&invoice, &party).await?;

        info!(
            invoice_id = saved.id,
            party_id = party.id,
            balance = %party.balance_amount,
            "Updated invoice"
        );

        Ok(InvoiceResponse::from_parts(saved, party))
    }

    /// Delete an invoice and its items.
    ///
    /// The party's balance is deliberately left as-is, matching the
    /// system this one replaces: deleting an invoice does not roll its
    /// effect out of the running balance.
    pub async fn delete_invoice(&self, id: i64) -> Result<()> {
        if !self.invoice_repo.exists_by_id(id).await? {
            return Err(AppError::not_found(format!(
                "Invoice with id '{}' not found",
                id
            )));
        }

        self.invoice_repo.delete_by_id(id).await?;

        info!(invoice_id = id, "Deleted invoice");

        Ok(())
    }

    /// Get one invoice; None when the id is unknown
    pub async fn get_invoice(&self, id: i64) -> Result<Option<InvoiceResponse>> {
        let Some(invoice) = self.invoice_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let response = self.to_response(invoice).await?;

        Ok(Some(response))
    }

    /// List all invoices
    pub async fn list_invoices(&self) -> Result<Vec<InvoiceResponse>> {
        let invoices = self.invoice_repo.find_all().await?;

        let mut responses = Vec::with_capacity(invoices.len());
        for invoice in invoices {
            responses.push(self.to_response(invoice).await?);
        }

        Ok(responses)
    }

    async fn fetch_party(&self, party_id: i64) -> Result<Party> {
        self.party_repo
            .find_by_id(party_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Invoice references missing party '{}'", party_id))
            })
    }

    async fn to_response(&self, invoice: Invoice) -> Result<InvoiceResponse> {
        let party = self
            .fetch_party(invoice.party_id.unwrap_or_default())
            .await?;

        Ok(InvoiceResponse::from_parts(invoice, party))
    }
}
