// InvoiceRepository: store interface and MySQL implementation
//
// Writes go through save_with_party: the invoice row, the full item
// replacement and the party's balance update commit in one transaction.
// Items live in their own table keyed by invoice id; replacing an
// invoice's items deletes the old rows before inserting the new list, and
// deleting an invoice deletes its items in the same transaction.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{Invoice, InvoiceItem};
use crate::modules::parties::models::Party;

/// Store interface for invoices and their owned items
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// All invoices with their items
    async fn find_all(&self) -> Result<Vec<Invoice>>;

    /// Find one invoice with its items
    async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>>;

    /// All invoices billed against one party
    async fn find_by_party(&self, party_id: i64) -> Result<Vec<Invoice>>;

    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    /// Persist the invoice, its full item list and the party's updated
    /// balance in one unit of work. Either everything commits or nothing
    /// does. Returns the invoice with assigned ids.
    async fn save_with_party(&self, invoice: &Invoice, party: &Party) -> Result<Invoice>;

    /// Delete an invoice and its items. The party's balance is not
    /// touched; see InvoiceService::delete_invoice.
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

/// MySQL-backed invoice repository
pub struct MySqlInvoiceRepository {
    pool: MySqlPool,
}

impl MySqlInvoiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_items(&self, invoice_id: i64) -> Result<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT id, invoice_id, item_name, hsn_sac, quantity, unit, unit_price, amount
            FROM invoice_items
            WHERE invoice_id = ?
            ORDER BY id
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch invoice items: {}", e)))?;

        Ok(items)
    }

    async fn insert_item(
        tx: &mut Transaction<'_, MySql>,
        invoice_id: i64,
        item: &InvoiceItem,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO invoice_items (
                invoice_id, item_name, hsn_sac, quantity, unit, unit_price, amount
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(invoice_id)
        .bind(&item.item_name)
        .bind(&item.hsn_sac)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.unit_price)
        .bind(item.amount)
        .execute(tx.as_mut())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to insert invoice item: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl InvoiceRepository for MySqlInvoiceRepository {
    async fn find_all(&self) -> Result<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, date, sub_total, total_amount, received_amount, balance_amount,
                   previous_balance, amount_in_words, discount, party_id
            FROM invoices
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to list invoices: {}", e)))?;

        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.fetch_items(row.id).await?;
            invoices.push(row.into_invoice(items));
        }

        Ok(invoices)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, date, sub_total, total_amount, received_amount, balance_amount,
                   previous_balance, amount_in_words, discount, party_id
            FROM invoices
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch invoice: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.fetch_items(row.id).await?;

        Ok(Some(row.into_invoice(items)))
    }

    async fn find_by_party(&self, party_id: i64) -> Result<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, date, sub_total, total_amount, received_amount, balance_amount,
                   previous_balance, amount_in_words, discount, party_id
            FROM invoices
            WHERE party_id = ?
            ORDER BY id
            "#,
        )
        .bind(party_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to list party invoices: {}", e)))?;

        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.fetch_items(row.id).await?;
            invoices.push(row.into_invoice(items));
        }

        Ok(invoices)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to check invoice: {}", e)))?;

        Ok(count > 0)
    }

    async fn save_with_party(&self, invoice: &Invoice, party: &Party) -> Result<Invoice> {
        let party_id = party
            .id
            .ok_or_else(|| AppError::internal("Cannot save invoice for an unsaved party"))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        let invoice_id = match invoice.id {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE invoices
                    SET date = ?, sub_total = ?, total_amount = ?, received_amount = ?,
                        balance_amount = ?, previous_balance = ?, amount_in_words = ?,
                        discount = ?, party_id = ?
                    WHERE id = ?
                    "#,
                )
                .bind(invoice.date)
                .bind(invoice.sub_total)
                .bind(invoice.total_amount)
                .bind(invoice.received_amount)
                .bind(invoice.balance_amount)
                .bind(invoice.previous_balance)
                .bind(&invoice.amount_in_words)
                .bind(invoice.discount)
                .bind(party_id)
                .bind(id)
                .execute(tx.as_mut())
                .await
                .map_err(|e| AppError::Internal(format!("Failed to update invoice: {}", e)))?;

                // Orphan removal: the incoming list fully replaces the old one
                sqlx::query("DELETE FROM invoice_items WHERE invoice_id = ?")
                    .bind(id)
                    .execute(tx.as_mut())
                    .await
                    .map_err(|e| {
                        AppError::Internal(format!("Failed to clear invoice items: {}", e))
                    })?;

                id
            }
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO invoices (
                        date, sub_total, total_amount, received_amount, balance_amount,
                        previous_balance, amount_in_words, discount, party_id
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(invoice.date)
                .bind(invoice.sub_total)
                .bind(invoice.total_amount)
                .bind(invoice.received_amount)
                .bind(invoice.balance_amount)
                .bind(invoice.previous_balance)
                .bind(&invoice.amount_in_words)
                .bind(invoice.discount)
                .bind(party_id)
                .execute(tx.as_mut())
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create invoice: {}", e)))?;

                result.last_insert_id() as i64
            }
        };

        for item in &invoice.items {
            Self::insert_item(&mut tx, invoice_id, item).await?;
        }

        sqlx::query("UPDATE parties SET balance_amount = ? WHERE id = ?")
            .bind(party.balance_amount)
            .bind(party_id)
            .execute(tx.as_mut())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update party balance: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        // Reload so item ids reflect what was written
        self.find_by_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::internal("Invoice vanished after save"))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = ?")
            .bind(id)
            .execute(tx.as_mut())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete invoice items: {}", e)))?;

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(tx.as_mut())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete invoice: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Invoice with id '{}' not found",
                id
            )));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }
}

// Helper struct for database mapping

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: i64,
    date: Option<NaiveDate>,
    sub_total: Option<Decimal>,
    total_amount: Option<Decimal>,
    received_amount: Option<Decimal>,
    balance_amount: Option<Decimal>,
    previous_balance: Option<Decimal>,
    amount_in_words: Option<String>,
    discount: Option<Decimal>,
    party_id: i64,
}

impl InvoiceRow {
    fn into_invoice(self, items: Vec<InvoiceItem>) -> Invoice {
        Invoice {
            id: Some(self.id),
            date: self.date,
            sub_total: self.sub_total,
            total_amount: self.total_amount,
            received_amount: self.received_amount,
            balance_amount: self.balance_amount,
            previous_balance: self.previous_balance,
            amount_in_words: self.amount_in_words,
            discount: self.discount,
            party_id: Some(self.party_id),
            items,
        }
    }
}
