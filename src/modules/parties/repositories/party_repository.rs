// PartyRepository: store interface and MySQL implementation
//
// Parties are inserted on first resolution and updated whenever an
// invoice against them is created or updated. Invoice operations never
// delete a party.

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::parties::models::Party;

/// Store interface for party records
#[async_trait]
pub trait PartyRepository: Send + Sync {
    /// All parties, in no particular order
    async fn find_all(&self) -> Result<Vec<Party>>;

    /// Find a party by its surrogate id
    async fn find_by_id(&self, id: i64) -> Result<Option<Party>>;

    /// Insert or update a party, returning the record with its assigned id
    async fn save(&self, party: &Party) -> Result<Party>;
}

/// MySQL-backed party repository
pub struct MySqlPartyRepository {
    pool: MySqlPool,
}

impl MySqlPartyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartyRepository for MySqlPartyRepository {
    async fn find_all(&self) -> Result<Vec<Party>> {
        let parties = sqlx::query_as::<_, Party>(
            r#"
            SELECT id, name, address, contact, balance_amount
            FROM parties
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to list parties: {}", e)))?;

        Ok(parties)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Party>> {
        let party = sqlx::query_as::<_, Party>(
            r#"
            SELECT id, name, address, contact, balance_amount
            FROM parties
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch party: {}", e)))?;

        Ok(party)
    }

    async fn save(&self, party: &Party) -> Result<Party> {
        match party.id {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE parties
                    SET name = ?, address = ?, contact = ?, balance_amount = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&party.name)
                .bind(&party.address)
                .bind(&party.contact)
                .bind(party.balance_amount)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to update party: {}", e)))?;

                Ok(party.clone())
            }
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO parties (name, address, contact, balance_amount)
                    VALUES (?, ?, ?, ?)
                    "#,
                )
                .bind(&party.name)
                .bind(&party.address)
                .bind(&party.contact)
                .bind(party.balance_amount)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create party: {}", e)))?;

                let mut created = party.clone();
                created.id = Some(result.last_insert_id() as i64);

                Ok(created)
            }
        }
    }
}
