use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::parties::models::{Party, PartyInput};
use crate::modules::parties::repositories::PartyRepository;

/// Resolves a party descriptor to a persisted party record.
///
/// Matching scans all parties and compares names case-insensitively; when
/// a record matches, it wins over the descriptor (address and contact
/// differences in the input are ignored). Otherwise a new party is
/// persisted with a zero opening balance.
///
/// The scan is O(number of parties) per invoice creation. Fine at this
/// scale; a larger deployment should switch to an indexed lookup on the
/// lower-cased name with the same match semantics.
pub struct PartyResolver {
    parties: Arc<dyn PartyRepository>,
}

impl PartyResolver {
    pub fn new(parties: Arc<dyn PartyRepository>) -> Self {
        Self { parties }
    }

    /// Find an existing party by case-insensitive name match, or create one
    pub async fn resolve(&self, input: &PartyInput) -> Result<Party> {
        if input.name.trim().is_empty() {
            return Err(AppError::validation("Party name cannot be empty"));
        }

        let existing = self
            .parties
            .find_all()
            .await?
            .into_iter()
            .find(|p| p.matches_name(&input.name));

        if let Some(party) = existing {
            return Ok(party);
        }

        let created = self
            .parties
            .save(&Party::new(
                input.name.clone(),
                input.address.clone(),
                input.contact.clone(),
            ))
            .await?;

        info!(
            party_id = created.id,
            name = %created.name,
            "Created new party"
        );

        Ok(created)
    }
}
