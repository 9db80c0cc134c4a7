// In-memory party repository
//
// Backs the integration and contract tests; id assignment mirrors the
// AUTO_INCREMENT behavior of the MySQL implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::Result;
use crate::modules::parties::models::Party;
use crate::modules::parties::repositories::PartyRepository;

#[derive(Default)]
struct State {
    parties: HashMap<i64, Party>,
    next_id: i64,
}

/// In-memory implementation of [`PartyRepository`]
#[derive(Default)]
pub struct InMemoryPartyRepository {
    state: Mutex<State>,
}

impl InMemoryPartyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PartyRepository for InMemoryPartyRepository {
    async fn find_all(&self) -> Result<Vec<Party>> {
        let state = self.state.lock().await;
        let mut parties: Vec<Party> = state.parties.values().cloned().collect();
        parties.sort_by_key(|p| p.id);
        Ok(parties)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Party>> {
        let state = self.state.lock().await;
        Ok(state.parties.get(&id).cloned())
    }

    async fn save(&self, party: &Party) -> Result<Party> {
        let mut state = self.state.lock().await;

        let mut saved = party.clone();
        let id = match saved.id {
            Some(id) => id,
            None => {
                state.next_id += 1;
                let id = state.next_id;
                saved.id = Some(id);
                id
            }
        };
        state.parties.insert(id, saved.clone());

        Ok(saved)
    }
}
