use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;

/// Registry of per-party async locks.
///
/// Create and update both snapshot the party's balance and write the new
/// trailing balance back. Two overlapping requests against the same party
/// would read the same snapshot and the loser's balance update would be
/// overwritten. Holding the party's lock across resolve, compute and
/// persist serializes those writes within this process.
///
/// Keys are the lower-cased party name, the same key resolution matches on.
pub struct PartyLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl PartyLocks {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Lock handle for the given party name; one handle per normalized name
    pub fn lock_for(&self, name: &str) -> Arc<AsyncMutex<()>> {
        let key = name.to_lowercase();
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(key)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

impl Default for PartyLocks {
    fn default() -> Self {
        Self::new()
    }
}
