mod memory;
mod party_repository;

pub use memory::InMemoryPartyRepository;
pub use party_repository::{MySqlPartyRepository, PartyRepository};
