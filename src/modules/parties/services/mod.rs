pub mod party_locks;
pub mod party_resolver;
pub mod party_service;

pub use party_locks::PartyLocks;
pub use party_resolver::PartyResolver;
pub use party_service::PartyService;
