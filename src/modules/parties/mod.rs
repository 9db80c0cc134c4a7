// Parties module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Party, PartyInput};
pub use repositories::{InMemoryPartyRepository, MySqlPartyRepository, PartyRepository};
pub use services::{PartyLocks, PartyResolver, PartyService};
