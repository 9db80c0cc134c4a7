//! Billbook Invoicing Backend Library
//!
//! Manages billing parties and invoices composed of line items, deriving
//! subtotal, discount, running balance and total amount. Each invoice
//! snapshots the party's balance and replaces it with its own trailing
//! balance after payment.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::invoices;
pub use modules::parties;
