pub mod invoices;
pub mod parties;
