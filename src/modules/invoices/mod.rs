// Invoices module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{
    CreateInvoiceRequest, Invoice, InvoiceItem, InvoiceItemInput, InvoiceResponse,
    UpdateInvoiceRequest,
};
pub use repositories::{InMemoryInvoiceRepository, InvoiceRepository, MySqlInvoiceRepository};
pub use services::{InvoiceCalculator, InvoiceService};
