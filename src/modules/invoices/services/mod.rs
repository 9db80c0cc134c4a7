pub mod invoice_calculator;
pub mod invoice_service;

pub use invoice_calculator::InvoiceCalculator;
pub use invoice_service::InvoiceService;
