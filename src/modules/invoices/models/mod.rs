mod invoice;
mod invoice_item;

pub use invoice::{CreateInvoiceRequest, Invoice, InvoiceResponse, UpdateInvoiceRequest};
pub use invoice_item::{InvoiceItem, InvoiceItemInput};
