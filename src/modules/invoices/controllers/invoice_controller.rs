use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::invoices::models::{CreateInvoiceRequest, UpdateInvoiceRequest};
use crate::modules::invoices::services::InvoiceService;

/// List all invoices
/// GET /invoices
pub async fn list_invoices(
    service: web::Data<Arc<InvoiceService>>,
) -> Result<HttpResponse, AppError> {
    let invoices = service.list_invoices().await?;

    Ok(HttpResponse::Ok().json(invoices))
}

/// Get invoice by ID
/// GET /invoices/{id}
pub async fn get_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let invoice_id = path.into_inner();

    match service.get_invoice(invoice_id).await? {
        Some(invoice) => Ok(HttpResponse::Ok().json(invoice)),
        None => Err(AppError::not_found(format!(
            "Invoice with id '{}' not found",
            invoice_id
        ))),
    }
}

/// Create a new invoice with its party
/// POST /invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.create_invoice(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Update an existing invoice
/// PUT /invoices/{id}
pub async fn update_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<i64>,
    request: web::Json<UpdateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice_id = path.into_inner();
    let invoice = service
        .update_invoice(invoice_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Delete an invoice
/// DELETE /invoices/{id}
pub async fn delete_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let invoice_id = path.into_inner();
    service.delete_invoice(invoice_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::get().to(list_invoices))
            .route("", web::post().to(create_invoice))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}", web::put().to(update_invoice))
            .route("/{id}", web::delete().to(delete_invoice)),
    );
}
