use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::parties::services::PartyService;

/// List all parties
/// GET /parties
pub async fn list_parties(
    service: web::Data<Arc<PartyService>>,
) -> Result<HttpResponse, AppError> {
    let parties = service.list_parties().await?;

    Ok(HttpResponse::Ok().json(parties))
}

/// List invoices billed against one party
/// GET /parties/{id}/invoices
pub async fn list_party_invoices(
    service: web::Data<Arc<PartyService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let party_id = path.into_inner();
    let invoices = service.list_invoices_for_party(party_id).await?;

    Ok(HttpResponse::Ok().json(invoices))
}

/// Configure party routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/parties")
            .route("", web::get().to(list_parties))
            .route("/{id}/invoices", web::get().to(list_party_invoices)),
    );
}
