use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billbook::config::Config;
use billbook::invoices::controllers::invoice_controller;
use billbook::invoices::repositories::MySqlInvoiceRepository;
use billbook::invoices::services::InvoiceService;
use billbook::middleware::RequestId;
use billbook::parties::controllers::party_controller;
use billbook::parties::repositories::MySqlPartyRepository;
use billbook::parties::services::PartyService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "billbook=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Billbook invoicing backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Wire repositories and services
    let party_repo = Arc::new(MySqlPartyRepository::new(db_pool.clone()));
    let invoice_repo = Arc::new(MySqlInvoiceRepository::new(db_pool.clone()));

    let invoice_service = Arc::new(InvoiceService::new(
        invoice_repo.clone(),
        party_repo.clone(),
    ));
    let party_service = Arc::new(PartyService::new(party_repo, invoice_repo));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestId)
            .app_data(web::Data::new(invoice_service.clone()))
            .app_data(web::Data::new(party_service.clone()))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .configure(invoice_controller::configure)
                    .configure(party_controller::configure),
            )
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "billbook"
    }))
}
