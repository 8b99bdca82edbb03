use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;
use utoipa::OpenApi; // needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::docs::ApiDoc;
use crate::routes;
use crate::service::Services;
use crate::store::RecordStore;

/// Binds and runs the HTTP server until shutdown. The store is closed on every
/// exit path, including a failed bind.
pub async fn run(config: &Config, store: Arc<dyn RecordStore>) -> Result<()> {
    let services = Services::new(store.clone());
    let cors_origins = config.cors_origins.clone();

    let bound = HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard so JS/CSS assets resolve
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .configure(|cfg| routes::configure(cfg, &services))
    })
    .bind(&config.server_addr);

    let result = match bound {
        Ok(server) => {
            info!(addr = %config.server_addr, "Listening");
            server.run().await.context("HTTP server failed")
        }
        Err(e) => Err(e).with_context(|| format!("Failed to bind {}", config.server_addr)),
    };

    store.close().await;
    info!("Server stopped");
    result
}
