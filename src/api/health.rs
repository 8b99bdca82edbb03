use actix_web::{HttpResponse, Responder, get};
use serde_json::json;

#[utoipa::path(get, path = "/", responses((status = 200, description = "Service info")), tag = "Health")]
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Welcome to HRMS Lite API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "employees": "/employees",
            "attendance": "/attendance",
            "docs": "/swagger-ui/"
        }
    }))
}

#[utoipa::path(get, path = "/health", responses((status = 200, description = "Service is up")), tag = "Health")]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}
