pub mod auth;
pub mod sweets;

use actix_web::{HttpResponse, Responder, get};
use serde_json::json;

#[get("/")]
pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Welcome to Sweet Shop API" }))
}
