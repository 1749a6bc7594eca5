use actix_web::dev::HttpServiceFactory;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, delete, get, post, put, web};
use tracing::info;
use uuid::Uuid;

use crate::application::sweet_service::SweetService;
use crate::domain::error::DomainError;
use crate::infrastructure::security::JwtKeys;
use crate::presentation::dto::{
    CreateSweetRequest, MessageResponse, PurchaseResponse, SearchQuery, UpdateSweetRequest,
};
use crate::presentation::extractors::{AdminUser, AuthenticatedUser};
use crate::presentation::middleware::BearerAuthMiddleware;

pub fn scope(keys: JwtKeys) -> impl HttpServiceFactory {
    // /search has to register ahead of the {id} routes.
    web::scope("/sweets")
        .wrap(BearerAuthMiddleware::new(keys))
        .service(search_sweets)
        .service(list_sweets)
        .service(create_sweet)
        .service(purchase_sweet)
        .service(update_sweet)
        .service(delete_sweet)
}

#[get("")]
async fn list_sweets(
    _user: AuthenticatedUser,
    service: web::Data<SweetService>,
) -> Result<HttpResponse, DomainError> {
    let sweets = service.list_sweets().await?;
    Ok(HttpResponse::Ok().json(sweets))
}

#[get("/search")]
async fn search_sweets(
    _user: AuthenticatedUser,
    service: web::Data<SweetService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, DomainError> {
    let sweets = service.search_sweets(&query.q).await?;
    Ok(HttpResponse::Ok().json(sweets))
}

#[post("")]
async fn create_sweet(
    req: HttpRequest,
    admin: AdminUser,
    service: web::Data<SweetService>,
    payload: web::Json<CreateSweetRequest>,
) -> Result<HttpResponse, DomainError> {
    let sweet = service.create_sweet(payload.into_inner()).await?;

    info!(
        request_id = %request_id(&req),
        admin_id = %admin.0.id,
        sweet_id = %sweet.id,
        "sweet created"
    );

    Ok(HttpResponse::Created().json(sweet))
}

#[put("/{id}")]
async fn update_sweet(
    req: HttpRequest,
    admin: AdminUser,
    service: web::Data<SweetService>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateSweetRequest>,
) -> Result<HttpResponse, DomainError> {
    let sweet_id = path.into_inner();
    let sweet = service.update_sweet(sweet_id, payload.into_inner()).await?;

    info!(
        request_id = %request_id(&req),
        admin_id = %admin.0.id,
        sweet_id = %sweet_id,
        "sweet updated"
    );

    Ok(HttpResponse::Ok().json(sweet))
}

#[delete("/{id}")]
async fn delete_sweet(
    req: HttpRequest,
    admin: AdminUser,
    service: web::Data<SweetService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let sweet_id = path.into_inner();
    service.delete_sweet(sweet_id).await?;

    info!(
        request_id = %request_id(&req),
        admin_id = %admin.0.id,
        sweet_id = %sweet_id,
        "sweet deleted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Sweet deleted".into(),
    }))
}

#[post("/{id}/purchase")]
async fn purchase_sweet(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<SweetService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let sweet_id = path.into_inner();
    let sweet = service.purchase_sweet(sweet_id).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        sweet_id = %sweet_id,
        remaining = sweet.quantity,
        "sweet purchased"
    );

    Ok(HttpResponse::Ok().json(PurchaseResponse {
        message: "Purchase successful".into(),
        remaining_quantity: sweet.quantity,
    }))
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<crate::presentation::middleware::RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
