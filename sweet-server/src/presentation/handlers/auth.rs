use actix_web::{HttpResponse, Scope, post, web};
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

pub fn scope() -> Scope {
    web::scope("/auth").service(register).service(login)
}

#[post("/register")]
async fn register(
    service: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, DomainError> {
    let RegisterRequest {
        email,
        password,
        role,
    } = payload.into_inner();

    let (user, token) = service
        .register(email, password, role.unwrap_or_default())
        .await?;

    info!(user_id = %user.id, role = %user.role, "user registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        user: UserResponse::from(user),
        token,
    }))
}

#[post("/login")]
async fn login(
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, DomainError> {
    let (user, token) = service.login(&payload.email, &payload.password).await?;

    info!(user_id = %user.id, "user logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: UserResponse::from(user),
        token,
    }))
}
