use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::user::Role;

/// Caller identity established by the bearer-auth middleware. Decoded purely
/// from token claims; no store lookup backs it.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            // Reaching a handler without the middleware having run is a wiring
            // mistake, surfaced as an ordinary 401.
            None => ready(Err(DomainError::Unauthenticated.into())),
        }
    }
}

/// Authorization on top of authentication: admin-only handlers take this
/// instead of `AuthenticatedUser`.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) if user.role == Role::Admin => ready(Ok(AdminUser(user.clone()))),
            Some(_) => ready(Err(DomainError::Forbidden.into())),
            None => ready(Err(DomainError::Unauthenticated.into())),
        }
    }
}
