pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;

use actix_web::HttpRequest;

use crate::domain::error::DomainError;

/// Recovers malformed/missing-field JSON bodies into the same `{"error": ...}`
/// shape every other failure uses.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    DomainError::Validation(err.to_string()).into()
}
