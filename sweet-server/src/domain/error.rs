use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Closed set of failures the service can produce. The boundary resolves each
/// kind to a status by exhaustive matching, never by inspecting message text.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("User already exists")]
    AlreadyExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Access denied. No token provided.")]
    Unauthenticated,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Access denied. Admins only.")]
    Forbidden,
    #[error("Sweet not found")]
    NotFound,
    #[error("Out of stock")]
    OutOfStock,
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_)
            | DomainError::AlreadyExists
            | DomainError::OutOfStock => StatusCode::BAD_REQUEST,
            DomainError::InvalidCredentials | DomainError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            DomainError::InvalidToken | DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Infrastructure detail stays in the logs, not in the response.
        let message = match self {
            DomainError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: message.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn statuses_follow_the_fixed_mapping() {
        assert_eq!(
            DomainError::Validation("name must not be empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(DomainError::AlreadyExists.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(DomainError::OutOfStock.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            DomainError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            DomainError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(DomainError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(DomainError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(DomainError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            DomainError::Internal("db down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_detail_is_not_leaked() {
        let response = DomainError::Internal("connection refused at 10.0.0.3".into())
            .error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("internal server error"));
        assert!(!text.contains("10.0.0.3"));
    }

    #[actix_web::test]
    async fn body_carries_the_error_field() {
        let response = DomainError::OutOfStock.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Out of stock");
    }
}
