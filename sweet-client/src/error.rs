use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweetClientError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Not found")]
    NotFound,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Server error: {0}")]
    ServerError(String),
    #[error("Token store error: {0}")]
    TokenStore(#[from] std::io::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl SweetClientError {
    pub(crate) async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let message = resp
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());

        match status {
            reqwest::StatusCode::UNAUTHORIZED => SweetClientError::Unauthorized,
            reqwest::StatusCode::FORBIDDEN => SweetClientError::Forbidden,
            reqwest::StatusCode::NOT_FOUND => SweetClientError::NotFound,
            reqwest::StatusCode::BAD_REQUEST => SweetClientError::InvalidRequest(message),
            _ => SweetClientError::ServerError(message),
        }
    }
}
