use actix_web::{http::StatusCode, HttpResponse};
use log::*;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            // Checkout precondition failures are answered with 400, like bad input.
            DomainError::Validation(_)
            | DomainError::AddressNotFound
            | DomainError::EmptyCart
            | DomainError::AlreadyCancelled
            | DomainError::InvalidTransition { .. } => AppError::BadRequest(e.to_string()),
            DomainError::CartItemNotFound | DomainError::OrderNotFound => {
                AppError::NotFound(e.to_string())
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Internal(detail) => {
                error!("Request failed: {detail}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
            _ => HttpResponse::build(self.status_code()).json(serde_json::json!({
                "error": self.to_string()
            })),
        }
    }
}

/// Turns JSON extractor failures (malformed body, wrong field types) into the
/// same `{"error": ...}` body as every other 400.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    debug!("Rejected request body: {err}");
    AppError::BadRequest(format!("Invalid request body: {err}")).into()
}

pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    debug!("Rejected path parameter: {err}");
    AppError::BadRequest(format!("Invalid path parameter: {err}")).into()
}

pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    debug!("Rejected query string: {err}");
    AppError::BadRequest(format!("Invalid query string: {err}")).into()
}
