use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("malformed timestamp in log line: {0:?}")]
    MalformedTimestamp(String),
    #[error("log file has no usable lines")]
    EmptyDocument,
    #[error("log lines out of order at line {0}")]
    OutOfOrder(usize),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedTimestamp(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyDocument => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::OutOfOrder(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
