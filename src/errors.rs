use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::{self, ContentType}, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    InvalidInput(String),
    NotFound(String),
    TooManyRequests { message: String, retry_after: u64 },
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::TooManyRequests { message, .. } => write!(f, "{}", message),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };

        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header(ContentType::json());

        if let AppError::TooManyRequests { retry_after, .. } = self {
            builder.insert_header((header::RETRY_AFTER, retry_after.to_string()));
        }

        builder.json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // field_errors() iterates a HashMap
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// Failures of the outbound contact notification. These never reach the
/// submitter; callers log them and carry on.
#[derive(Debug, Display)]
pub enum NotifyError {
    #[display("Mail client setup failed: {_0}")]
    ClientSetup(String),

    #[display("Mail transport failed: {_0}")]
    Transport(String),

    #[display("Mail API rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl std::error::Error for NotifyError {}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Transport(err.to_string())
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use validator::ValidationError;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(AppError::ValidationError(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::TooManyRequests { message: "slow down".into(), retry_after: 3 }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(AppError::InternalError("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(AppError::from(sqlx::Error::RowNotFound), AppError::NotFound(_)));
    }

    #[test]
    fn validation_errors_keep_field_names_and_messages() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("Name is required".into());
        errors.add("name", err);

        match AppError::from(errors) {
            AppError::ValidationError(fields) => {
                assert_eq!(fields, vec![FieldError {
                    field: "name".into(),
                    message: "Name is required".into(),
                }]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[actix_rt::test]
    async fn too_many_requests_sets_retry_after_header() {
        let resp = AppError::TooManyRequests { message: "slow down".into(), retry_after: 42 }
            .error_response();

        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap(), "42");

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "slow down");
    }
}
