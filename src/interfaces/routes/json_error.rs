use actix_web::{
    web,
    http::StatusCode,
    ResponseError,
    HttpResponse,
    error::{JsonPayloadError, QueryPayloadError},
};
use serde_json::json;

const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Turns extractor failures (bad JSON bodies, bad query strings) into the
/// same `{ "error": ... }` shape the rest of the API returns.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(|err, _req| ExtractorError::from(err).into())
    );
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ExtractorError::from(err).into())
    );
}

#[derive(Debug)]
pub struct ExtractorError {
    message: String,
    status: StatusCode
}

impl std::fmt::Display for ExtractorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ExtractorError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status).json(json!({ "error": self.message }))
    }
}

impl From<JsonPayloadError> for ExtractorError {
    fn from(err: JsonPayloadError) -> Self {
        let status = match err {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };

        ExtractorError {
            message: format!("JSON payload error: {}", err),
            status,
        }
    }
}

impl From<QueryPayloadError> for ExtractorError {
    fn from(err: QueryPayloadError) -> Self {
        ExtractorError {
            message: format!("Query string error: {}", err),
            status: StatusCode::BAD_REQUEST,
        }
    }
}
