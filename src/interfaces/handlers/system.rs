use actix_web::{web, get, HttpResponse, Responder};
use humantime::format_duration;
use chrono::Utc;
use std::time::Duration;
use serde::Serialize;

use crate::{constants::START_TIME, repositories::notifier::NotificationService, AppState};

#[derive(Serialize, Clone, Default)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    version: String,
    store: String,
    database: String,
    email: String,
}

async fn build_health_response(state: &web::Data<AppState>) -> HealthCheckResponse {
    let now_utc = Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let db_status = match state.check_store().await {
        Ok(_) => "OK",
        Err(e) => {
            tracing::warn!("Health check: store unavailable: {}", e);
            "Unavailable"
        }
    };

    let email_status = if state.contact_handler.notifier.is_enabled() {
        "Enabled"
    } else {
        "Not configured"
    };

    HealthCheckResponse {
        status: if db_status == "OK" { "healthy" } else { "degraded" }.to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store_backend.to_string(),
        database: db_status.to_string(),
        email: email_status.to_string(),
    }
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let response = build_health_response(&state).await;

    if response.database == "OK" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
