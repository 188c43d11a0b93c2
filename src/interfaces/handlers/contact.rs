use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact::{NewContactForm, UpdateContactStatusRequest},
    errors::AppError,
    limiter::rate_limiter::RateDecision,
    utils::get_client_ip::get_client_ip,
    AppState,
};

fn throttled(decision: RateDecision, message: &str) -> Result<(), AppError> {
    if decision.allowed {
        return Ok(());
    }
    Err(AppError::TooManyRequests {
        message: message.to_string(),
        retry_after: decision.retry_after_secs.unwrap_or(1),
    })
}

#[instrument(skip(req, state, form))]
pub async fn create_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<NewContactForm>,
) -> Result<impl Responder, AppError> {
    // Rejected forms must not count against either limit
    form.check()?;

    let client_ip = get_client_ip(&req, state.trust_forwarded_for);
    throttled(
        state.submission_limiter.per_ip.check(&format!("rl:ip:{}", client_ip)),
        "Too many messages from this address. Please try again later.",
    )?;

    // Normalize and URL-encode so the limiter key stays unambiguous
    let email_norm = form.email.trim().to_lowercase();
    if !email_norm.is_empty() {
        let email_key = format!("rl:email:{}", urlencoding::encode(&email_norm));
        throttled(
            state.submission_limiter.per_email.check(&email_key),
            "Too many messages from this email address. Please try again later.",
        )?;
    }

    let response = state.contact_handler
        .create_contact_message(form.into_inner())
        .await?;

    tracing::info!(contact_id = %response.contact_id, "Contact message received");

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state))]
pub async fn list_contacts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let contacts = state.contact_handler.list_contact_messages().await?;
    Ok(HttpResponse::Ok().json(contacts))
}

#[instrument(skip(state))]
pub async fn get_contact(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let contact = state.contact_handler
        .get_contact_message_by_id(&contact_id)
        .await?;

    Ok(HttpResponse::Ok().json(contact))
}

#[instrument(skip(state, data))]
pub async fn update_contact_status(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateContactStatusRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.contact_handler
        .update_contact_status(&contact_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}
