use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, use_cases::showcase::ShowcaseQuery, AppState};

#[instrument(skip(state))]
pub async fn list_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state, query))]
pub async fn get_showcase(
    state: web::Data<AppState>,
    query: web::Query<ShowcaseQuery>,
) -> Result<impl Responder, AppError> {
    let view = state.project_handler.showcase(&query).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[instrument(skip(state))]
pub async fn get_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project_by_id(&project_id).await?;
    Ok(HttpResponse::Ok().json(project))
}
