use super::error::ApiError;
use crate::service::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use remote_helper_site_manager::ResourceSite;

#[derive(Debug, serde::Deserialize)]
pub struct CreateSite {
    pub link: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct ImportSites {
    /// Appended at the end when missing.
    pub index: Option<usize>,
    pub links: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

#[derive(Debug, serde::Deserialize)]
pub struct ReorderSites {
    pub from: usize,
    pub to: usize,
}

pub async fn list_handler(State(state): State<AppState>) -> Json<Vec<ResourceSite>> {
    Json(state.sites.list().await)
}

pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateSite>, JsonRejection>,
) -> Result<(StatusCode, Json<ResourceSite>), ApiError> {
    let Json(payload) = payload?;
    let site = state.sites.add(payload.link.as_str()).await?;
    Ok((StatusCode::CREATED, Json(site)))
}

pub async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportSites>, JsonRejection>,
) -> Result<Json<ImportResponse>, ApiError> {
    let Json(payload) = payload?;
    let index = payload.index.unwrap_or(usize::MAX);
    let imported = state.sites.import(index, payload.links).await?;
    Ok(Json(ImportResponse { imported }))
}

pub async fn reorder_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReorderSites>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    state.sites.reorder(payload.from, payload.to).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_handler(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> Result<Json<ResourceSite>, ApiError> {
    let Path(index) = index?;
    let site = state.sites.remove(index).await?;
    Ok(Json(site))
}
