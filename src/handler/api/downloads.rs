use super::error::ApiError;
use crate::service::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

#[derive(Debug, serde::Deserialize)]
pub struct DownloadRequest {
    pub link: String,
}

#[derive(Debug, serde::Serialize)]
pub struct DownloadResponse {
    pub agent: &'static str,
}

pub async fn handler(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let Json(payload) = payload?;
    tracing::debug!("POST /api/downloads link={:?}", payload.link);
    let agent = state.downloads.dispatch(payload.link.as_str()).await?;
    Ok(Json(DownloadResponse { agent }))
}
