use super::error::ApiError;
use crate::service::AppState;
use axum::extract::rejection::{QueryRejection, StringRejection};
use axum::extract::{Query, State};
use axum::Json;
use remote_helper_extractor_prelude::LinkSet;

#[derive(Debug, serde::Deserialize)]
pub struct FetchParams {
    pub url: String,
}

/// Sorted so that clients get a stable list. Empty is a valid answer.
#[derive(Debug, serde::Serialize)]
pub struct LinksResponse {
    pub links: Vec<String>,
}

impl From<LinkSet> for LinksResponse {
    fn from(value: LinkSet) -> Self {
        Self {
            links: value.into_sorted(),
        }
    }
}

pub async fn fetch_handler(
    State(state): State<AppState>,
    params: Result<Query<FetchParams>, QueryRejection>,
) -> Result<Json<LinksResponse>, ApiError> {
    let Query(params) = params?;
    tracing::debug!("GET /api/links params={params:?}");
    let links = state.links.fetch(&params.url).await?;
    Ok(Json(links.into()))
}

/// Body is the markup of a page already loaded by the client.
pub async fn extract_handler(
    State(state): State<AppState>,
    body: Result<String, StringRejection>,
) -> Result<Json<LinksResponse>, ApiError> {
    let body = body?;
    tracing::debug!("POST /api/links with {} bytes", body.len());
    Ok(Json(state.links.extract(body.as_str()).into()))
}
