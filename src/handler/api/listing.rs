use super::error::ApiError;
use crate::service::listing::ListingResult;
use crate::service::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use remote_helper_extractor_prelude::{Page, PageEntry, SourceEncoding};

#[derive(Debug, serde::Deserialize)]
pub struct PageParams {
    pub url: String,
    #[serde(default)]
    pub encoding: SourceEncoding,
}

#[derive(Debug, serde::Deserialize)]
pub struct WalkParams {
    pub url: String,
    #[serde(default)]
    pub encoding: SourceEncoding,
    pub max_pages: Option<usize>,
}

#[derive(Debug, serde::Serialize)]
pub struct PageResponse {
    pub source_url: String,
    pub entries: Vec<PageEntry>,
    pub next_page_url: Option<String>,
    pub is_last_page: bool,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        let source_url = page.source_url().to_string();
        let next_page_url = page.next_page_url().map(String::from);
        let is_last_page = page.is_last_page();
        Self {
            source_url,
            entries: page.into_entries(),
            next_page_url,
            is_last_page,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct WalkResponse {
    pub entries: Vec<PageEntry>,
    pub next_page_url: Option<String>,
    pub pages: usize,
    pub errors: Vec<String>,
}

impl From<ListingResult> for WalkResponse {
    fn from(result: ListingResult) -> Self {
        Self {
            entries: result.entries,
            next_page_url: result.next_page_url,
            pages: result.pages,
            errors: result.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

pub async fn handler(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PageResponse>, ApiError> {
    let Query(params) = params?;
    tracing::debug!("GET /api/listing params={params:?}");
    let page = state.listing.page(&params.url, params.encoding).await?;
    Ok(Json(page.into()))
}

pub async fn walk_handler(
    State(state): State<AppState>,
    params: Result<Query<WalkParams>, QueryRejection>,
) -> Result<Json<WalkResponse>, ApiError> {
    let Query(params) = params?;
    tracing::debug!("GET /api/listing/all params={params:?}");
    let result = state
        .listing
        .walk(&params.url, params.encoding, params.max_pages)
        .await;
    Ok(Json(result.into()))
}
