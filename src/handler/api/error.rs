use crate::service::download::DispatchError;
use crate::service::fetcher::FetchError;
use crate::service::listing::ServiceError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection, StringRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use remote_helper_site_manager::SiteError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unprocessable(String),
    BadGateway(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.as_str()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.as_str()),
            Self::Unprocessable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable", msg.as_str())
            }
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg.as_str()),
            Self::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable", msg.as_str())
            }
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg.as_str()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();
        if status.is_server_error() {
            tracing::warn!("{error}: {message}");
        }
        let body = Json(serde_json::json!({
            "error": error,
            "message": message,
        }));
        (status, body).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(value: FetchError) -> Self {
        Self::BadGateway(value.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Fetch(inner) => inner.into(),
            ServiceError::Extract(inner) => Self::Unprocessable(inner.to_string()),
        }
    }
}

impl From<SiteError> for ApiError {
    fn from(value: SiteError) -> Self {
        match value {
            SiteError::InvalidLink { .. } => Self::BadRequest(value.to_string()),
            SiteError::NotFound { .. } => Self::NotFound(value.to_string()),
            SiteError::UnableToLoad { .. } | SiteError::UnableToSave { .. } => {
                Self::Internal(value.to_string())
            }
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(value: DispatchError) -> Self {
        match value {
            DispatchError::UnsupportedLink { .. } => Self::Unprocessable(value.to_string()),
            DispatchError::NoDownloader { .. } => Self::Unavailable(value.to_string()),
            DispatchError::UnableToQuery { .. } | DispatchError::Rejected { .. } => {
                Self::BadGateway(value.to_string())
            }
        }
    }
}

macro_rules! bad_request_from {
    ($($rejection:ty),+) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(value: $rejection) -> Self {
                    Self::BadRequest(value.body_text())
                }
            }
        )+
    };
}

bad_request_from!(JsonRejection, PathRejection, QueryRejection, StringRejection);
