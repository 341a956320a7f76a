use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
use crate::repositories::google_places_repo::PlacesError;

#[derive(Debug, PartialEq)]
pub enum ApiError {
    /// The places credential is not configured
    MissingApiKey,

    BadRequest(String),

    /// Upstream failure. Holds the route's generic message only, the upstream
    /// detail is logged where the failure is caught.
    Upstream(&'static str),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    /// Logs the upstream detail and hides it behind `generic_message`.
    pub fn from_places(err: PlacesError, generic_message: &'static str) -> Self {
        match err {
            PlacesError::MissingApiKey => ApiError::MissingApiKey,
            err => {
                error!("{}: {}", generic_message, err);
                ApiError::Upstream(generic_message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                PlacesError::MissingApiKey.to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_detail_is_not_kept() {
        let err = ApiError::from_places(
            PlacesError::Upstream { status: 403, reason: "Forbidden".to_string() },
            "Failed to fetch data from Google Places API",
        );
        assert_eq!(err, ApiError::Upstream("Failed to fetch data from Google Places API"));
    }

    #[test]
    fn missing_key_stays_a_configuration_error() {
        let err = ApiError::from_places(PlacesError::MissingApiKey, "ignored");
        assert_eq!(err, ApiError::MissingApiKey);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let response = ApiError::bad_request("Photo reference is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
