use axum::{Extension, Json, Router};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, warn};
use crate::controller::AppState;
use crate::models::reservation::{time_slots, ReservationRequest};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", post(add_reservation))
        .route("/slots", get(get_time_slots))
        .route_layer(Extension(app_state))
}

pub async fn get_time_slots() -> impl IntoResponse {
    Json(time_slots())
}

/// Simulated booking: validates, waits like a real backend would, and hands
/// back the confirmation page to redirect to. Nothing is persisted.
pub async fn add_reservation(
    Extension(app_state): Extension<AppState>,
    Json(body): Json<ReservationRequest>,
) -> impl IntoResponse {
    let today = OffsetDateTime::now_utc().date();

    return match body.confirm(today) {
        Ok(confirmation) => {
            tokio::time::sleep(app_state.reservation_delay).await;
            info!(
                "Confirmed mock reservation at {} for {} on {} {}",
                confirmation.place_id,
                confirmation.party_size,
                confirmation.date,
                confirmation.time
            );
            (StatusCode::OK, Json(json!(confirmation))).into_response()
        }
        Err(e) => {
            warn!("Rejected reservation for {} due to: {}", body.place_id, e);
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e }))).into_response()
        }
    };
}
