use axum::{Extension, Json, Router};
use axum::extract::Query;
use axum::routing::get;
use tracing::{info, warn};
use crate::controller::error::ApiError;
use crate::controller::google_places_api::{run_search, SearchPlacesParam, SEARCH_FAILED};
use crate::controller::AppState;
use crate::models::restaurant::RestaurantPage;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/search", get(search_restaurants))
        .route_layer(Extension(app_state))
}

pub async fn search_restaurants(
    Extension(app_state): Extension<AppState>,
    Query(query): Query<SearchPlacesParam>,
) -> Result<Json<RestaurantPage>, ApiError> {
    let search_response = run_search(&app_state, query).await?;

    if !search_response.is_ok() {
        warn!("Something went wrong searching for restaurants, upstream status: {}", search_response.status);
        return Err(ApiError::Upstream(SEARCH_FAILED));
    }

    let restaurant_page = RestaurantPage::from(search_response);
    info!("Found {} restaurants", restaurant_page.total);
    Ok(Json(restaurant_page))
}
