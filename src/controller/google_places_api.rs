use axum::{Extension, Json, Router};
use axum::extract::{Path, Query};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::controller::error::ApiError;
use crate::controller::AppState;
use crate::models::place::{PlaceDetails, SearchResponse};
use crate::repositories::google_places_repo::{
    FreshSearch, SearchRequest, DEFAULT_PHOTO_MAX_WIDTH,
};

pub const SEARCH_FAILED: &str = "Failed to fetch data from Google Places API";
pub const DETAILS_FAILED: &str = "Failed to fetch place details from Google Places API";
pub const PHOTO_FAILED: &str = "Failed to fetch photo from Google Places API";

pub const PHOTO_CACHE_CONTROL: &str = "public, max-age=86400";

const DEFAULT_QUERY: &str = "restaurant";
const DEFAULT_TYPE: &str = "restaurant";
const DEFAULT_RADIUS_METERS: u32 = 5000;
const MAX_PRICE_TIER: u8 = 4;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/search", get(search_places))
        .route("/details", get(missing_place_id))
        .route("/details/", get(missing_place_id))
        .route("/details/:id", get(place_details))
        .route("/photo", get(place_photo))
        .route_layer(Extension(app_state))
}

/// Raw search query string. Everything stays a string so malformed numbers
/// surface as a 400 from validation rather than an extractor rejection.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct SearchPlacesParam {
    pub query: Option<String>,
    pub location: Option<String>,
    pub r#type: Option<String>,
    pub minprice: Option<String>,
    pub maxprice: Option<String>,
    pub opennow: Option<String>,
    pub radius: Option<String>,
    pub pagetoken: Option<String>,
}

impl SearchPlacesParam {
    pub fn into_search_request(self) -> Result<SearchRequest, ApiError> {
        let location = non_empty(self.location.clone());
        let page_token = non_empty(self.pagetoken.clone());

        if let Some(page_token) = page_token {
            let ignored = self.ignored_filters();
            if !ignored.is_empty() {
                warn!(
                    "Ignoring filters {:?} on a continued search, they are bound to the original query",
                    ignored
                );
            }
            return Ok(SearchRequest::Continued { page_token });
        }

        let location = location.ok_or_else(|| {
            ApiError::bad_request("Either location parameter or pagetoken is required")
        })?;

        let query = non_empty(self.query).unwrap_or_else(|| DEFAULT_QUERY.to_string());
        let radius = match non_empty(self.radius) {
            Some(radius) => parse_radius(&radius)?,
            None => DEFAULT_RADIUS_METERS,
        };

        Ok(SearchRequest::Fresh(FreshSearch {
            query: format!("{} in {}", query, location),
            r#type: Some(non_empty(self.r#type).unwrap_or_else(|| DEFAULT_TYPE.to_string())),
            min_price: parse_price_tier("minprice", non_empty(self.minprice))?,
            max_price: parse_price_tier("maxprice", non_empty(self.maxprice))?,
            open_now: self.opennow.as_deref() == Some("true"),
            radius: Some(radius),
        }))
    }

    fn ignored_filters(&self) -> Vec<&'static str> {
        [
            ("query", &self.query),
            ("location", &self.location),
            ("type", &self.r#type),
            ("minprice", &self.minprice),
            ("maxprice", &self.maxprice),
            ("opennow", &self.opennow),
            ("radius", &self.radius),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_price_tier(name: &str, value: Option<String>) -> Result<Option<u8>, ApiError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.trim().parse::<u8>() {
        Ok(tier) if tier <= MAX_PRICE_TIER => Ok(Some(tier)),
        _ => Err(ApiError::bad_request(format!(
            "{} must be a price tier between 0 and {}",
            name, MAX_PRICE_TIER
        ))),
    }
}

fn parse_radius(value: &str) -> Result<u32, ApiError> {
    match value.trim().parse::<u32>() {
        Ok(radius) if radius > 0 => Ok(radius),
        _ => Err(ApiError::bad_request("radius must be a positive number of meters")),
    }
}

/// Validates and runs a text search. Shared with the restaurant card listing.
pub async fn run_search(
    app_state: &AppState,
    query: SearchPlacesParam,
) -> Result<SearchResponse, ApiError> {
    let places_repo = app_state
        .places_repo()
        .map_err(|e| ApiError::from_places(e, SEARCH_FAILED))?;
    let search_request = query.into_search_request()?;

    places_repo
        .search(&search_request)
        .await
        .map_err(|e| ApiError::from_places(e, SEARCH_FAILED))
}

pub async fn search_places(
    Extension(app_state): Extension<AppState>,
    Query(query): Query<SearchPlacesParam>,
) -> Result<Json<SearchResponse>, ApiError> {
    run_search(&app_state, query).await.map(Json)
}

pub async fn place_details(
    Extension(app_state): Extension<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<PlaceDetails>, ApiError> {
    let places_repo = app_state
        .places_repo()
        .map_err(|e| ApiError::from_places(e, DETAILS_FAILED))?;

    let place_id = place_id.trim();
    if place_id.is_empty() {
        return Err(ApiError::bad_request("Place ID is required"));
    }

    places_repo
        .get_details(place_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_places(e, DETAILS_FAILED))
}

pub async fn missing_place_id(
    Extension(app_state): Extension<AppState>,
) -> ApiError {
    match app_state.places_repo() {
        Ok(_) => ApiError::bad_request("Place ID is required"),
        Err(e) => ApiError::from_places(e, DETAILS_FAILED),
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct PlacePhotoParam {
    pub reference: Option<String>,
    pub maxwidth: Option<String>,
}

pub async fn place_photo(
    Extension(app_state): Extension<AppState>,
    Query(query): Query<PlacePhotoParam>,
) -> Result<Response, ApiError> {
    let reference = non_empty(query.reference)
        .ok_or_else(|| ApiError::bad_request("Photo reference is required"))?;

    let max_width = match non_empty(query.maxwidth) {
        Some(width) => match width.trim().parse::<u32>() {
            Ok(width) if width > 0 => width,
            _ => return Err(ApiError::bad_request("maxwidth must be a positive number")),
        },
        None => DEFAULT_PHOTO_MAX_WIDTH,
    };

    let places_repo = app_state
        .places_repo()
        .map_err(|e| ApiError::from_places(e, PHOTO_FAILED))?;

    let photo = places_repo
        .fetch_photo(&reference, max_width)
        .await
        .map_err(|e| ApiError::from_places(e, PHOTO_FAILED))?;
    info!("Proxied place photo of {} bytes at maxwidth {}", photo.bytes.len(), max_width);

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, photo.content_type),
            (CACHE_CONTROL, PHOTO_CACHE_CONTROL.to_string()),
        ],
        photo.bytes,
    ).into_response())
}
