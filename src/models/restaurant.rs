use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use crate::models::place::{PlaceResult, SearchResponse};
use crate::repositories::google_places_repo::DEFAULT_PHOTO_MAX_WIDTH;

/// Types every listing carries, never useful as a category label.
const GENERIC_TYPES: [&str; 4] = ["restaurant", "food", "establishment", "point_of_interest"];
const FALLBACK_CATEGORY: &str = "Restaurant";

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct RestaurantCard {
    pub place_id: String,
    pub name: String,
    /// Link through the photo proxy, the direct Google link would leak the key
    pub photo_url: Option<String>,
    pub price_label: Option<String>,
    pub category: String,
    pub rating: f64,
    pub review_count: Option<u32>,
    pub vicinity: Option<String>,
    pub open_now: bool,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct RestaurantPage {
    pub restaurants: Vec<RestaurantCard>,
    pub next_page_token: Option<String>,
    pub total: usize,
}

impl From<&PlaceResult> for RestaurantCard {
    fn from(place: &PlaceResult) -> Self {
        let photo_url = place
            .photos
            .as_ref()
            .and_then(|photos| photos.first())
            .map(|photo| proxied_photo_url(&photo.photo_reference));

        Self {
            place_id: place.place_id.clone(),
            name: place.name.clone(),
            photo_url,
            price_label: place.price_level.map(price_label),
            category: primary_category(&place.types),
            rating: place.rating.unwrap_or_default(),
            review_count: place.user_ratings_total,
            vicinity: place.vicinity.clone(),
            open_now: place
                .opening_hours
                .as_ref()
                .and_then(|hours| hours.open_now)
                .unwrap_or(false),
        }
    }
}

impl From<SearchResponse> for RestaurantPage {
    fn from(search_response: SearchResponse) -> Self {
        let restaurants: Vec<RestaurantCard> = search_response
            .results
            .iter()
            .map(RestaurantCard::from)
            .collect();

        Self {
            total: restaurants.len(),
            restaurants,
            next_page_token: search_response.next_page_token,
        }
    }
}

pub fn proxied_photo_url(photo_reference: &str) -> String {
    format!(
        "/api/places/photo?reference={}&maxwidth={}",
        urlencoding::encode(photo_reference),
        DEFAULT_PHOTO_MAX_WIDTH
    )
}

/// Tier 0 is still shown as `$`.
pub fn price_label(price_level: u8) -> String {
    "$".repeat(usize::from(price_level) + 1)
}

pub fn primary_category(types: &[String]) -> String {
    types
        .iter()
        .find(|t| !GENERIC_TYPES.contains(&t.as_str()))
        .map(|t| title_case(t))
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string())
}

fn title_case(place_type: &str) -> String {
    place_type
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
