use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_with::skip_serializing_none;
use thiserror::Error;
use tracing::{debug, warn};
use crate::models::place::{DetailsResponse, PlaceDetails, SearchResponse};

pub const GOOGLE_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const API_KEY_SETTING: &str = "GOOGLE_MAPS_API_KEY";
pub const DEFAULT_PHOTO_MAX_WIDTH: u32 = 400;
pub const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// Soft freshness hint for search and details lookups, one hour.
pub const UPSTREAM_FRESHNESS_HINT: &str = "max-age=3600";

const DETAILS_FIELDS: &str = "name,formatted_address,formatted_phone_number,\
    international_phone_number,website,rating,user_ratings_total,price_level,vicinity,\
    types,opening_hours,reviews,photos,url";

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("GOOGLE_MAPS_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("Google Places API error: {status} {reason}")]
    Upstream { status: u16, reason: String },

    #[error("Google Places API returned status {status}: {message}")]
    Status { status: String, message: String },

    #[error("Google Places API request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl PlacesError {
    fn from_status(status: StatusCode) -> Self {
        PlacesError::Upstream {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

/// Read-only settings shared by every request, taken from the startup config.
#[derive(Clone, Debug)]
pub struct PlacesSettings {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl PlacesSettings {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FreshSearch {
    pub query: String,
    pub r#type: Option<String>,
    pub min_price: Option<u8>,
    pub max_price: Option<u8>,
    pub open_now: bool,
    pub radius: Option<u32>,
}

/// A text search is either a new query or the next page of an earlier one.
/// Google binds filters to the original query, so a continuation carries
/// nothing but its token.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchRequest {
    Fresh(FreshSearch),
    Continued { page_token: String },
}

#[skip_serializing_none]
#[derive(Serialize, Debug)]
struct TextSearchParams<'a> {
    query: Option<&'a str>,
    r#type: Option<&'a str>,
    minprice: Option<u8>,
    maxprice: Option<u8>,
    opennow: Option<bool>,
    radius: Option<u32>,
    pagetoken: Option<&'a str>,
    key: &'a str,
}

impl<'a> TextSearchParams<'a> {
    fn new(request: &'a SearchRequest, key: &'a str) -> Self {
        match request {
            SearchRequest::Fresh(search) => Self {
                query: Some(&search.query),
                r#type: search.r#type.as_deref(),
                minprice: search.min_price,
                maxprice: search.max_price,
                opennow: search.open_now.then_some(true),
                radius: search.radius,
                pagetoken: None,
                key,
            },
            SearchRequest::Continued { page_token } => Self {
                query: None,
                r#type: None,
                minprice: None,
                maxprice: None,
                opennow: None,
                radius: None,
                pagetoken: Some(page_token),
                key,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct PhotoData {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

pub struct GooglePlacesRepo {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GooglePlacesRepo {
    pub fn new(
        settings: &PlacesSettings,
        http_client: Client,
    ) -> Result<Self, PlacesError> {
        let api_key = match settings.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(PlacesError::MissingApiKey),
        };

        Ok(Self {
            http_client,
            api_key,
            base_url: settings.base_url.clone(),
        })
    }

    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse, PlacesError> {
        let params = TextSearchParams::new(request, &self.api_key);
        let url = format!("{}/textsearch/json", self.base_url);

        let res = self.http_client
            .get(&url)
            .query(&params)
            .header(CACHE_CONTROL, UPSTREAM_FRESHNESS_HINT)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach places text search due to: {}", e);
                PlacesError::from(e)
            })?;

        if !res.status().is_success() {
            let err = PlacesError::from_status(res.status());
            warn!("Error searching places: {}", err);
            return Err(err);
        }

        let search_response = res.json::<SearchResponse>().await.map_err(|e| {
            warn!("Failed to parse places search response due to: {}", e);
            PlacesError::from(e)
        })?;
        debug!(
            "Places search returned {} results with status {}",
            search_response.results.len(),
            search_response.status
        );
        Ok(search_response)
    }

    pub async fn get_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetails, PlacesError> {
        let url = format!("{}/details/json", self.base_url);

        let res = self.http_client
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("fields", DETAILS_FIELDS),
                ("key", self.api_key.as_str()),
            ])
            .header(CACHE_CONTROL, UPSTREAM_FRESHNESS_HINT)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach place details for {} due to: {}", place_id, e);
                PlacesError::from(e)
            })?;

        if !res.status().is_success() {
            let err = PlacesError::from_status(res.status());
            warn!("Error getting place details for {}: {}", place_id, err);
            return Err(err);
        }

        let details_response = res.json::<DetailsResponse>().await.map_err(|e| {
            warn!("Failed to parse place details for {} due to: {}", place_id, e);
            PlacesError::from(e)
        })?;

        match details_response.result {
            Some(mut details) => {
                if details.place_id.is_empty() {
                    details.place_id = place_id.to_string();
                }
                Ok(details)
            }
            None => {
                let err = PlacesError::Status {
                    status: details_response.status,
                    message: details_response.error_message.unwrap_or_default(),
                };
                warn!("No place details for {}: {}", place_id, err);
                Err(err)
            }
        }
    }

    /// Direct link to the photo endpoint. It embeds the api key, so it must
    /// never be handed to a browser.
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!(
            "{}/photo?maxwidth={}&photo_reference={}&key={}",
            self.base_url,
            max_width,
            urlencoding::encode(photo_reference),
            urlencoding::encode(&self.api_key),
        )
    }

    pub async fn fetch_photo(
        &self,
        photo_reference: &str,
        max_width: u32,
    ) -> Result<PhotoData, PlacesError> {
        let res = self.http_client
            .get(self.photo_url(photo_reference, max_width))
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach place photo due to: {}", e);
                PlacesError::from(e)
            })?;

        if !res.status().is_success() {
            let err = PlacesError::from_status(res.status());
            warn!("Error fetching photo: {}", err);
            return Err(err);
        }

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_PHOTO_CONTENT_TYPE)
            .to_string();

        let bytes = res.bytes().await.map_err(|e| {
            warn!("Failed to read place photo body due to: {}", e);
            PlacesError::from(e)
        })?;

        Ok(PhotoData {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(api_key: Option<&str>) -> PlacesSettings {
        PlacesSettings {
            api_key: api_key.map(str::to_string),
            base_url: GOOGLE_PLACES_BASE_URL.to_string(),
        }
    }

    #[test]
    fn missing_or_blank_key_fails_construction() {
        let client = Client::new();
        assert!(matches!(
            GooglePlacesRepo::new(&settings(None), client.clone()),
            Err(PlacesError::MissingApiKey)
        ));
        assert!(matches!(
            GooglePlacesRepo::new(&settings(Some("  ")), client),
            Err(PlacesError::MissingApiKey)
        ));
        assert!(!settings(Some("")).has_api_key());
        assert!(settings(Some("k")).has_api_key());
    }

    #[test]
    fn missing_key_error_names_the_setting() {
        assert_eq!(
            PlacesError::MissingApiKey.to_string(),
            "GOOGLE_MAPS_API_KEY environment variable is not set"
        );
    }

    #[test]
    fn continued_search_only_sends_token_and_key() {
        let request = SearchRequest::Continued { page_token: "T".to_string() };
        let params = serde_json::to_value(TextSearchParams::new(&request, "k")).unwrap();
        assert_eq!(params, json!({ "pagetoken": "T", "key": "k" }));
    }

    #[test]
    fn fresh_search_omits_unset_filters() {
        let request = SearchRequest::Fresh(FreshSearch {
            query: "Sushi in Sydney".to_string(),
            r#type: Some("restaurant".to_string()),
            min_price: None,
            max_price: Some(3),
            open_now: false,
            radius: Some(5000),
        });

        let params = serde_json::to_value(TextSearchParams::new(&request, "k")).unwrap();
        assert_eq!(
            params,
            json!({
                "query": "Sushi in Sydney",
                "type": "restaurant",
                "maxprice": 3,
                "radius": 5000,
                "key": "k"
            })
        );
    }

    #[test]
    fn photo_url_is_a_pure_builder() {
        let repo = GooglePlacesRepo::new(&settings(Some("secret")), Client::new()).unwrap();
        assert_eq!(
            repo.photo_url("abc/def", DEFAULT_PHOTO_MAX_WIDTH),
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photo_reference=abc%2Fdef&key=secret"
        );
    }

    #[test]
    fn upstream_error_carries_status_and_reason() {
        let err = PlacesError::from_status(StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Google Places API error: 403 Forbidden");
    }
}
