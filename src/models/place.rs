use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PlacePhoto {
    pub photo_reference: String,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub html_attributions: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Geometry {
    pub location: Location,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Option<Vec<String>>,
}

/// One entry of a text search page.
#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub photos: Option<Vec<PlacePhoto>>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    pub status: String,
}

impl SearchResponse {
    /// `ZERO_RESULTS` is a successful search, anything else but `OK` is not
    pub fn is_ok(&self) -> bool {
        self.status == "OK" || self.status == "ZERO_RESULTS"
    }
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PlaceReview {
    pub author_name: String,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub relative_time_description: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub time: Option<i64>,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct PlaceDetails {
    /// Not part of the requested field mask, filled in from the lookup id when absent
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<PlacePhoto>>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub reviews: Option<Vec<PlaceReview>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Envelope of the details endpoint. Google answers 200 with a status such as
/// `NOT_FOUND` and no `result` when the lookup fails.
#[derive(Clone, Deserialize, Debug)]
pub struct DetailsResponse {
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_response_keeps_optional_fields_absent() {
        let body = json!({
            "results": [{
                "place_id": "abc",
                "name": "Sushi Den",
                "geometry": { "location": { "lat": -33.86, "lng": 151.2 } },
                "vicinity": "1 George St",
                "types": ["restaurant", "food"]
            }],
            "status": "OK"
        });

        let parsed: SearchResponse = serde_json::from_value(body).unwrap();
        assert!(parsed.is_ok());
        assert_eq!(parsed.results[0].name, "Sushi Den");
        assert!(parsed.next_page_token.is_none());

        let echoed = serde_json::to_value(&parsed).unwrap();
        assert!(echoed.get("next_page_token").is_none());
        assert!(echoed["results"][0].get("rating").is_none());
        assert!(echoed["results"][0].get("photos").is_none());
    }

    #[test]
    fn denied_search_is_not_ok() {
        let parsed: SearchResponse =
            serde_json::from_value(json!({ "results": [], "status": "REQUEST_DENIED" })).unwrap();
        assert!(!parsed.is_ok());

        let empty: SearchResponse =
            serde_json::from_value(json!({ "status": "ZERO_RESULTS" })).unwrap();
        assert!(empty.is_ok());
        assert!(empty.results.is_empty());
    }

    #[test]
    fn details_envelope_without_result() {
        let parsed: DetailsResponse =
            serde_json::from_value(json!({ "status": "NOT_FOUND" })).unwrap();
        assert!(parsed.result.is_none());
        assert_eq!(parsed.status, "NOT_FOUND");
    }

    #[test]
    fn details_parses_reviews_and_hours() {
        let parsed: DetailsResponse = serde_json::from_value(json!({
            "result": {
                "name": "Sushi Den",
                "formatted_phone_number": "(02) 1234 5678",
                "opening_hours": {
                    "open_now": true,
                    "weekday_text": ["Monday: 11:00 AM – 10:00 PM"]
                },
                "reviews": [{
                    "author_name": "Kim",
                    "profile_photo_url": "https://example.com/kim.png",
                    "rating": 5,
                    "relative_time_description": "a week ago",
                    "text": "Great omakase",
                    "time": 1700000000
                }]
            },
            "status": "OK"
        }))
        .unwrap();

        let details = parsed.result.unwrap();
        assert_eq!(details.place_id, "");
        let reviews = details.reviews.unwrap();
        assert_eq!(reviews[0].author_name, "Kim");
        assert_eq!(reviews[0].rating, 5.0);
        assert_eq!(
            details.opening_hours.unwrap().weekday_text.unwrap().len(),
            1
        );
    }
}
