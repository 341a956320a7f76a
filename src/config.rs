use clap::Parser;

use crate::repositories::google_places_repo::{PlacesSettings, GOOGLE_PLACES_BASE_URL};

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    #[clap(env, long, default_value = "127.0.0.1")]
    pub host: String,

    #[clap(env, long, default_value_t = 3000)]
    pub port: u16,

    /// Comma separated list of origins allowed by CORS
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,

    /// Missing key does not stop the server, every places call answers 500 instead
    #[clap(env, long)]
    pub google_maps_api_key: Option<String>,

    #[clap(env, long, default_value = GOOGLE_PLACES_BASE_URL)]
    pub places_base_url: String,

    #[clap(env, long, default_value_t = 1000)]
    pub reservation_delay_ms: u64,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn places_settings(&self) -> PlacesSettings {
        PlacesSettings {
            api_key: self.google_maps_api_key.clone(),
            base_url: self.places_base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            origin_urls: "http://localhost:3000".to_string(),
            google_maps_api_key: None,
            places_base_url: GOOGLE_PLACES_BASE_URL.to_string(),
            reservation_delay_ms: 1000,
        }
    }
}
