pub mod errors;
pub mod models;

use std::time::Duration;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use crate::initialization::OpenWeatherConfig;
use crate::manager_openweather::errors::OWMError;
use crate::manager_openweather::models::{CitySuggestion, RawForecast, RawWeather};

/// Struct for managing weather data fetched from the OpenWeather APIs
#[derive(Clone)]
pub struct OpenWeather {
    client: Client,
    api_key: String,
    api_url: String,
    geo_url: String,
}

impl OpenWeather {
    /// Returns an OpenWeather struct ready for fetching current weather,
    /// forecasts and city suggestions
    ///
    /// # Arguments
    ///
    /// * 'conf' - the open weather section of the configuration
    pub fn new(conf: &OpenWeatherConfig) -> Result<OpenWeather, OWMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: conf.api_key.clone(),
            api_url: conf.api_url.trim_end_matches('/').to_string(),
            geo_url: conf.geo_url.trim_end_matches('/').to_string(),
        })
    }

    /// Retrieves current weather conditions for the given coordinates
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'long' - longitude of the location
    pub async fn current_by_coords(&self, lat: f64, long: f64) -> Result<RawWeather, OWMError> {
        let url = format!("{}/weather", self.api_url);

        self.get_json(&url, &[
            ("lat", lat.to_string()),
            ("lon", long.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ]).await
    }

    /// Retrieves current weather conditions for the given city name
    ///
    /// An unknown city is reported as a not found error so the caller can
    /// distinguish it from other provider failures
    ///
    /// # Arguments
    ///
    /// * 'city' - city name as typed by the user
    pub async fn current_by_city(&self, city: &str) -> Result<RawWeather, OWMError> {
        let url = format!("{}/weather", self.api_url);

        self.get_json(&url, &[
            ("q", city.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ]).await
    }

    /// Retrieves the raw 5 day / 3 hour forecast time series for the given
    /// coordinates
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'long' - longitude of the location
    pub async fn forecast_by_coords(&self, lat: f64, long: f64) -> Result<RawForecast, OWMError> {
        let url = format!("{}/forecast", self.api_url);

        self.get_json(&url, &[
            ("lat", lat.to_string()),
            ("lon", long.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ]).await
    }

    /// Searches the geocoding API for cities matching the given query
    ///
    /// Queries shorter than two characters return an empty list without
    /// calling the API
    ///
    /// # Arguments
    ///
    /// * 'query' - partial or full city name
    /// * 'limit' - maximum number of suggestions to return
    pub async fn search_cities(&self, query: &str, limit: u8) -> Result<Vec<CitySuggestion>, OWMError> {
        if query.chars().count() < 2 {
            return Ok(Vec::new());
        }

        let url = format!("{}/direct", self.geo_url);

        self.get_json(&url, &[
            ("q", query.to_string()),
            ("limit", limit.to_string()),
            ("appid", self.api_key.clone()),
        ]).await
    }

    /// Fetches one endpoint and decodes the json body
    ///
    /// # Arguments
    ///
    /// * 'url' - full endpoint url without query parameters
    /// * 'query' - query parameters for the request
    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T, OWMError> {
        let req = self.client
            .get(url)
            .query(query)
            .send().await?;

        let status = req.status();
        if status == StatusCode::NOT_FOUND {
            return Err(OWMError::NotFound(format!("OpenWeather found nothing at {}", url)));
        }
        if !status.is_success() {
            return Err(OWMError::OpenWeather(format!("Error while fetching from OpenWeather: {}", status)));
        }

        let json = req.text().await?;
        let data: T = serde_json::from_str(&json)?;

        Ok(data)
    }
}
