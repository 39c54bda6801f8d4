use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use chrono::{DateTime, Utc};

/// One sky condition entry as reported by OpenWeather
#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawSampleMain {
    #[serde(default)]
    pub temp: Option<f64>,
}

/// One 3-hour forecast sample
///
/// The fields the normalizer depends on are optional here so that a response
/// violating the shape contract surfaces as a named normalization error
/// instead of a decoding failure
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct RawSample {
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    #[serde(default)]
    pub dt: Option<DateTime<Utc>>,
    #[serde(default)]
    pub main: Option<RawSampleMain>,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCity {
    #[serde(default)]
    pub name: String,
}

/// Raw 5 day / 3 hour forecast response
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub list: Vec<RawSample>,
    #[serde(default)]
    pub city: Option<RawCity>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Raw current weather response
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct RawWeather {
    #[serde(default)]
    pub name: String,
    pub main: CurrentMain,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    pub wind: Wind,
    pub sys: Sys,
    pub coord: Coord,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
}

/// One match from the geocoding city search, passed through to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_deserialization() {
        let json = r#"{
            "cod": "200",
            "cnt": 2,
            "list": [
                {
                    "dt": 1704142800,
                    "main": {"temp": 10.42, "feels_like": 9.3, "temp_min": 10.1, "temp_max": 10.42, "humidity": 81},
                    "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                    "dt_txt": "2024-01-01 21:00:00"
                },
                {
                    "dt": 1704153600,
                    "main": {"temp": 8.0}
                }
            ],
            "city": {"id": 2673730, "name": "Stockholm", "country": "SE", "coord": {"lat": 59.3293, "lon": 18.0686}}
        }"#;

        let forecast: RawForecast = serde_json::from_str(json).unwrap();

        assert_eq!(forecast.list.len(), 2);
        assert_eq!(forecast.list[0].dt.unwrap().timestamp(), 1704142800);
        assert_eq!(forecast.list[0].main.unwrap().temp, Some(10.42));
        assert_eq!(forecast.list[0].weather[0].icon, "10d");
        assert!(forecast.list[1].weather.is_empty());
        assert_eq!(forecast.city.unwrap().name, "Stockholm");
    }

    #[test]
    fn test_forecast_sample_missing_fields() {
        let json = r#"{"list": [{"main": {"humidity": 70}}]}"#;

        let forecast: RawForecast = serde_json::from_str(json).unwrap();

        assert!(forecast.list[0].dt.is_none());
        assert_eq!(forecast.list[0].main.unwrap().temp, None);
        assert!(forecast.city.is_none());
    }

    #[test]
    fn test_current_weather_deserialization() {
        let json = r#"{
            "coord": {"lon": 18.0686, "lat": 59.3293},
            "weather": [{"id": 600, "main": "Snow", "description": "light snow", "icon": "13d"}],
            "main": {"temp": -2.5, "feels_like": -7.1, "temp_min": -3.0, "temp_max": -1.8, "pressure": 1021, "humidity": 93},
            "wind": {"speed": 4.6, "deg": 250},
            "dt": 1704142800,
            "sys": {"country": "SE", "sunrise": 1704093600, "sunset": 1704117600},
            "name": "Stockholm"
        }"#;

        let weather: RawWeather = serde_json::from_str(json).unwrap();

        assert_eq!(weather.name, "Stockholm");
        assert_eq!(weather.main.temp, -2.5);
        assert_eq!(weather.main.humidity, 93);
        assert_eq!(weather.weather[0].main, "Snow");
        assert_eq!(weather.sys.country, "SE");
        assert_eq!(weather.coord.lon, 18.0686);
        assert_eq!(weather.dt.timestamp(), 1704142800);
    }

    #[test]
    fn test_city_suggestion_deserialization() {
        let json = r#"[
            {"name": "London", "lat": 51.5073, "lon": -0.1276, "country": "GB", "state": "England"},
            {"name": "London", "lat": 42.9836, "lon": -81.2497, "country": "CA"}
        ]"#;

        let suggestions: Vec<CitySuggestion> = serde_json::from_str(json).unwrap();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].state.as_deref(), Some("England"));
        assert_eq!(suggestions[1].country, "CA");
        assert!(suggestions[1].state.is_none());
    }
}
