use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use log::{error, info};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::forecast_normalizer;
use crate::manager_dashboard::{self, CurrentConditions, RefreshTarget};
use crate::manager_openweather::errors::OWMError;
use crate::manager_openweather::models::CitySuggestion;
use crate::outfit::{outfit_for, Outfit};

const SUGGESTION_LIMIT: u8 = 5;

#[derive(Deserialize, Debug)]
struct PlaceParams {
    lat: Option<f64>,
    long: Option<f64>,
    city: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CoordParams {
    lat: f64,
    long: f64,
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    q: String,
}

#[derive(Serialize)]
struct CurrentResponse {
    city_name: String,
    country: String,
    current: CurrentConditions,
    outfit: Outfit,
}

#[derive(Serialize)]
struct RefreshResponse {
    seq: u64,
}

#[get("/weather")]
pub async fn weather(params: web::Query<PlaceParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let result = match (&params.city, params.lat, params.long) {
        (Some(city), _, _) => data.owm.current_by_city(city).await,
        (None, Some(lat), Some(long)) => data.owm.current_by_coords(lat, long).await,
        _ => return HttpResponse::BadRequest().body("either city or lat and long must be given"),
    };

    match result {
        Ok(raw) => {
            let outfit = outfit_for(raw.main.temp, raw.weather.first().map(|c| c.main.as_str()));
            HttpResponse::Ok().json(CurrentResponse {
                city_name: raw.name.clone(),
                country: raw.sys.country.clone(),
                current: CurrentConditions::from_raw(&raw),
                outfit,
            })
        },
        Err(OWMError::NotFound(e)) => {
            info!("current weather lookup: {}", e);
            HttpResponse::NotFound().body("city not found, check the spelling and try again")
        },
        Err(e) => {
            error!("failed to fetch current weather: {}", e);
            HttpResponse::InternalServerError().finish()
        },
    }
}

#[get("/forecast")]
pub async fn forecast(params: web::Query<CoordParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let raw = match data.owm.forecast_by_coords(params.lat, params.long).await {
        Ok(raw) => raw,
        Err(e) => {
            error!("failed to fetch forecast: {}", e);
            return HttpResponse::InternalServerError().finish();
        },
    };

    match forecast_normalizer::normalize(&raw, Utc::now()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => {
            error!("forecast response failed validation: {}", e);
            HttpResponse::InternalServerError().finish()
        },
    }
}

#[get("/search")]
pub async fn search(params: web::Query<SearchParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    // autocomplete is non critical, a failed lookup answers with no
    // suggestions instead of an error
    match data.owm.search_cities(&params.q, SUGGESTION_LIMIT).await {
        Ok(suggestions) => HttpResponse::Ok().json(suggestions),
        Err(e) => {
            info!("city search failed, clearing suggestions: {}", e);
            HttpResponse::Ok().json(Vec::<CitySuggestion>::new())
        },
    }
}

#[get("/dashboard")]
pub async fn dashboard(data: web::Data<AppState>) -> impl Responder {
    let state = data.dashboard.lock().await;

    HttpResponse::Ok().json(state.snapshot())
}

#[get("/dashboard/refresh")]
pub async fn dashboard_refresh(params: web::Query<PlaceParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    // without an explicit target the configured default location stands in
    // for the device location
    let target = place_target(&params).unwrap_or(RefreshTarget::Coords {
        lat: data.default_location.lat,
        long: data.default_location.long,
    });

    let seq = manager_dashboard::refresh(data.dashboard.clone(), data.owm.clone(), target).await;

    HttpResponse::Ok().json(RefreshResponse { seq })
}

/// Picks the refresh target out of the request parameters, city before
/// coordinates when both are given
///
/// # Arguments
///
/// * 'params' - query parameters of the request
fn place_target(params: &PlaceParams) -> Option<RefreshTarget> {
    if let Some(city) = &params.city {
        return Some(RefreshTarget::City(city.clone()));
    }

    match (params.lat, params.long) {
        (Some(lat), Some(long)) => Some(RefreshTarget::Coords { lat, long }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_target_prefers_city() {
        let params = PlaceParams {
            lat: Some(59.3),
            long: Some(18.1),
            city: Some("Stockholm".to_string()),
        };

        match place_target(&params) {
            Some(RefreshTarget::City(city)) => assert_eq!(city, "Stockholm"),
            other => panic!("expected city target, got {:?}", other),
        }
    }

    #[test]
    fn test_place_target_coords() {
        let params = PlaceParams { lat: Some(59.3), long: Some(18.1), city: None };

        match place_target(&params) {
            Some(RefreshTarget::Coords { lat, long }) => {
                assert_eq!(lat, 59.3);
                assert_eq!(long, 18.1);
            },
            other => panic!("expected coords target, got {:?}", other),
        }
    }

    #[test]
    fn test_place_target_requires_both_coordinates() {
        let params = PlaceParams { lat: Some(59.3), long: None, city: None };

        assert!(place_target(&params).is_none());
    }
}
