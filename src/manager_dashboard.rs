use std::sync::Arc;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use serde::Serialize;
use serde_with::{serde_as, TimestampSeconds};
use tokio::sync::Mutex;
use crate::errors::RefreshError;
use crate::forecast_normalizer;
use crate::forecast_normalizer::models::ForecastView;
use crate::forecast_normalizer::FALLBACK_ICON;
use crate::manager_openweather::models::RawWeather;
use crate::manager_openweather::OpenWeather;
use crate::outfit::{outfit_for, Outfit};

/// Current conditions as shown on the dashboard
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub observed_at: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon_id: String,
}

impl CurrentConditions {
    /// Derives the displayed current conditions from a raw weather response
    ///
    /// # Arguments
    ///
    /// * 'raw' - current weather as returned by the provider
    pub fn from_raw(raw: &RawWeather) -> CurrentConditions {
        let condition = raw.weather.first();

        CurrentConditions {
            observed_at: raw.dt,
            temperature: raw.main.temp,
            feels_like: raw.main.feels_like,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
            description: condition.map(|c| c.description.clone()).unwrap_or_default(),
            icon_id: condition.map(|c| c.icon.clone()).unwrap_or_else(|| FALLBACK_ICON.to_string()),
        }
    }
}

/// Everything one dashboard render needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub city_name: String,
    pub country: String,
    pub current: CurrentConditions,
    pub outfit: Outfit,
    pub forecast: ForecastView,
}

/// What a refresh should fetch weather for
#[derive(Debug, Clone)]
pub enum RefreshTarget {
    Coords { lat: f64, long: f64 },
    City(String),
}

/// Shared dashboard state, updated by spawned refresh tasks
#[derive(Default)]
pub struct DashboardState {
    issued: u64,
    applied: u64,
    loading: bool,
    view: Option<DashboardView>,
    error: Option<String>,
}

/// Serializable snapshot of the dashboard state
#[derive(Serialize)]
pub struct DashboardSnapshot {
    pub loading: bool,
    pub last_refresh_seq: u64,
    pub view: Option<DashboardView>,
    pub error: Option<String>,
}

impl DashboardState {
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            loading: self.loading,
            last_refresh_seq: self.applied,
            view: self.view.clone(),
            error: self.error.clone(),
        }
    }
}

/// Issues a new refresh and spawns the task that carries it out
///
/// Returns the sequence number of the issued request. Each refresh gets a
/// number from a monotonic counter, and a task that is no longer the latest
/// issued one when it completes has been overtaken by a newer refresh, so its
/// result is discarded instead of overwriting fresher data.
///
/// # Arguments
///
/// * 'state' - shared dashboard state
/// * 'owm' - provider client
/// * 'target' - coordinates or city to refresh for
pub async fn refresh(state: Arc<Mutex<DashboardState>>, owm: OpenWeather, target: RefreshTarget) -> u64 {
    let seq = {
        let mut guard = state.lock().await;
        guard.issued += 1;
        guard.loading = true;
        guard.issued
    };

    info!("refresh {} started for {:?}", seq, target);

    let task_state = state.clone();
    tokio::spawn(async move {
        let outcome = fetch_view(&owm, &target).await;

        let mut guard = task_state.lock().await;
        commit(&mut guard, seq, outcome);
    });

    seq
}

/// Applies a finished refresh to the state unless it has been overtaken
///
/// A failed refresh records the error and keeps whatever view was last shown
///
/// # Arguments
///
/// * 'state' - dashboard state to apply to
/// * 'seq' - sequence number of the finished refresh
/// * 'outcome' - what the refresh task produced
fn commit(state: &mut DashboardState, seq: u64, outcome: Result<DashboardView, RefreshError>) {
    if seq < state.issued {
        debug!("discarding refresh {} overtaken by {}", seq, state.issued);
        return;
    }

    state.applied = seq;
    state.loading = false;

    match outcome {
        Ok(view) => {
            state.view = Some(view);
            state.error = None;
        }
        Err(e) => {
            error!("refresh {} failed: {}", seq, e);
            state.error = Some(e.to_string());
        }
    }
}

/// Fetches current conditions plus the forecast for the target and derives
/// the dashboard view
///
/// A refresh by city resolves the coordinates from the current weather
/// response before fetching the forecast
///
/// # Arguments
///
/// * 'owm' - provider client
/// * 'target' - coordinates or city to fetch weather for
async fn fetch_view(owm: &OpenWeather, target: &RefreshTarget) -> Result<DashboardView, RefreshError> {
    let current = match target {
        RefreshTarget::Coords { lat, long } => owm.current_by_coords(*lat, *long).await?,
        RefreshTarget::City(city) => owm.current_by_city(city).await?,
    };

    let raw_forecast = owm.forecast_by_coords(current.coord.lat, current.coord.lon).await?;
    let forecast = forecast_normalizer::normalize(&raw_forecast, Utc::now())?;

    let outfit = outfit_for(current.main.temp, current.weather.first().map(|c| c.main.as_str()));

    Ok(DashboardView {
        city_name: current.name.clone(),
        country: current.sys.country.clone(),
        current: CurrentConditions::from_raw(&current),
        outfit,
        forecast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::OpenWeatherConfig;

    fn view(city: &str) -> DashboardView {
        DashboardView {
            city_name: city.to_string(),
            country: "SE".to_string(),
            current: CurrentConditions {
                observed_at: DateTime::from_timestamp(1_704_142_800, 0).unwrap(),
                temperature: 12.3,
                feels_like: 11.0,
                humidity: 80,
                wind_speed: 3.2,
                description: "overcast clouds".to_string(),
                icon_id: "04d".to_string(),
            },
            outfit: outfit_for(12.3, Some("Clouds")),
            forecast: ForecastView {
                city_name: city.to_string(),
                hourly: Vec::new(),
                daily: Vec::new(),
            },
        }
    }

    #[test]
    fn test_commit_discards_overtaken_refresh() {
        let mut state = DashboardState::default();
        state.issued = 2;

        commit(&mut state, 2, Ok(view("Stockholm")));
        commit(&mut state, 1, Ok(view("Oslo")));

        assert_eq!(state.view.as_ref().unwrap().city_name, "Stockholm");
        assert_eq!(state.applied, 2);
    }

    #[test]
    fn test_commit_applies_in_order_refresh() {
        let mut state = DashboardState::default();
        state.issued = 1;
        state.loading = true;

        commit(&mut state, 1, Ok(view("Stockholm")));

        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.applied, 1);
        assert_eq!(state.snapshot().view.unwrap().city_name, "Stockholm");
    }

    #[test]
    fn test_commit_error_keeps_previous_view() {
        let mut state = DashboardState::default();
        state.issued = 1;
        commit(&mut state, 1, Ok(view("Stockholm")));

        state.issued = 2;
        state.loading = true;
        commit(&mut state, 2, Err(RefreshError("provider unreachable".to_string())));

        assert!(!state.loading);
        assert!(state.error.is_some());
        assert_eq!(state.view.as_ref().unwrap().city_name, "Stockholm");
    }

    #[tokio::test]
    async fn test_refresh_issues_increasing_sequence_numbers() {
        let state = Arc::new(Mutex::new(DashboardState::default()));
        let owm = OpenWeather::new(&OpenWeatherConfig {
            api_key: "test".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
            geo_url: "http://127.0.0.1:9".to_string(),
        }).unwrap();

        let first = refresh(state.clone(), owm.clone(), RefreshTarget::Coords { lat: 59.3, long: 18.1 }).await;
        let second = refresh(state.clone(), owm, RefreshTarget::City("Stockholm".to_string())).await;

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }
}
