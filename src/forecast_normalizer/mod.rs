pub mod errors;
pub mod models;

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use crate::forecast_normalizer::errors::MalformedForecastError;
use crate::forecast_normalizer::models::{DailyForecastEntry, ForecastView, HourlyForecastEntry};
use crate::manager_openweather::models::RawForecast;

/// Icon code used when a sample carries no sky condition, clear sky by day
pub const FALLBACK_ICON: &str = "01d";

const HOURLY_ENTRIES: usize = 5;
const DAILY_ENTRIES: usize = 5;
const DAILY_HEADROOM: usize = 6;

/// A sample that passed shape validation
struct Sample {
    dt: DateTime<Utc>,
    temp: f64,
    icon: String,
    description: String,
}

/// Normalizes a raw forecast time series into the hourly and daily views
///
/// The transformation is a pure function of its inputs, the caller supplies
/// the current time so results stay deterministic. Samples are used in the
/// order the provider returned them, which is chronological per its contract.
///
/// # Arguments
///
/// * 'raw' - the raw 5 day / 3 hour forecast response
/// * 'now' - current time, samples before it are excluded from the hourly view
pub fn normalize(raw: &RawForecast, now: DateTime<Utc>) -> Result<ForecastView, MalformedForecastError> {
    let samples = validate(raw)?;

    let hourly: Vec<HourlyForecastEntry> = samples.iter()
        .filter(|s| s.dt >= now)
        .take(HOURLY_ENTRIES)
        .map(|s| HourlyForecastEntry {
            timestamp: s.dt,
            temperature: s.temp.round() as i32,
            icon_id: s.icon.clone(),
            description: s.description.clone(),
        })
        .collect();

    let mut grouped: BTreeMap<String, Vec<&Sample>> = BTreeMap::new();
    for s in &samples {
        grouped.entry(s.dt.format("%Y-%m-%d").to_string()).or_default().push(s);
    }

    // the first date bucket is often a partial day since the forecast window
    // starts mid-day, so keep one date of headroom before the final cut
    let days: Vec<(String, Vec<&Sample>)> = grouped.into_iter().take(DAILY_HEADROOM).collect();

    let daily: Vec<DailyForecastEntry> = days.into_iter()
        .take(DAILY_ENTRIES)
        .map(|(date, group)| daily_entry(date, &group))
        .collect();

    let city_name = raw.city.as_ref().map(|c| c.name.clone()).unwrap_or_default();

    Ok(ForecastView { city_name, hourly, daily })
}

/// Checks the shape contract and lifts the samples into validated form
///
/// A single offending sample invalidates the whole response since provider
/// responses are expected to be atomic
///
/// # Arguments
///
/// * 'raw' - the raw forecast response to validate
fn validate(raw: &RawForecast) -> Result<Vec<Sample>, MalformedForecastError> {
    if raw.list.is_empty() {
        return Err(MalformedForecastError("no forecast samples".to_string()));
    }

    let mut samples: Vec<Sample> = Vec::with_capacity(raw.list.len());
    for (i, s) in raw.list.iter().enumerate() {
        let dt = s.dt
            .ok_or_else(|| MalformedForecastError(format!("sample {} missing timestamp", i)))?;
        let temp = s.main.as_ref().and_then(|m| m.temp)
            .ok_or_else(|| MalformedForecastError(format!("sample {} missing temperature", i)))?;

        let condition = s.weather.first();
        samples.push(Sample {
            dt,
            temp,
            icon: condition.map(|c| c.icon.clone()).unwrap_or_else(|| FALLBACK_ICON.to_string()),
            description: condition.map(|c| c.description.clone()).unwrap_or_default(),
        });
    }

    Ok(samples)
}

/// Builds the day summary for one calendar date group
///
/// The representative icon is the icon occurring most often within the group,
/// ties broken by first encounter. The description always comes from the
/// first sample of the day.
///
/// # Arguments
///
/// * 'date' - the UTC calendar date key of the group
/// * 'group' - the date's samples, in provider order, never empty
fn daily_entry(date: String, group: &[&Sample]) -> DailyForecastEntry {
    let temp_min = group.iter().map(|s| s.temp).fold(f64::INFINITY, f64::min);
    let temp_max = group.iter().map(|s| s.temp).fold(f64::NEG_INFINITY, f64::max);

    let mut counts: Vec<(&str, u32)> = Vec::new();
    for s in group {
        match counts.iter_mut().find(|(icon, _)| *icon == s.icon) {
            Some((_, n)) => *n += 1,
            None => counts.push((s.icon.as_str(), 1)),
        }
    }

    let mut icon = FALLBACK_ICON;
    let mut best = 0;
    for (candidate, n) in counts {
        if n > best {
            icon = candidate;
            best = n;
        }
    }

    DailyForecastEntry {
        date,
        temp_min: temp_min.round() as i32,
        temp_max: temp_max.round() as i32,
        icon_id: icon.to_string(),
        description: group[0].description.clone(),
    }
}
