use std::env;
use std::fs;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging;

const CONFIG_ENV: &str = "WEATHERCAST_CONFIG";
const CONFIG_DEFAULT: &str = "config.toml";

#[derive(Deserialize, Clone)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    pub api_url: String,
    pub geo_url: String,
}

#[derive(Deserialize, Clone, Copy)]
pub struct DefaultLocation {
    pub lat: f64,
    pub long: f64,
}

#[derive(Deserialize, Clone)]
pub struct Logging {
    pub log_path: String,
    pub log_level: String,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub web_server: WebServer,
    pub open_weather: OpenWeatherConfig,
    pub location: DefaultLocation,
    pub logging: Logging,
}

/// Reads the configuration file and sets up logging
///
/// The configuration file path is taken from the WEATHERCAST_CONFIG environment
/// variable and defaults to config.toml in the working directory
pub fn config() -> Result<Config, ConfigError> {
    let path = env::var(CONFIG_ENV).unwrap_or_else(|_| CONFIG_DEFAULT.to_string());
    let raw = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&raw)?;

    logging::setup_logging(&config.logging)?;

    Ok(config)
}
