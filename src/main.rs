mod errors;
mod logging;
mod initialization;
mod handlers;
mod manager_openweather;
mod manager_dashboard;
mod forecast_normalizer;
mod outfit;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use log::info;
use tokio::sync::Mutex;
use crate::errors::UnrecoverableError;
use crate::initialization::{config, DefaultLocation};
use crate::manager_dashboard::DashboardState;
use crate::manager_openweather::OpenWeather;

pub struct AppState {
    pub owm: OpenWeather,
    pub dashboard: Arc<Mutex<DashboardState>>,
    pub default_location: DefaultLocation,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let owm = OpenWeather::new(&config.open_weather)?;
    let dashboard: Arc<Mutex<DashboardState>> = Arc::new(Mutex::new(DashboardState::default()));
    let default_location = config.location;

    info!("starting on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                owm: owm.clone(),
                dashboard: dashboard.clone(),
                default_location,
            }))
            .service(handlers::weather)
            .service(handlers::forecast)
            .service(handlers::search)
            .service(handlers::dashboard)
            .service(handlers::dashboard_refresh)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
