pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod scanner;
pub mod services;

pub use config::Config;
pub use database::Stores;
pub use error::AppError;
pub use services::{AttendanceDashboard, CheckInService, CheckInStation};

pub struct AppState {
    pub check_in: CheckInService,
    pub station: CheckInStation,
    pub dashboard: AttendanceDashboard,
}

impl AppState {
    pub fn new(stores: Stores, config: &Config) -> Self {
        Self {
            check_in: CheckInService::new(
                stores.teams,
                stores.attendance.clone(),
                config.station_location.clone(),
            ),
            station: CheckInStation::new(),
            dashboard: AttendanceDashboard::new(stores.attendance),
        }
    }
}
