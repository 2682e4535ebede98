pub mod app_config;
pub mod clock;
pub mod config;
pub mod domain;
pub mod ids;
pub mod region;

pub use app_config::{AppConfig, Environment};
pub use clock::{Clock, ClockPolicy, CutoffPolicy, DateRejection, FixedClock, SystemClock};
pub use config::{load_app_config, load_app_config_from_env};
pub use domain::{
    Address, Contact, Coordinates, Location, OrderCandidate, TimeSlot, TimeWindow,
};
pub use region::Region;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
