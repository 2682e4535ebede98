use std::net::SocketAddr;

use chrono_tz::Tz;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub provider_base_url: String,
    pub provider_api_key: String,
    pub geocoder_base_url: String,
    /// `None` disables live geocoding; the resolver falls back to regional defaults.
    pub geocoder_api_key: Option<String>,
    pub provider_timeout_secs: u64,
    pub provider_max_retries: u32,
    pub reference_tz: Tz,
    pub default_duration_minutes: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("provider_base_url", &self.provider_base_url)
            .field("provider_api_key", &"[redacted]")
            .field("geocoder_base_url", &self.geocoder_base_url)
            .field(
                "geocoder_api_key",
                &self.geocoder_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("provider_max_retries", &self.provider_max_retries)
            .field("reference_tz", &self.reference_tz)
            .field("default_duration_minutes", &self.default_duration_minutes)
            .finish()
    }
}
