use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub routing: RoutingConfig,
}

/// Everything the provider chain and timeline estimator are tuned by.
/// The API key is the only hard requirement; its absence is a startup
/// error, never a silent per-request failure.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub api_key: String,
    pub region_bias: String,
    pub speed_adjustment: f64,
    pub road_factor: f64,
    pub average_speed_kmh: f64,
    pub past_guard_mins: i64,
    pub sequence_buffer_secs: i64,
    pub request_timeout_secs: u64,
    pub maps_base_url: String,
    pub routes_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            routing: RoutingConfig::from_env()?,
        })
    }
}

impl RoutingConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY")
            .map_err(|_| AppError::Configuration("GOOGLE_MAPS_API_KEY is not set".to_string()))?;

        if api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "GOOGLE_MAPS_API_KEY is empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            region_bias: env::var("REGION_BIAS").unwrap_or_else(|_| "in".to_string()),
            speed_adjustment: parse_or_default("SPEED_ADJUSTMENT", 0.95)?,
            road_factor: parse_or_default("ROAD_FACTOR", 1.4)?,
            average_speed_kmh: parse_or_default("AVERAGE_SPEED_KMH", 30.0)?,
            past_guard_mins: parse_or_default("PAST_GUARD_MINS", 5)?,
            sequence_buffer_secs: parse_or_default("SEQUENCE_BUFFER_SECS", 10)?,
            request_timeout_secs: parse_or_default("PROVIDER_TIMEOUT_SECS", 10)?,
            maps_base_url: env::var("MAPS_BASE_URL")
                .unwrap_or_else(|_| "https://maps.googleapis.com".to_string()),
            routes_base_url: env::var("ROUTES_BASE_URL")
                .unwrap_or_else(|_| "https://routes.googleapis.com".to_string()),
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Configuration(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
