use std::env;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const MONGODB_DATABASE: &str = "TripCraft";
const WEATHER_API_URL: &str = "https://api.weatherapi.com/v1";
const WEATHER_FORECAST_DAYS: u32 = 7;
const MAX_FORECAST_DAYS: u32 = 14;
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Settings read once at startup and shared with handlers through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub jwt_secret: String,
    pub weather_api_key: Option<String>,
    pub weather_api_url: String,
    pub weather_forecast_days: u32,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub nominatim_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_database: MONGODB_DATABASE.to_string(),
            jwt_secret: "default_secret".to_string(),
            weather_api_key: None,
            weather_api_url: WEATHER_API_URL.to_string(),
            weather_forecast_days: WEATHER_FORECAST_DAYS,
            gemini_api_key: None,
            gemini_api_url: GEMINI_API_URL.to_string(),
            nominatim_url: NOMINATIM_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to defaults.
    /// `MONGODB_URI` is the only required variable.
    pub fn from_env() -> Result<Self, env::VarError> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            mongo_uri: env::var("MONGODB_URI")?,
            mongo_database: env::var("MONGODB_DATABASE").unwrap_or(defaults.mongo_database),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            weather_api_key: non_empty_var("WEATHER_API_KEY"),
            weather_api_url: env::var("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
            weather_forecast_days: env::var("WEATHER_FORECAST_DAYS")
                .ok()
                .and_then(|s| s.parse::<u32>().ok())
                .map(|days| days.clamp(1, MAX_FORECAST_DAYS))
                .unwrap_or(defaults.weather_forecast_days),
            gemini_api_key: non_empty_var("GOOGLE_AI_API_KEY"),
            gemini_api_url: env::var("GEMINI_API_URL").unwrap_or(defaults.gemini_api_url),
            nominatim_url: env::var("NOMINATIM_URL").unwrap_or(defaults.nominatim_url),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_requires_mongo_uri() {
        env::remove_var("MONGODB_URI");
        assert!(AppConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_applies_defaults_and_overrides() {
        env::set_var("MONGODB_URI", "mongodb://db:27017");
        env::set_var("PORT", "not-a-port");
        env::set_var("WEATHER_FORECAST_DAYS", "30");
        env::set_var("WEATHER_API_KEY", "  ");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.mongo_uri, "mongodb://db:27017");
        assert_eq!(config.port, PORT);
        assert_eq!(config.weather_forecast_days, MAX_FORECAST_DAYS);
        assert!(config.weather_api_key.is_none());
        assert_eq!(config.mongo_database, MONGODB_DATABASE);

        env::remove_var("MONGODB_URI");
        env::remove_var("PORT");
        env::remove_var("WEATHER_FORECAST_DAYS");
        env::remove_var("WEATHER_API_KEY");
    }
}
