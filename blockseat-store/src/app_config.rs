use blockseat_catalog::CountryEntry;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub countries: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the flight inventory service (block seats).
    pub flight_url: String,
    /// Base URL of the bookings and visa service.
    pub backend_url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// JSON file holding a fallback `authToken`.
    #[serde(default)]
    pub token_store_path: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    pub fn load_from(dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // e.g. `BLOCKSEAT__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("BLOCKSEAT").separator("__"))
            // The dashboard's public URL variables win over everything else
            .set_override_option("backend.flight_url", env::var("NEXT_PUBLIC_FLIGHT_URL").ok())?
            .set_override_option("backend.backend_url", env::var("NEXT_PUBLIC_BACKEND_URL").ok())?
            .build()?;

        s.try_deserialize()
    }
}
