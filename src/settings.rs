use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime configuration, read from defaults overlaid with `APP_*`
/// environment variables (e.g. `APP_DATABASE_PATH`, `APP_PORT`).
#[derive(Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_path: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("database_path", "trivia.sqlite")?
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
