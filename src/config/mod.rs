use serde::Deserialize;
use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};

/// Secret shipped in samples. Signing tokens with it lets anyone forge them.
pub const PLACEHOLDER_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_duration_hours: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// Origins allowed to call the API. Empty means permissive.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LifecycleConfig {
    /// Pins deadline normalization to a fixed UTC offset instead of the
    /// process local time zone.
    pub utc_offset_minutes: Option<i32>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with CLUBBOARD__ prefix, double underscore separates levels)
            .add_source(
                Environment::with_prefix("CLUBBOARD")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            );

        Self::load(builder)
    }

    /// Applies defaults underneath `sources`, deserializes, and refuses a
    /// missing or placeholder signing secret.
    pub fn load(sources: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = sources
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite://clubboard.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("auth.token_duration_hours", 24)?
            .build()?
            .try_deserialize()?;

        settings.ensure_signing_secret()?;
        Ok(settings)
    }

    pub fn ensure_signing_secret(&self) -> Result<(), ConfigError> {
        let secret = self.auth.jwt_secret.trim();
        if secret.is_empty() || secret == PLACEHOLDER_JWT_SECRET {
            return Err(ConfigError::Message(
                "auth.jwt_secret must be set to a private value (CLUBBOARD__AUTH__JWT_SECRET)".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "sqlite://clubboard.db?mode=rwc".to_string(),
                max_connections: 10,
            },
            auth: AuthConfig {
                jwt_secret: PLACEHOLDER_JWT_SECRET.to_string(),
                token_duration_hours: 24,
            },
            cors: CorsConfig::default(),
            lifecycle: LifecycleConfig::default(),
        }
    }
}
