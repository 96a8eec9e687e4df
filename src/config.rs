use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application settings, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub run_mode: RunMode,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

/// Deployment mode. Controls how much detail error responses carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins are matched by prefix, so `http://localhost` admits any port.
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Load configuration with layered precedence:
    /// 1. config/default.toml
    /// 2. config/{run_mode}.toml, selected by APP__RUN_MODE
    /// 3. config/local.toml (gitignored, per machine)
    /// 4. APP__* environment variables (highest)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let run_mode =
            std::env::var("APP__RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{run_mode}.toml"))).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate the loaded configuration before the server starts.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.database.host.is_empty() {
            return Err("Database host cannot be empty".to_string());
        }
        if self.database.user.is_empty() {
            return Err("Database user cannot be empty".to_string());
        }
        if self.database.name.is_empty() {
            return Err("Database name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            run_mode: RunMode::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 2500,
            },
            database: DatabaseConfig {
                host: "127.0.0.1".to_string(),
                port: 3306,
                user: "root".to_string(),
                password: String::new(),
                name: "horarios".to_string(),
            },
            cors: CorsConfig {
                allowed_origins: vec![
                    "http://localhost".to_string(),
                    "http://127.0.0.1".to_string(),
                ],
            },
        }
    }
}
