use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Default location of the SQLite store when nothing overrides it
pub const DEFAULT_DB_PATH: &str = "data/social_media.db";

#[derive(Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Database {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct Cors {
    /// Comma separated origins, or `*` for any origin
    pub allow_origins: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
    pub cors: Cors,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // 1. Optional settings.toml, in the working directory or the crate directory
        let config_file_name = "settings.toml";

        let current_dir_path = PathBuf::from(config_file_name);
        if current_dir_path.exists() {
            builder = builder.add_source(File::from(current_dir_path).required(false));
        }

        let dev_path = PathBuf::from("dashboard-server").join(config_file_name);
        if dev_path.exists() {
            builder = builder.add_source(File::from(dev_path).required(false));
        }

        builder = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.path", DEFAULT_DB_PATH)?
            .set_default("cors.allow_origins", "*")?;

        // 2. Environment variables take precedence over everything else
        if let Ok(db_path) = std::env::var("SQLITE_DB") {
            builder = builder.set_override("database.path", db_path)?;
        }
        if let Ok(origins) = std::env::var("CORS_ALLOW_ORIGINS") {
            builder = builder.set_override("cors.allow_origins", origins)?;
        }
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(host) = std::env::var("HOST") {
            builder = builder.set_override("server.host", host)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Allowed CORS origins; `None` means any origin
    pub fn cors_origins(&self) -> Option<Vec<String>> {
        parse_origins(&self.cors.allow_origins)
    }
}

fn parse_origins(raw: &str) -> Option<Vec<String>> {
    if raw.trim() == "*" {
        return None;
    }

    Some(
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
