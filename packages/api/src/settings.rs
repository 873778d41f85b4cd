//! # Runtime settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml` in the working directory, then environment variables with `_`
//! as the nesting separator (`DATABASE_URL` → `database.url`).
//!
//! | Env var | Key | Default |
//! |---------|-----|---------|
//! | `DATABASE_URL` | `database.url` | required |
//! | `SESSION_SECRET` | `session.secret` | required |
//! | `SESSION_SECURE` | `session.secure` | `false` |
//! | `CLIENT_URL` | `client.url` | `http://localhost:3000` |
//! | `PORT` | `port` | `5000` |

use std::collections::HashMap;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Database {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Session {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Client {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub session: Session,
    pub client: Client,
    pub port: u16,
}

impl Settings {
    /// Load from `config.toml` (optional) and the process environment, after
    /// pulling in a `.env` file if one exists.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let builder = defaults()?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment());
        Self::build(builder)
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self, SettingsError> {
        let builder = defaults()?.add_source(environment().source(Some(vars)));
        Self::build(builder)
    }

    fn build(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.database.url.trim().is_empty() {
            return Err(SettingsError::Missing("DATABASE_URL"));
        }
        if self.session.secret.trim().is_empty() {
            return Err(SettingsError::Missing("SESSION_SECRET"));
        }
        Ok(self)
    }
}

fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("client.url", "http://localhost:3000")?
        .set_default("port", 5000)?
        .set_default("session.secure", false)
}

fn environment() -> Environment {
    Environment::default().separator("_")
}
