//! Application settings.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `ponderpad.toml` in the working directory, then environment variables
//! (names lower-cased, so `GOOGLE_CLIENT_ID` sets `google_client_id`).

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use tower_sessions::cookie::Key;

/// Minimum length of `session_secret`, imposed by cookie signing keys.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("session_secret must be at least {MIN_SESSION_SECRET_LEN} bytes")]
    SessionSecretTooShort,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub session_secret: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_callback_url: String,
    #[serde(default, alias = "quoteapi")]
    pub quote_api_key: String,
    pub port: u16,
    pub static_dir: String,
    pub session_inactivity_days: i64,
    pub secure_cookies: bool,
}

impl Settings {
    /// Load from `.env`, `ponderpad.toml` and the process environment.
    pub fn new() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_builder(
            Self::defaults()?
                .add_source(
                    File::with_name("ponderpad.toml")
                        .format(FileFormat::Toml)
                        .required(false),
                )
                .add_source(Environment::default()),
        )
    }

    /// Defaults for every optional key; required keys have none.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("google_callback_url", "http://localhost:3000/google/callback")?
            .set_default("port", 3000)?
            .set_default("static_dir", "public")?
            .set_default("session_inactivity_days", 7)?
            .set_default("secure_cookies", false)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        if settings.session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(SettingsError::SessionSecretTooShort);
        }
        Ok(settings)
    }

    /// Key used to sign the session cookie.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        Key::try_from(self.session_secret.as_bytes())
            .map_err(|_| SettingsError::SessionSecretTooShort)
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
