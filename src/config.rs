//! Application-level configuration loading: round names, timer duration, and
//! the bearer-token secret.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::game_status::DEFAULT_TIMER_DURATION_MS;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "HUNT_BACK_CONFIG_PATH";
/// Environment variable holding the bearer-token signing secret.
const JWT_SECRET_ENV: &str = "JWT_SECRET";
/// Development-only fallback secret used when [`JWT_SECRET_ENV`] is unset.
const DEV_JWT_SECRET: &str = "hunt-back-dev-secret";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Ordered round names teams progress through.
    pub rounds: Vec<String>,
    /// Total countdown length of the shared game timer, in milliseconds.
    pub timer_duration_ms: i64,
    /// Secret material used to sign and verify team bearer tokens.
    pub jwt_secret: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in defaults when the file is missing or malformed.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let raw = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    RawConfig::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                RawConfig::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                RawConfig::default()
            }
        };

        let jwt_secret = env::var(JWT_SECRET_ENV).unwrap_or_else(|_| {
            warn!("{JWT_SECRET_ENV} is not set; using the development secret");
            DEV_JWT_SECRET.to_owned()
        });

        Self {
            rounds: raw.rounds,
            timer_duration_ms: raw.timer_duration_ms,
            jwt_secret,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let raw = RawConfig::default();
        Self {
            rounds: raw.rounds,
            timer_duration_ms: raw.timer_duration_ms,
            jwt_secret: DEV_JWT_SECRET.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default = "default_rounds")]
    rounds: Vec<String>,
    #[serde(default = "default_timer_duration_ms")]
    timer_duration_ms: i64,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            timer_duration_ms: default_timer_duration_ms(),
        }
    }
}

/// Round set shipped with the binary.
fn default_rounds() -> Vec<String> {
    vec!["round1".to_owned(), "round2".to_owned(), "round3".to_owned()]
}

fn default_timer_duration_ms() -> i64 {
    DEFAULT_TIMER_DURATION_MS
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
