use std::net::SocketAddr;

use chrono::Duration;
use dotenvy::dotenv;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
/// Matches the customary server-side session lifetime of 24 minutes.
const DEFAULT_SESSION_IDLE_SECS: u32 = 1440;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a socket address such as 0.0.0.0:3000, got {value:?}")]
    InvalidBindAddr { name: &'static str, value: String },

    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidIdleTimeout { name: &'static str, value: String },

    #[error("{name} must be true or false, got {value:?}")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub session_idle_secs: u32,
    pub secure_cookie: bool,
}

impl Config {
    /// Reads configuration from the process environment, after loading a
    /// `.env` file when one exists.
    #[tracing::instrument(name = "load_config")]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        let config = Self::from_lookup(|name| std::env::var(name).ok())?;

        tracing::info!(
            bind_addr = %config.bind_addr,
            session_idle_secs = config.session_idle_secs,
            secure_cookie = config.secure_cookie,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        const BIND_ADDR: &str = "REGISTRATION_BIND_ADDR";
        const IDLE_SECS: &str = "REGISTRATION_SESSION_IDLE_SECS";
        const SECURE_COOKIE: &str = "REGISTRATION_SECURE_COOKIE";

        let bind_addr = match lookup(BIND_ADDR) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr {
                    name: BIND_ADDR,
                    value,
                })?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr {
                    name: BIND_ADDR,
                    value: DEFAULT_BIND_ADDR.to_string(),
                })?,
        };

        let session_idle_secs = match lookup(IDLE_SECS) {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidIdleTimeout {
                        name: IDLE_SECS,
                        value,
                    });
                }
            },
            None => DEFAULT_SESSION_IDLE_SECS,
        };

        let secure_cookie = match lookup(SECURE_COOKIE) {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        name: SECURE_COOKIE,
                        value,
                    });
                }
            },
            None => false,
        };

        Ok(Self {
            bind_addr,
            session_idle_secs,
            secure_cookie,
        })
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::seconds(i64::from(self.session_idle_secs))
    }
}
