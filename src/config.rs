//! Server configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding the static study-tracker pages.
    pub public_dir: PathBuf,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 4000
    /// - `HOST`: default `0.0.0.0`
    /// - `PUBLIC_DIR`: default `public`
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("HOST").ok().as_deref(),
            std::env::var("PUBLIC_DIR").ok().as_deref(),
        )
    }

    fn from_vars(port: Option<&str>, host: Option<&str>, public_dir: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: non_blank(host).unwrap_or(DEFAULT_HOST).to_owned(),
            port: parse_port(port)?,
            public_dir: PathBuf::from(non_blank(public_dir).unwrap_or(DEFAULT_PUBLIC_DIR)),
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match non_blank(raw) {
        None => Ok(DEFAULT_PORT),
        Some(v) => v.parse::<u16>().map_err(|_| ConfigError::InvalidPort(v.to_owned())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
