use std::{env, fmt::Display, str::FromStr};

use tracing::info;

use crate::error::ServerError;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
}

impl Config {
    pub fn load() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `load` passes the process
    /// environment; tests pass a closure over fixed values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        Ok(Self {
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ServerError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };

    raw.trim().parse().map_err(|e: T::Err| ServerError::Config {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}
