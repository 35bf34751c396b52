// src/config.rs
use std::env;
use thiserror::Error;

pub const MONGO_URI_VAR: &str = "MONGO_URI";
pub const MONGO_DB_VAR: &str = "MONGO_DB";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub mongo_uri: String,
    /// Falls back to the database named in the URI when unset.
    pub database: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|_| None)
    }

    /// Like [`Config::from_env`], but values returned by `overrides` win over the environment.
    pub fn from_env_with<F>(overrides: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| overrides(key).or_else(|| env::var(key).ok()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            mongo_uri: non_empty(MONGO_URI_VAR).ok_or(ConfigError::Missing(MONGO_URI_VAR))?,
            database: non_empty(MONGO_DB_VAR),
        })
    }
}
