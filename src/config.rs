use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Serving configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the serialized classifier artifact (`PATH_TO_MODEL`).
    pub model_path: String,
    /// Path to the serialized encoder artifact (`PATH_TO_ENCODER`).
    pub encoder_path: String,
    /// Listen port (`PORT`, default 8080).
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let model_path =
            env::var("PATH_TO_MODEL").map_err(|_| ConfigError::MissingVar("PATH_TO_MODEL"))?;
        let encoder_path =
            env::var("PATH_TO_ENCODER").map_err(|_| ConfigError::MissingVar("PATH_TO_ENCODER"))?;
        let port = match env::var("PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::InvalidVar {
                var: "PORT",
                value: v.clone(),
            })?,
            Err(_) => 8080,
        };
        Ok(Self {
            model_path,
            encoder_path,
            port,
        })
    }
}
