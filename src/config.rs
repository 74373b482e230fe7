// config.rs
use std::env;

use crate::errors::{AppError, Result};

const DEFAULT_DATABASE: &str = "goalline";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo_uri: String,
    pub database_name: String,
    pub host: String,
    pub port: u16,
    pub default_limit: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mongo_uri = lookup("MONGO_URI")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::configuration("MONGO_URI must be set"))?;

        let database_name = lookup("MONGO_DATABASE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| database_from_uri(&mongo_uri));

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::configuration(format!("PORT must be a number, got '{}'", raw)))?,
            None => 10000,
        };

        let default_limit = match lookup("ANALYTICS_DEFAULT_LIMIT") {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::configuration(format!("ANALYTICS_DEFAULT_LIMIT must be an integer, got '{}'", raw))
            })?,
            None => 20,
        };

        Ok(AppConfig {
            mongo_uri,
            database_name,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            default_limit,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Last path segment of the connection string, without query options.
fn database_from_uri(uri: &str) -> String {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or_default())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}
