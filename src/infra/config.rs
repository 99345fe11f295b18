//! Centralized configuration (environment variables + defaults).

use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be set when STORAGE_BACKEND=postgres")]
    Missing { var: &'static str },
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage: StorageBackend,
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let storage = match backend.trim().to_lowercase().as_str() {
            "postgres" => {
                let database_url = lookup("DATABASE_URL")
                    .filter(|v| !v.trim().is_empty())
                    .ok_or(ConfigError::Missing {
                        var: "DATABASE_URL",
                    })?;
                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                    None => DEFAULT_MAX_CONNECTIONS,
                    Some(v) => v
                        .trim()
                        .parse::<u32>()
                        .map_err(|e| ConfigError::Invalid {
                            var: "DATABASE_MAX_CONNECTIONS",
                            value: v.clone(),
                            reason: e.to_string(),
                        })?
                        .max(1),
                };
                StorageBackend::Postgres {
                    database_url,
                    max_connections,
                }
            }
            "memory" => StorageBackend::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    var: "STORAGE_BACKEND",
                    value: backend,
                    reason: "expected 'postgres' or 'memory'".to_string(),
                })
            }
        };

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'pretty' or 'json'".to_string(),
                })
            }
        };

        Ok(Self {
            storage,
            bind_addr,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = config(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: "DATABASE_URL" }));
    }

    #[test]
    fn defaults_apply_for_postgres() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/catalog")]).unwrap();
        assert_eq!(
            cfg.storage,
            StorageBackend::Postgres {
                database_url: "postgres://localhost/catalog".to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            }
        );
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn memory_backend_needs_no_database() {
        let cfg = config(&[
            ("STORAGE_BACKEND", "memory"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(cfg.storage, StorageBackend::Memory);
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config(&[("STORAGE_BACKEND", "sqlite")]).unwrap_err();
        assert!(err.to_string().contains("STORAGE_BACKEND"));

        let err = config(&[("STORAGE_BACKEND", "memory"), ("BIND_ADDR", "nope")]).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));

        let err = config(&[
            ("DATABASE_URL", "postgres://x"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
    }
}
