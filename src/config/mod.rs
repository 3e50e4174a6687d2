//! Environment-driven server configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | required |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `COMPLIANCE_DB_POOL_SIZE` | `10` |
//! | `COMPLIANCE_RUN_MIGRATIONS` | `true` |
//! | `COMPLIANCE_LOG_JSON` | `false` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default number of pooled database connections.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    /// A variable could not be parsed.
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Rejected raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    database_url: String,
    host: IpAddr,
    port: u16,
    pool_size: u32,
    run_migrations: bool,
    log_json: bool,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to merge a local `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or any value
    /// fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = read("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        Ok(Self {
            database_url,
            host: parse_or("HOST", read("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or("PORT", read("PORT"), DEFAULT_PORT)?,
            pool_size: parse_or(
                "COMPLIANCE_DB_POOL_SIZE",
                read("COMPLIANCE_DB_POOL_SIZE"),
                DEFAULT_POOL_SIZE,
            )?,
            run_migrations: parse_or(
                "COMPLIANCE_RUN_MIGRATIONS",
                read("COMPLIANCE_RUN_MIGRATIONS"),
                true,
            )?,
            log_json: parse_or("COMPLIANCE_LOG_JSON", read("COMPLIANCE_LOG_JSON"), false)?,
        })
    }

    /// Returns the database connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns whether embedded migrations run at startup.
    #[must_use]
    pub const fn run_migrations(&self) -> bool {
        self.run_migrations
    }

    /// Returns whether logs are emitted as JSON lines.
    #[must_use]
    pub const fn log_json(&self) -> bool {
        self.log_json
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = raw else {
        return Ok(default);
    };
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|err| ConfigError::Invalid {
        name,
        reason: err.to_string(),
        value,
    })
}
