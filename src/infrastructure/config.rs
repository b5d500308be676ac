//! # Service Configuration
//!
//! Immutable configuration built once at start-up and passed to every
//! component constructor.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. An optional file named by `LOYALTY_CONFIG` (TOML, YAML, JSON, ...)
//! 3. Environment variables `LOYALTY__<SECTION>__<KEY>`, e.g.
//!    `LOYALTY__FX__HOST` or `LOYALTY__CIRCUIT_BREAKER__MAX_FAILURES`
//!
//! A `.env` file is loaded into the environment by the binary before
//! [`AppConfig::load`] runs.
//!
//! # Examples
//!
//! ```
//! use loyalty_quote::infrastructure::config::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.points.cap, 50_000);
//! assert_eq!(config.fx_base_url(), "http://localhost:8081");
//! assert!(config.validate().is_ok());
//! ```

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming an optional configuration file.
pub const CONFIG_FILE_ENV: &str = "LOYALTY_CONFIG";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "LOYALTY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
}

/// FX service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FxConfig {
    /// Host name, optionally with a scheme.
    pub host: String,
    /// Port.
    pub port: u16,
    /// Delay before the single retry, in milliseconds.
    pub retry_delay_ms: u64,
}

/// Promotion service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromoConfig {
    /// Host name, optionally with a scheme.
    pub host: String,
    /// Port.
    pub port: u16,
    /// Deadline after which the neutral promotion is used, in milliseconds.
    pub timeout_ms: u64,
}

/// Points settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PointsConfig {
    /// Maximum total points per quote.
    pub cap: u64,
}

/// FX circuit breaker settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CircuitBreakerSettings {
    /// Consecutive failures that open the breaker.
    pub max_failures: u32,
    /// Per-call timeout, in milliseconds.
    pub timeout_ms: u64,
    /// Time spent open before a trial call, in milliseconds.
    pub reset_timeout_ms: u64,
}

/// Underlying HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpClientConfig {
    /// Hard limit for any single upstream request, in milliseconds.
    pub request_timeout_ms: u64,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// FX service.
    pub fx: FxConfig,
    /// Promotion service.
    pub promo: PromoConfig,
    /// Points.
    pub points: PointsConfig,
    /// FX circuit breaker.
    pub circuit_breaker: CircuitBreakerSettings,
    /// Underlying HTTP client.
    pub http: HttpClientConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig { port: 8080 },
            fx: FxConfig {
                host: "localhost".to_string(),
                port: 8081,
                retry_delay_ms: 100,
            },
            promo: PromoConfig {
                host: "localhost".to_string(),
                port: 8082,
                timeout_ms: 300,
            },
            points: PointsConfig { cap: 50_000 },
            circuit_breaker: CircuitBreakerSettings {
                max_failures: 2,
                timeout_ms: 800,
                reset_timeout_ms: 3000,
            },
            http: HttpClientConfig {
                request_timeout_ms: 5000,
            },
            logging: LoggingConfig {
                format: LogFormat::Text,
            },
        }
    }
}

impl AppConfig {
    /// Loads configuration from defaults, the optional file named by
    /// `LOYALTY_CONFIG` and `LOYALTY__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Source` if a source cannot be read or a value
    /// has the wrong type, `ConfigError::Invalid` if validation fails.
    pub fn load() -> ConfigResult<Self> {
        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::from_sources(
            file.as_deref().map(Path::new),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    /// Builds configuration from an optional file and an environment source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Source` if a source cannot be read or a value
    /// has the wrong type, `ConfigError::Invalid` if validation fails.
    pub fn from_sources(file: Option<&Path>, environment: Environment) -> ConfigResult<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("fx.host", defaults.fx.host.as_str())?
            .set_default("fx.port", i64::from(defaults.fx.port))?
            .set_default("fx.retry_delay_ms", to_i64(defaults.fx.retry_delay_ms))?
            .set_default("promo.host", defaults.promo.host.as_str())?
            .set_default("promo.port", i64::from(defaults.promo.port))?
            .set_default("promo.timeout_ms", to_i64(defaults.promo.timeout_ms))?
            .set_default("points.cap", to_i64(defaults.points.cap))?
            .set_default(
                "circuit_breaker.max_failures",
                i64::from(defaults.circuit_breaker.max_failures),
            )?
            .set_default(
                "circuit_breaker.timeout_ms",
                to_i64(defaults.circuit_breaker.timeout_ms),
            )?
            .set_default(
                "circuit_breaker.reset_timeout_ms",
                to_i64(defaults.circuit_breaker.reset_timeout_ms),
            )?
            .set_default(
                "http.request_timeout_ms",
                to_i64(defaults.http.request_timeout_ms),
            )?
            .set_default("logging.format", "text")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(
                environment
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending key.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fx.host.trim().is_empty() {
            return Err(ConfigError::invalid("fx.host must not be empty"));
        }
        if self.promo.host.trim().is_empty() {
            return Err(ConfigError::invalid("promo.host must not be empty"));
        }
        if self.server.port == 0 || self.fx.port == 0 || self.promo.port == 0 {
            return Err(ConfigError::invalid("ports must be non-zero"));
        }
        if self.points.cap == 0 {
            return Err(ConfigError::invalid("points.cap must be positive"));
        }
        if self.promo.timeout_ms == 0 {
            return Err(ConfigError::invalid("promo.timeout_ms must be positive"));
        }
        if self.circuit_breaker.max_failures == 0 {
            return Err(ConfigError::invalid(
                "circuit_breaker.max_failures must be positive",
            ));
        }
        if self.circuit_breaker.timeout_ms == 0 || self.circuit_breaker.reset_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "circuit_breaker timeouts must be positive",
            ));
        }
        if self.http.request_timeout_ms == 0 {
            return Err(ConfigError::invalid("http.request_timeout_ms must be positive"));
        }
        Ok(())
    }

    /// Base URL of the FX service.
    #[must_use]
    pub fn fx_base_url(&self) -> String {
        base_url(&self.fx.host, self.fx.port)
    }

    /// Base URL of the promotion service.
    #[must_use]
    pub fn promo_base_url(&self) -> String {
        base_url(&self.promo.host, self.promo.port)
    }
}

fn base_url(host: &str, port: u16) -> String {
    if host.contains("://") {
        format!("{}:{}", host.trim_end_matches('/'), port)
    } else {
        format!("http://{}:{}", host, port)
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
