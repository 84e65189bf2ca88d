//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Fiscal calendar configuration.
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Department capacity configuration.
    #[serde(default)]
    pub capacity: CapacityConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Fiscal calendar configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// IANA timezone used to decide what "today" is.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Number of fiscal years offered either side of the current one.
    #[serde(default = "default_year_window")]
    pub year_window: u32,
}

fn default_timezone() -> String {
    "Africa/Nairobi".to_string()
}

fn default_year_window() -> u32 {
    5
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            year_window: default_year_window(),
        }
    }
}

/// Department capacity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CapacityConfig {
    /// Active/capacity ratio at which a department is flagged.
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: Decimal,
    /// Capacity assumed for departments without one on record.
    #[serde(default = "default_max_capacity")]
    pub default_max_capacity: u32,
}

fn default_warning_threshold() -> Decimal {
    Decimal::new(8, 1) // 0.8
}

fn default_max_capacity() -> u32 {
    10
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            warning_threshold: default_warning_threshold(),
            default_max_capacity: default_max_capacity(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "attachee_core=info,attachee_db=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, config files and environment.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `ATTACHEE__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ATTACHEE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
