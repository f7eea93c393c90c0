//! Configuration management for the `TicketDesk` dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Session lifecycle configuration
    #[serde(default)]
    pub sessions: SessionConfig,

    /// Synthetic ticket generation
    #[serde(default)]
    pub seed: SeedConfig,

    /// Placeholder metric values
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// Session lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of live sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Sessions untouched for this long are discarded
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// How often the idle sweeper runs
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

/// Largest accepted `seed.first_ticket_number`; the rest of the id space is
/// left for tickets created after seeding
pub const MAX_FIRST_TICKET_NUMBER: u64 = u64::MAX / 2;

/// Synthetic ticket generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Fixed RNG seed; the same seed always yields the same tickets
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,

    /// Number of tickets generated per session
    #[serde(default = "default_ticket_count")]
    pub ticket_count: usize,

    /// Numeric suffix of the first (newest) seeded ticket; ids count down from here
    #[serde(default = "default_first_ticket_number")]
    pub first_ticket_number: u64,

    /// Earliest submission date
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Submission dates fall within `start_date ..= start_date + span_days`
    #[serde(default = "default_span_days")]
    pub span_days: u32,
}

/// Placeholder metric values
///
/// Only the open-ticket count is derived from data. Response-time figures
/// and the deltas shown next to each metric are fixed demo values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// First response time in hours
    #[serde(default = "default_first_response_hours")]
    pub first_response_hours: f64,

    /// Average resolution time in hours
    #[serde(default = "default_avg_resolution_hours")]
    pub avg_resolution_hours: f64,

    /// Delta shown next to the open-ticket count
    #[serde(default = "default_open_count_delta")]
    pub open_count_delta: i64,

    /// Delta shown next to the first response time
    #[serde(default = "default_first_response_delta")]
    pub first_response_delta: f64,

    /// Delta shown next to the average resolution time
    #[serde(default = "default_avg_resolution_delta")]
    pub avg_resolution_delta: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_enable_cors() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_max_sessions() -> usize {
    1000
}

const fn default_idle_timeout_secs() -> u64 {
    3600
}

const fn default_sweep_interval_secs() -> u64 {
    60
}

const fn default_rng_seed() -> u64 {
    42
}

const fn default_ticket_count() -> usize {
    100
}

const fn default_first_ticket_number() -> u64 {
    1100
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).unwrap_or(NaiveDate::MIN)
}

const fn default_span_days() -> u32 {
    182
}

const fn default_first_response_hours() -> f64 {
    5.2
}

const fn default_avg_resolution_hours() -> f64 {
    16.0
}

const fn default_open_count_delta() -> i64 {
    10
}

const fn default_first_response_delta() -> f64 {
    -1.5
}

const fn default_avg_resolution_delta() -> f64 {
    2.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: default_enable_cors(),
            cors_origins: default_cors_origins(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            rng_seed: default_rng_seed(),
            ticket_count: default_ticket_count(),
            first_ticket_number: default_first_ticket_number(),
            start_date: default_start_date(),
            span_days: default_span_days(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            first_response_hours: default_first_response_hours(),
            avg_resolution_hours: default_avg_resolution_hours(),
            open_count_delta: default_open_count_delta(),
            first_response_delta: default_first_response_delta(),
            avg_resolution_delta: default_avg_resolution_delta(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `config` file and `TICKETDESK_*` env vars
    ///
    /// Nested keys use a double underscore: `TICKETDESK_SEED__RNG_SEED=7`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("TICKETDESK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break store invariants
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending setting.
    pub fn validate(&self) -> crate::Result<()> {
        let fail = |message: &str| {
            Err(crate::Error::Configuration {
                message: message.to_string(),
            })
        };

        if self.seed.ticket_count == 0 {
            return fail("seed.ticket_count must be at least 1");
        }
        if self.seed.first_ticket_number < self.seed.ticket_count as u64 {
            return fail("seed.first_ticket_number must be >= seed.ticket_count");
        }
        if self.seed.first_ticket_number > MAX_FIRST_TICKET_NUMBER {
            return fail("seed.first_ticket_number leaves no room for new ticket ids");
        }
        if self.sessions.max_sessions == 0 {
            return fail("sessions.max_sessions must be at least 1");
        }
        if self.sessions.sweep_interval_secs == 0 {
            return fail("sessions.sweep_interval_secs must be at least 1");
        }
        Ok(())
    }
}
