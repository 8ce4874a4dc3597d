use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use domain::services::{Locale, SystemClock};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    /// Email channel provider configuration
    #[serde(default)]
    pub email: EmailConfig,
    /// SMS channel provider configuration
    #[serde(default)]
    pub sms: SmsConfig,
    /// Maintenance reminder loop configuration
    #[serde(default)]
    pub reminders: RemindersConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Seconds to wait for background jobs on shutdown
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Pool settings for the persistence layer.
    pub fn pool_config(&self) -> persistence::db::DatabaseConfig {
        persistence::db::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
            idle_timeout_secs: self.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Email channel configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Email provider: sendgrid, or console (for development)
    #[serde(default = "default_email_provider")]
    pub provider: String,

    /// Sender email address (From header)
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Sender name (From header)
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Provider API base URL
    #[serde(default = "default_sendgrid_base_url")]
    pub api_base_url: String,

    /// HTTP timeout for provider calls in milliseconds
    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: default_email_provider(),
            sender_email: default_sender_email(),
            sender_name: default_sender_name(),
            api_base_url: default_sendgrid_base_url(),
            timeout_ms: default_provider_timeout_ms(),
        }
    }
}

/// SMS channel configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    /// SMS provider: twilio, or console (for development)
    #[serde(default = "default_sms_provider")]
    pub provider: String,

    /// Provider API base URL
    #[serde(default = "default_twilio_base_url")]
    pub api_base_url: String,

    /// HTTP timeout for provider calls in milliseconds
    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: default_sms_provider(),
            api_base_url: default_twilio_base_url(),
            timeout_ms: default_provider_timeout_ms(),
        }
    }
}

/// Maintenance reminder loop configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RemindersConfig {
    /// Seconds between reminder cycles (default: one day)
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,

    /// Upper bound for a single send in milliseconds; 0 disables the bound
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    /// Reminder language tag (he or en)
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Fixed UTC offset for "today"; the host timezone when unset
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    /// Skip reminders already delivered for the same threshold day
    #[serde(default = "default_deduplicate")]
    pub deduplicate: bool,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval(),
            send_timeout_ms: default_send_timeout_ms(),
            locale: default_locale(),
            utc_offset_minutes: None,
            deduplicate: default_deduplicate(),
        }
    }
}

impl RemindersConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    /// Per-send timeout, `None` when disabled.
    pub fn send_timeout(&self) -> Option<Duration> {
        (self.send_timeout_ms > 0).then(|| Duration::from_millis(self.send_timeout_ms))
    }

    /// Parsed reminder locale, Hebrew when the tag is unknown.
    pub fn locale(&self) -> Locale {
        Locale::parse(&self.locale).unwrap_or_default()
    }

    /// Clock used to determine "today".
    pub fn clock(&self) -> SystemClock {
        self.utc_offset_minutes
            .and_then(SystemClock::with_offset_minutes)
            .unwrap_or_else(SystemClock::local)
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_shutdown_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_email_provider() -> String {
    "console".to_string() // Default to console logging for development
}
fn default_sms_provider() -> String {
    "console".to_string()
}
fn default_sender_email() -> String {
    "no-reply@vehiclemanagement.com".to_string()
}
fn default_sender_name() -> String {
    "Fleet Maintenance".to_string()
}
fn default_sendgrid_base_url() -> String {
    "https://api.sendgrid.com".to_string()
}
fn default_twilio_base_url() -> String {
    "https://api.twilio.com".to_string()
}
fn default_provider_timeout_ms() -> u64 {
    10000
}
fn default_check_interval() -> u64 {
    86400 // 24 hours
}
fn default_send_timeout_ms() -> u64 {
    15000
}
fn default_locale() -> String {
    "he".to_string()
}
fn default_deduplicate() -> bool {
    true
}

const EMAIL_PROVIDERS: &[&str] = &["console", "sendgrid"];
const SMS_PROVIDERS: &[&str] = &["console", "twilio"];

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with FLEET__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("FLEET").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// This method creates a config entirely from defaults and overrides,
    /// without relying on config files (which may not be accessible during tests).
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        // Embed defaults directly to avoid file system dependency in tests
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30
            shutdown_timeout_secs = 30

            [database]
            url = ""
            max_connections = 20
            min_connections = 5
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [email]
            provider = "console"
            sender_email = "test@example.com"
            sender_name = "Test"

            [sms]
            provider = "console"

            [reminders]
            check_interval_secs = 86400
            send_timeout_ms = 15000
            locale = "he"
            deduplicate = true
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        // Database URL is required
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "FLEET__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        // Validate port range
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        self.socket_addr()?;

        // Validate connection pool settings
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.reminders.check_interval_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "reminders.check_interval_secs must be greater than 0".to_string(),
            ));
        }

        if Locale::parse(&self.reminders.locale).is_none() {
            return Err(ConfigValidationError::InvalidValue(format!(
                "Unsupported reminders.locale: {}",
                self.reminders.locale
            )));
        }

        if let Some(offset) = self.reminders.utc_offset_minutes {
            if SystemClock::with_offset_minutes(offset).is_none() {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "reminders.utc_offset_minutes out of range: {}",
                    offset
                )));
            }
        }

        if !EMAIL_PROVIDERS.contains(&self.email.provider.as_str()) {
            return Err(ConfigValidationError::InvalidValue(format!(
                "Unknown email provider: {}",
                self.email.provider
            )));
        }

        if !SMS_PROVIDERS.contains(&self.sms.provider.as_str()) {
            return Err(ConfigValidationError::InvalidValue(format!(
                "Unknown SMS provider: {}",
                self.sms.provider
            )));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|_| {
                ConfigValidationError::InvalidValue(format!(
                    "Invalid socket address {}:{}",
                    self.server.host, self.server.port
                ))
            })
    }
}
