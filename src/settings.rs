use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Postgres connection string. Without one the API runs on the memory store.
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Transactional mail endpoint. Notifications are sent only when the
    /// URL, key, sender and recipient are all present.
    #[serde(default)]
    pub email_api_url: Option<String>,

    #[serde(default)]
    pub email_api_key: Option<String>,

    #[serde(default)]
    pub email_from: Option<String>,

    #[serde(default)]
    pub email_to: Option<String>,

    #[serde(default = "default_email_timeout")]
    pub email_timeout_secs: u64,

    #[serde(default = "default_contact_email_limit")]
    pub contact_email_limit: u64,

    #[serde(default = "default_contact_email_window")]
    pub contact_email_window_secs: u64,

    #[serde(default = "default_contact_ip_limit")]
    pub contact_ip_limit: u64,

    #[serde(default = "default_contact_ip_window")]
    pub contact_ip_window_secs: u64,

    #[serde(default)]
    pub trust_forwarded_for: bool,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-API".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_email_timeout() -> u64 {
    10
}
fn default_contact_email_limit() -> u64 {
    2
}
fn default_contact_email_window() -> u64 {
    3600
}
fn default_contact_ip_limit() -> u64 {
    5
}
fn default_contact_ip_window() -> u64 {
    60
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true)
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Blank strings from .env files count as unset
        config.database_url = non_blank(config.database_url);
        config.email_api_url = non_blank(config.email_api_url);
        config.email_api_key = non_blank(config.email_api_key);
        config.email_from = non_blank(config.email_from);
        config.email_to = non_blank(config.email_to);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.port == 0 && self.env != AppEnvironment::Testing {
            errors.push("PORT cannot be 0");
        }
        if self.worker_count == 0 {
            errors.push("WORKER_COUNT must be at least 1");
        }
        if self.contact_email_limit == 0 || self.contact_ip_limit == 0 {
            errors.push("Contact rate limits must be at least 1");
        }
        if self.contact_email_window_secs == 0 || self.contact_ip_window_secs == 0 {
            errors.push("Contact rate limit windows must be at least 1 second");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            Some(value) if !value.is_empty() => "[REDACTED]",
            _ => "[MISSING]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("email_api_url", &self.email_api_url)
            .field("email_api_key", &self.email_api_key.redact())
            .field("email_from", &self.email_from)
            .field("email_to", &self.email_to)
            .field("email_timeout_secs", &self.email_timeout_secs)
            .field("contact_email_limit", &self.contact_email_limit)
            .field("contact_email_window_secs", &self.contact_email_window_secs)
            .field("contact_ip_limit", &self.contact_ip_limit)
            .field("contact_ip_window_secs", &self.contact_ip_window_secs)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .finish()
    }
}
