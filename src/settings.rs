use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};

use crate::constants::{COUNTER_SEED, COUNTER_TICK, PROJECTS_TABLE};

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

/// Which remote store the client talks to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Supabase,
    Memory,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_backend")]
    pub store_backend: StoreBackend,

    #[serde(default)]
    pub supabase_url: String,

    #[serde(default)]
    pub supabase_anon_key: String,

    #[serde(default = "default_table")]
    pub projects_table: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,

    /// JSON file of projects loaded into the in-memory store on startup.
    #[serde(default)]
    pub seed_file: Option<String>,

    #[serde(default = "default_counter_seed")]
    pub counter_seed: i64,

    #[serde(default = "default_counter_interval")]
    pub counter_interval: String,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "AfriData".to_string()
}
fn default_backend() -> StoreBackend {
    StoreBackend::Supabase
}
fn default_table() -> String {
    PROJECTS_TABLE.to_string()
}
fn default_request_timeout() -> String {
    "10s".to_string()
}
fn default_counter_seed() -> i64 {
    COUNTER_SEED
}
fn default_counter_interval() -> String {
    humantime::format_duration(COUNTER_TICK).to_string()
}
fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            store_backend: default_backend(),
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            projects_table: default_table(),
            request_timeout: default_request_timeout(),
            seed_file: None,
            counter_seed: default_counter_seed(),
            counter_interval: default_counter_interval(),
            log_format: default_log_format(),
        }
    }
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
                    .separator("__")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Fall back to the unprefixed names the hosted dashboard exports
        config.supabase_url = fill_from_env(config.supabase_url, "SUPABASE_URL");
        config.supabase_anon_key = fill_from_env(config.supabase_anon_key, "SUPABASE_ANON_KEY");

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.store_backend == StoreBackend::Supabase {
            if self.supabase_url.trim().is_empty() {
                errors.push("SUPABASE_URL cannot be empty".to_string());
            } else if url::Url::parse(&self.supabase_url).is_err() {
                errors.push(format!("SUPABASE_URL is not a valid URL: {}", self.supabase_url));
            }
            if self.supabase_anon_key.trim().is_empty() {
                errors.push("SUPABASE_ANON_KEY cannot be empty".to_string());
            }
        }
        if self.projects_table.trim().is_empty() {
            errors.push("projects_table cannot be empty".to_string());
        }
        if let Err(e) = self.counter_tick() {
            errors.push(e.to_string());
        }
        if let Err(e) = self.request_timeout() {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn counter_tick(&self) -> Result<Duration, ConfigError> {
        parse_duration("counter_interval", &self.counter_interval)
    }

    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("request_timeout", &self.request_timeout)
    }
}

fn parse_duration(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    match humantime::parse_duration(raw.trim()) {
        Ok(d) if !d.is_zero() => Ok(d),
        Ok(_) => Err(ConfigError::Message(format!("{key} must be greater than zero"))),
        Err(e) => Err(ConfigError::Message(format!("{key} is not a duration ({raw}): {e}"))),
    }
}

fn fill_from_env(current: String, env_key: &str) -> String {
    if current.trim().is_empty() {
        env::var(env_key).unwrap_or_default()
    } else {
        current
    }
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

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("store_backend", &self.store_backend)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &self.supabase_anon_key.redact())
            .field("projects_table", &self.projects_table)
            .field("request_timeout", &self.request_timeout)
            .field("seed_file", &self.seed_file)
            .field("counter_seed", &self.counter_seed)
            .field("counter_interval", &self.counter_interval)
            .field("log_format", &self.log_format)
            .finish()
    }
}
