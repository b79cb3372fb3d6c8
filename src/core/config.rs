use super::date::DEFAULT_UTC_OFFSET_HOURS;
use super::filter::MIN_OFFER_AMOUNT;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::debug;

pub const FINNHUB_API_KEY: &str = "FINNHUB_API_KEY";
pub const SENDGRID_API_KEY: &str = "SENDGRID_API_KEY";
pub const SENDER_EMAIL: &str = "SENDER_EMAIL";
pub const RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing credentials: {}. Set them in the environment or the config file.", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FinnhubProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SendGridProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_finnhub")]
    pub finnhub: FinnhubProviderConfig,
    #[serde(default = "default_sendgrid")]
    pub sendgrid: SendGridProviderConfig,
}

fn default_finnhub() -> FinnhubProviderConfig {
    FinnhubProviderConfig {
        base_url: "https://finnhub.io".to_string(),
    }
}

fn default_sendgrid() -> SendGridProviderConfig {
    SendGridProviderConfig {
        base_url: "https://api.sendgrid.com".to_string(),
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            finnhub: default_finnhub(),
            sendgrid: default_sendgrid(),
        }
    }
}

/// Credentials as written in the config file. Environment variables win.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CredentialsConfig {
    pub finnhub_api_key: Option<String>,
    pub sendgrid_api_key: Option<String>,
    pub sender_email: Option<String>,
    pub recipient_email: Option<String>,
}

impl CredentialsConfig {
    /// Overlays values found through `lookup` (normally the environment).
    pub fn merged_with(&self, lookup: impl Fn(&str) -> Option<String>) -> CredentialsConfig {
        let pick = |key: &str, file_value: &Option<String>| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .or_else(|| file_value.clone())
        };
        CredentialsConfig {
            finnhub_api_key: pick(FINNHUB_API_KEY, &self.finnhub_api_key),
            sendgrid_api_key: pick(SENDGRID_API_KEY, &self.sendgrid_api_key),
            sender_email: pick(SENDER_EMAIL, &self.sender_email),
            recipient_email: pick(RECIPIENT_EMAIL, &self.recipient_email),
        }
    }

    pub fn with_env(&self) -> CredentialsConfig {
        self.merged_with(|key| std::env::var(key).ok())
    }

    /// Validates that everything needed to fetch and mail a report is set.
    pub fn validate(&self) -> Result<Credentials, ConfigError> {
        let fields = [
            (FINNHUB_API_KEY, &self.finnhub_api_key),
            (SENDGRID_API_KEY, &self.sendgrid_api_key),
            (SENDER_EMAIL, &self.sender_email),
            (RECIPIENT_EMAIL, &self.recipient_email),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| present(value).is_none())
            .map(|(key, _)| *key)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        Ok(Credentials {
            finnhub_api_key: self.finnhub_api_key.clone().unwrap_or_default(),
            sendgrid_api_key: self.sendgrid_api_key.clone().unwrap_or_default(),
            sender_email: self.sender_email.clone().unwrap_or_default(),
            recipient_email: self.recipient_email.clone().unwrap_or_default(),
        })
    }

    /// Validates only the calendar key, for runs that do not send mail.
    pub fn calendar_key(&self) -> Result<String, ConfigError> {
        present(&self.finnhub_api_key)
            .map(str::to_string)
            .ok_or(ConfigError::MissingCredentials(vec![FINNHUB_API_KEY]))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Validated credentials.
#[derive(Clone)]
pub struct Credentials {
    pub finnhub_api_key: String,
    pub sendgrid_api_key: String,
    pub sender_email: String,
    pub recipient_email: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("finnhub_api_key", &"***")
            .field("sendgrid_api_key", &"***")
            .field("sender_email", &self.sender_email)
            .field("recipient_email", &self.recipient_email)
            .finish()
    }
}

fn default_min_offer_amount() -> f64 {
    MIN_OFFER_AMOUNT
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_min_offer_amount")]
    pub min_offer_amount: f64,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            min_offer_amount: MIN_OFFER_AMOUNT,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            credentials: CredentialsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or defaults when there
    /// is no config file.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "ipo-watch", "ipo-watch")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
