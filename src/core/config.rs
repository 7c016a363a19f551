use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use tracing::debug;

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
pub const GOLD_API_TOKEN_VAR: &str = "GOLDAPI";

/// How the report sections are turned into chat messages.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// One message per section; a failed send stops the remaining ones.
    #[default]
    Sequential,
    /// All sections in a single message.
    Combined,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateStyle {
    /// A single `¥1 = HK$0.0523` line.
    #[default]
    Compact,
    /// Adds the inverse rate, the provider and its update time.
    Extended,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RateConfig {
    pub base: String,
    pub target: String,
    pub decimals: usize,
    pub style: RateStyle,
}

impl Default for RateConfig {
    fn default() -> Self {
        RateConfig {
            base: "JPY".to_string(),
            target: "HKD".to_string(),
            decimals: 4,
            style: RateStyle::Compact,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub metal: String,
    pub currency: String,
    pub rate: RateConfig,
    pub include_banner: bool,
    pub delivery: DeliveryMode,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            metal: "XAU".to_string(),
            currency: "USD".to_string(),
            rate: RateConfig::default(),
            include_banner: false,
            delivery: DeliveryMode::Sequential,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GoldApiProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TelegramProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub goldapi: Option<GoldApiProviderConfig>,
    pub exchange_rate: Option<ExchangeRateProviderConfig>,
    pub telegram: Option<TelegramProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            goldapi: Some(GoldApiProviderConfig {
                base_url: "https://www.goldapi.io".to_string(),
            }),
            exchange_rate: Some(ExchangeRateProviderConfig {
                base_url: "https://open.er-api.com".to_string(),
            }),
            telegram: Some(TelegramProviderConfig {
                base_url: "https://api.telegram.org".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the config file at the default location, or the built-in defaults
    /// when there is none.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "goldbrief", "goldbrief")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let report = &self.report;
        for (field, code) in [
            ("report.metal", &report.metal),
            ("report.currency", &report.currency),
            ("report.rate.base", &report.rate.base),
            ("report.rate.target", &report.rate.target),
        ] {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                bail!("{field} must be a three-letter upper-case code, got '{code}'");
            }
        }
        if !(1..=8).contains(&report.rate.decimals) {
            bail!(
                "report.rate.decimals must be between 1 and 8, got {}",
                report.rate.decimals
            );
        }
        Ok(())
    }

    pub fn goldapi_base_url(&self) -> &str {
        self.providers
            .goldapi
            .as_ref()
            .map_or("https://www.goldapi.io", |p| &p.base_url)
    }

    pub fn exchange_rate_base_url(&self) -> &str {
        self.providers
            .exchange_rate
            .as_ref()
            .map_or("https://open.er-api.com", |p| &p.base_url)
    }

    pub fn telegram_base_url(&self) -> &str {
        self.providers
            .telegram
            .as_ref()
            .map_or("https://api.telegram.org", |p| &p.base_url)
    }
}

/// Secrets read from the environment once at startup.
#[derive(Clone)]
pub struct Credentials {
    pub bot_token: String,
    pub chat_id: String,
    pub gold_api_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("gold_api_token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("{key} must be set"))
        };

        Ok(Credentials {
            bot_token: required(BOT_TOKEN_VAR)?,
            chat_id: required(CHAT_ID_VAR)?,
            gold_api_token: required(GOLD_API_TOKEN_VAR)?,
        })
    }
}
