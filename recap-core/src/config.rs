use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{env, fs, path::PathBuf};

/// Endpoint layout of the data.gov.sg real-time weather API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub two_hour_path: String,
    pub twenty_four_hour_path: String,
    pub four_day_path: String,
    pub air_temperature_path: String,
    pub relative_humidity_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-open.data.gov.sg/v2/real-time/api".to_string(),
            two_hour_path: "two-hr-forecast".to_string(),
            twenty_four_hour_path: "twenty-four-hr-forecast".to_string(),
            four_day_path: "four-day-outlook".to_string(),
            air_temperature_path: "air-temperature".to_string(),
            relative_humidity_path: "relative-humidity".to_string(),
        }
    }
}

/// Bot identity and report defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Handle the bot must be mentioned by in group chats.
    pub username: String,
    pub default_area: String,
    pub default_station: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            username: "@RecapWeatherbot".to_string(),
            default_area: "Bukit Merah".to_string(),
            default_station: "Scotts Road".to_string(),
        }
    }
}

/// On-disk configuration. The file is optional; every field has a
/// compiled-in default, so a partial file only overrides what it names.
///
/// Example TOML:
/// ```toml
/// [api]
/// base_url = "https://api-open.data.gov.sg/v2/real-time/api"
///
/// [bot]
/// default_area = "Queenstown"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub api: ApiConfig,
    pub bot: BotConfig,
}

impl FileConfig {
    /// Load config from disk, or return defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-recap", "weather-recap")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Fully-resolved runtime settings: file config plus env secrets.
#[derive(Debug, Clone)]
pub struct Settings {
    pub telegram_token: String,
    pub owner_id: String,
    pub weather_chat_id: Option<String>,
    pub api: ApiConfig,
    pub bot: BotConfig,
}

impl Settings {
    /// Read secrets from the environment and merge the optional config
    /// file. Missing required variables fail here, before any network
    /// call is made.
    pub fn load() -> Result<Self> {
        let file = FileConfig::load()?;

        Ok(Self {
            telegram_token: require_env("TELEGRAM_API_KEY")?,
            owner_id: require_env("BOT_OWNER_ID")?,
            weather_chat_id: env::var("WEATHER_CHAT_ID").ok(),
            api: file.api,
            bot: file.bot,
        })
    }

    /// Chat target precedence: explicit argument, then `WEATHER_CHAT_ID`,
    /// then the owner id.
    pub fn chat_target(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.weather_chat_id.clone())
            .unwrap_or_else(|| self.owner_id.clone())
    }
}

fn require_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| anyhow!("Environment variable '{key}' not found."))
}
