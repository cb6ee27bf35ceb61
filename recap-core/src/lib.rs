//! Core library for the `weather-recap` bot.
//!
//! This crate defines:
//! - Settings handling (env secrets plus an optional TOML file)
//! - A client for the data.gov.sg real-time weather API
//! - Pure extractors turning raw payloads into report lines
//! - A Telegram client, the notifier seam, and the listening-mode loop
//!
//! It is used by `recap-cli`, but can also be reused by other binaries or services.

pub mod bot;
pub mod config;
pub mod extract;
pub mod forecast;
pub mod model;
pub mod telegram;

pub use config::{ApiConfig, BotConfig, FileConfig, Settings};
pub use forecast::WeatherApi;
pub use model::Horizon;
pub use telegram::{Delivery, Notifier, TelegramBot, TelegramError};
