use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use recap_core::{
    Horizon, Settings, TelegramBot, WeatherApi, bot, extract,
    telegram::{self, Delivery, Notifier},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-recap", version, about = "Singapore weather recap bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a forecast and deliver it to a Telegram chat.
    Send {
        /// Forecast horizon: 2h, 24h or 96h.
        #[arg(long, value_parser = parse_horizon)]
        task: Horizon,

        /// Area for the 2-hour forecast (defaults to the configured area).
        #[arg(long)]
        area: Option<String>,

        /// Station for the 2-hour temperature/humidity readings.
        #[arg(long)]
        station: Option<String>,

        /// Chat to deliver to: numeric id or @handle. Falls back to
        /// WEATHER_CHAT_ID, then BOT_OWNER_ID.
        #[arg(long)]
        chat: Option<String>,
    },

    /// Run the long-polling bot.
    Listen,
}

fn parse_horizon(value: &str) -> Result<Horizon, String> {
    Horizon::try_from(value).map_err(|err| err.to_string())
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let settings = Settings::load()?;

        match self.command {
            Command::Send { task, area, station, chat } => {
                send_report(&settings, task, area, station, chat).await
            }
            Command::Listen => {
                let bot = TelegramBot::new(settings.telegram_token.clone());
                bot::run_polling(&bot, &settings).await
            }
        }
    }
}

async fn send_report(
    settings: &Settings,
    task: Horizon,
    area: Option<String>,
    station: Option<String>,
    chat: Option<String>,
) -> Result<()> {
    let api = WeatherApi::new(settings.api.clone());
    let area = area.unwrap_or_else(|| settings.bot.default_area.clone());
    let station = station.unwrap_or_else(|| settings.bot.default_station.clone());

    let lines = match task {
        Horizon::TwoHour => {
            let payload = api.two_hour_forecast().await?;
            let mut lines = extract::extract_forecast_2h(&payload, &area);

            // Station readings come from their own endpoints and are
            // appended after the area lines.
            let humidity = api.relative_humidity().await?;
            lines.push(extract::extract_humidity_for_station(&humidity, &station));
            let temperature = api.air_temperature().await?;
            lines.push(extract::extract_air_temperature_for_station(&temperature, &station));

            lines
        }
        Horizon::TwentyFourHour => {
            let payload = api.twenty_four_hour_forecast().await?;
            extract::extract_forecast_24h(&payload)
        }
        Horizon::FourDay => {
            let payload = api.four_day_outlook().await?;
            extract::extract_forecast_4day(&payload)
        }
    };

    let text = format!("Weather update ({task}):\n{}", lines.join("\n"));
    let target = settings.chat_target(chat.as_deref());

    let notifier: Arc<dyn Notifier> = Arc::new(TelegramBot::new(settings.telegram_token.clone()));
    telegram::send_text(notifier, text, target.clone(), Delivery::Blocking).await?;
    info!(%target, %task, "weather update sent");

    Ok(())
}
