//! Listening mode: a long-poll loop with a keyword classifier.
//!
//! Not a dialogue engine. `/start` gets a fixed greeting; free-form
//! text is classified by keyword containment; in group chats the bot
//! stays silent unless mentioned by its handle.

use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use crate::config::Settings;
use crate::telegram::{TelegramBot, Update};

const GREETING: &str = "Hello! Weather bot to get weather in Singapore.";
const HELLO_REPLY: &str = "Hello! How can I assist you today?";
const HELP_REPLY: &str = "You can use commands like /start, /help, and /info to interact with me.";
const FALLBACK_REPLY: &str = "I'm sorry, I didn't understand that. Type /help for assistance.";

const POLL_TIMEOUT_SECS: u64 = 30;
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(1);

/// Reply for free-form text, by keyword containment.
pub fn classify_response(text: &str) -> &'static str {
    let text = text.to_lowercase();
    if text.contains("hello") || text.contains("hi") {
        return HELLO_REPLY;
    }
    if text.contains("help") {
        return HELP_REPLY;
    }
    FALLBACK_REPLY
}

/// Decide what to reply to an incoming message. `None` means stay
/// silent: unknown commands, and unmentioned group chatter.
pub fn response_for(text: &str, chat_kind: &str, bot_username: &str) -> Option<String> {
    if text.starts_with("/start") {
        return Some(GREETING.to_string());
    }
    if text.starts_with('/') {
        return None;
    }

    if matches!(chat_kind, "group" | "supergroup") {
        if !text.contains(bot_username) {
            return None;
        }
        let stripped = text.replace(bot_username, "");
        return Some(classify_response(stripped.trim()).to_string());
    }

    Some(classify_response(text).to_string())
}

/// Long-poll loop: fetch updates, reply, advance the offset. Runs until
/// the process is killed; per-update errors are logged, not fatal.
pub async fn run_polling(bot: &TelegramBot, settings: &Settings) -> Result<()> {
    info!("starting bot...");
    let mut offset: Option<i64> = None;

    loop {
        let updates = match bot.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(err) => {
                error!(%err, "getUpdates failed");
                tokio::time::sleep(POLL_ERROR_PAUSE).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            if let Err(err) = handle_update(bot, settings, &update).await {
                error!(%err, update_id = update.update_id, "update caused error");
            }
        }
    }
}

async fn handle_update(bot: &TelegramBot, settings: &Settings, update: &Update) -> Result<()> {
    let Some(msg) = update.effective_message() else {
        return Ok(());
    };
    let Some(text) = msg.text.as_deref() else {
        return Ok(());
    };

    info!(chat_id = msg.chat.id, kind = %msg.chat.kind, "received: {text}");

    let Some(reply) = response_for(text, &msg.chat.kind, &settings.bot.username) else {
        return Ok(());
    };

    info!("bot response: {reply}");
    bot.send_message(msg.chat.id, &reply).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERNAME: &str = "@RecapWeatherbot";

    #[test]
    fn greeting_and_help_by_containment() {
        assert_eq!(classify_response("Hello there"), HELLO_REPLY);
        assert_eq!(classify_response("hi"), HELLO_REPLY);
        assert_eq!(classify_response("I need help"), HELP_REPLY);
        assert_eq!(classify_response("weather please"), FALLBACK_REPLY);
    }

    #[test]
    fn start_command_greets_in_any_chat() {
        assert_eq!(
            response_for("/start", "private", USERNAME).as_deref(),
            Some(GREETING)
        );
        assert_eq!(
            response_for("/start", "channel", USERNAME).as_deref(),
            Some(GREETING)
        );
    }

    #[test]
    fn unknown_commands_are_ignored() {
        assert_eq!(response_for("/weather", "private", USERNAME), None);
    }

    #[test]
    fn group_messages_require_a_mention() {
        assert_eq!(response_for("hello everyone", "group", USERNAME), None);
        assert_eq!(response_for("hello all", "supergroup", USERNAME), None);

        let reply = response_for("@RecapWeatherbot hello", "group", USERNAME);
        assert_eq!(reply.as_deref(), Some(HELLO_REPLY));
    }

    #[test]
    fn mention_is_stripped_before_classification() {
        let reply = response_for("@RecapWeatherbot help me", "supergroup", USERNAME);
        assert_eq!(reply.as_deref(), Some(HELP_REPLY));
    }

    #[test]
    fn private_chats_classify_directly() {
        assert_eq!(
            response_for("weather please", "private", USERNAME).as_deref(),
            Some(FALLBACK_REPLY)
        );
    }

    #[test]
    fn containment_matches_inside_words() {
        // "anything" contains "hi": classification is by substring, not
        // word boundary.
        assert_eq!(classify_response("anything else"), HELLO_REPLY);
        assert_eq!(
            response_for("anything else", "private", USERNAME).as_deref(),
            Some(HELLO_REPLY)
        );
    }
}
