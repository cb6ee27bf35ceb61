//! Minimal Telegram Bot API client.
//!
//! Speaks the HTTP Bot API directly: every method is a POST returning
//! the usual `{ok, result, description}` envelope. Only the handful of
//! methods this bot needs are wrapped.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;
use tracing::{info, warn};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("Invalid chat identifier '{0}': expected a numeric id or an @handle")]
    InvalidChat(String),
}

/// Envelope every Bot API method responds with.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// "private", "group", "supergroup", or "channel".
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub channel_post: Option<Message>,
}

impl Update {
    /// The message this update is effectively about, if any.
    pub fn effective_message(&self) -> Option<&Message> {
        self.message.as_ref().or(self.channel_post.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct TelegramBot {
    token: String,
    base_url: String,
    http: Client,
}

impl TelegramBot {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, TELEGRAM_API_BASE.to_string())
    }

    /// Same as [`TelegramBot::new`] with an overridable API base, for
    /// pointing the client at a local mock server.
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self { token, base_url, http: Client::new() }
    }

    /// Send plain text to a numeric chat id, link previews disabled.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, TelegramError> {
        self.call(
            "sendMessage",
            &json!({
                "chat_id": chat_id,
                "text": text,
                "disable_web_page_preview": true,
            }),
        )
        .await
    }

    /// Look up a chat by "@handle" (or numeric id string).
    pub async fn get_chat(&self, chat: &str) -> Result<Chat, TelegramError> {
        self.call("getChat", &json!({ "chat_id": chat })).await
    }

    /// Long-poll for updates past `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let mut payload = json!({ "timeout": timeout_secs });
        if let Some(offset) = offset {
            payload["offset"] = json!(offset);
        }
        self.call("getUpdates", &payload).await
    }

    /// Resolve a chat target to a numeric id: an "@handle" goes through
    /// `getChat`, anything else must parse as a numeric id verbatim.
    pub async fn resolve_chat_id(&self, target: &str) -> Result<i64, TelegramError> {
        if target.starts_with('@') {
            Ok(self.get_chat(target).await?.id)
        } else {
            target
                .trim()
                .parse()
                .map_err(|_| TelegramError::InvalidChat(target.to_string()))
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
    ) -> Result<T, TelegramError> {
        let url = format!("{}/bot{}/{}", self.base_url.trim_end_matches('/'), self.token, method);

        let res = self.http.post(&url).json(payload).send().await?;
        let status = res.status();
        let body = res.text().await?;

        // The Bot API reports failures inside the envelope, also on
        // non-2xx responses, so parse the body before checking status.
        let parsed: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) => {
                return Err(TelegramError::Api(format!(
                    "{method} failed with status {status}: {}",
                    truncate_body(&body),
                )));
            }
        };

        if !parsed.ok {
            return Err(TelegramError::Api(
                parsed.description.unwrap_or_else(|| format!("{method} failed")),
            ));
        }

        parsed
            .result
            .ok_or_else(|| TelegramError::Api(format!("{method} returned no result")))
    }
}

/// Delivery seam so the report pipeline can be tested without Telegram.
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    async fn send(&self, text: &str, chat: &str) -> Result<(), TelegramError>;
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send(&self, text: &str, chat: &str) -> Result<(), TelegramError> {
        let chat_id = self.resolve_chat_id(chat).await?;
        self.send_message(chat_id, text).await?;
        info!(chat_id, "message delivered");
        Ok(())
    }
}

/// Execution context of the caller, supplied explicitly instead of
/// inspecting the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// One-shot script: run the send to completion.
    Blocking,
    /// Async host (e.g. a web server): detach the send as a task.
    /// Fire-and-forget; failures are only logged.
    Background,
}

pub async fn send_text(
    notifier: Arc<dyn Notifier>,
    text: String,
    chat: String,
    delivery: Delivery,
) -> Result<(), TelegramError> {
    match delivery {
        Delivery::Blocking => notifier.send(&text, &chat).await,
        Delivery::Background => {
            tokio::spawn(async move {
                if let Err(err) = notifier.send(&text, &chat).await {
                    warn!(%err, "background send failed");
                }
            });
            Ok(())
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // back off to a char boundary so the slice cannot panic
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}
