//! Integration tests for the Telegram client, against a local mock
//! server standing in for the Bot API.

use recap_core::{TelegramBot, TelegramError};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

const TOKEN: &str = "123:test-token";

fn bot_for(server: &MockServer) -> TelegramBot {
    TelegramBot::with_base_url(TOKEN.to_string(), server.uri())
}

#[tokio::test]
async fn send_message_disables_link_previews() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_partial_json(json!({
            "chat_id": 42,
            "text": "Weather update (24h):\nTemperature - Low: 24°C, High: 31°C",
            "disable_web_page_preview": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "message_id": 1,
                "chat": { "id": 42, "type": "private" },
                "text": "Weather update (24h):\nTemperature - Low: 24°C, High: 31°C"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let msg = bot_for(&server)
        .send_message(42, "Weather update (24h):\nTemperature - Low: 24°C, High: 31°C")
        .await
        .expect("send must succeed");

    assert_eq!(msg.chat.id, 42);
}

#[tokio::test]
async fn handle_target_resolves_through_get_chat() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getChat")))
        .and(body_partial_json(json!({ "chat_id": "@weatherchannel" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": { "id": -1001234567890_i64, "type": "channel", "title": "Weather" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = bot_for(&server)
        .resolve_chat_id("@weatherchannel")
        .await
        .expect("handle lookup must succeed");

    assert_eq!(id, -1001234567890);
}

#[tokio::test]
async fn numeric_target_is_used_verbatim() {
    // No mock server interaction expected for a numeric id.
    let server = MockServer::start().await;

    let id = bot_for(&server)
        .resolve_chat_id("12345")
        .await
        .expect("numeric id must parse");

    assert_eq!(id, 12345);
}

#[tokio::test]
async fn garbage_target_is_rejected() {
    let server = MockServer::start().await;

    let err = bot_for(&server)
        .resolve_chat_id("not-a-chat")
        .await
        .expect_err("non-numeric non-handle must fail");

    assert!(matches!(err, TelegramError::InvalidChat(_)));
}

#[tokio::test]
async fn api_level_failure_carries_the_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = bot_for(&server)
        .send_message(999, "hello")
        .await
        .expect_err("api failure must surface");

    assert!(err.to_string().contains("Bad Request: chat not found"));
}

#[tokio::test]
async fn get_updates_decodes_messages_and_channel_posts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": [
                {
                    "update_id": 100,
                    "message": {
                        "message_id": 7,
                        "chat": { "id": 5, "type": "private" },
                        "text": "hello"
                    }
                },
                {
                    "update_id": 101,
                    "channel_post": {
                        "message_id": 8,
                        "chat": { "id": -100, "type": "channel", "title": "Weather" },
                        "text": "/start"
                    }
                }
            ]
        })))
        .mount(&server)
        .await;

    let updates = bot_for(&server)
        .get_updates(None, 0)
        .await
        .expect("poll must succeed");

    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].effective_message().unwrap().text.as_deref(), Some("hello"));
    assert_eq!(updates[1].effective_message().unwrap().chat.kind, "channel");
}
