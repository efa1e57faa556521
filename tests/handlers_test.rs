//! Dispatcher schema routing against a mocked Bot API
//!
//! Run with: cargo test --test handlers_test

mod common;

use std::ops::ControlFlow;
use std::sync::Arc;

use common::TestEnvironment;
use serde_json::json;
use teloxide::dptree;
use teloxide::types::{ChatId, Me, Update};
use wiremock::matchers::{body_string_contains, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordly_bot::telegram::{schema, texts, ActivityReporter, Bot, HandlerDeps};

const ADMIN_ID: i64 = 777;
const USER_ID: i64 = 5;

fn message_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ok": true,
        "result": {
            "message_id": 1,
            "date": 1714555800,
            "chat": { "id": USER_ID, "type": "private", "first_name": "Иван" },
            "text": "ok"
        }
    }))
}

fn bot_for(server: &MockServer) -> Bot {
    Bot::new("123456:TEST").set_api_url(url::Url::parse(&server.uri()).unwrap())
}

fn me() -> Me {
    serde_json::from_value(json!({
        "id": 1,
        "is_bot": true,
        "first_name": "Wordly",
        "username": "wordly_bot",
        "can_join_groups": false,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
        "can_connect_to_business": false,
        "has_main_web_app": false
    }))
    .unwrap()
}

fn message_update(chat: serde_json::Value, from_id: i64, text: &str) -> Update {
    // teloxide's `Update` deserializer needs borrowed input; `from_value`
    // silently yields `UpdateKind::Error`, so go through a string.
    let value = json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "date": 1714555800,
            "chat": chat,
            "from": { "id": from_id, "is_bot": false, "first_name": "Иван" },
            "text": text
        }
    });
    serde_json::from_str(&value.to_string()).unwrap()
}

fn private_chat(id: i64) -> serde_json::Value {
    json!({ "id": id, "type": "private", "first_name": "Иван" })
}

async fn dispatch(deps: HandlerDeps, bot: Bot, update: Update) -> bool {
    let handler = schema(deps);
    match handler.dispatch(dptree::deps![bot, update, me()]).await {
        ControlFlow::Break(result) => {
            result.unwrap();
            true
        }
        ControlFlow::Continue(_) => false,
    }
}

async fn mount_send_message(server: &MockServer, text: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path_regex("(?i)/bot[^/]+/sendmessage"))
        .and(body_string_contains(text))
        .respond_with(message_response())
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_group_messages_are_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)/bot[^/]+/sendmessage"))
        .respond_with(message_response())
        .expect(0)
        .mount(&server)
        .await;

    let env = TestEnvironment::new().await;
    let deps = HandlerDeps::new(Arc::new(env.service.clone()), None, ADMIN_ID);
    let group = json!({ "id": -100, "type": "group", "title": "Слова" });

    let handled = dispatch(deps, bot_for(&server), message_update(group, USER_ID, "/play")).await;

    assert!(!handled);
    assert!(env.store.user_stats(USER_ID as u64).await.is_none());
}

#[tokio::test]
async fn test_activity_from_non_admin_is_refused() {
    let server = MockServer::start().await;
    mount_send_message(&server, texts::NOT_ADMIN, 2).await;

    let env = TestEnvironment::new().await;
    let dir = tempfile::tempdir().unwrap();
    let reporter = Arc::new(ActivityReporter::new(
        bot_for(&server),
        ChatId(ADMIN_ID),
        dir.path().join("user_activity.json"),
    ));
    let deps = HandlerDeps::new(Arc::new(env.service.clone()), Some(reporter), ADMIN_ID);

    for text in ["/activity", "/activity@wordly_bot"] {
        let update = message_update(private_chat(USER_ID), USER_ID, text);
        assert!(dispatch(deps.clone(), bot_for(&server), update).await);
    }
}

#[tokio::test]
async fn test_activity_without_configured_admin_is_refused() {
    let server = MockServer::start().await;
    mount_send_message(&server, texts::NOT_ADMIN, 1).await;

    let env = TestEnvironment::new().await;
    let deps = HandlerDeps::new(Arc::new(env.service.clone()), None, 0);

    // User id 0 must not match an unset admin
    let update = message_update(private_chat(0), 0, "/activity");
    assert!(dispatch(deps, bot_for(&server), update).await);
}

#[tokio::test]
async fn test_activity_from_admin_without_file_is_skipped() {
    let server = MockServer::start().await;
    mount_send_message(&server, texts::REPORT_SKIPPED, 1).await;

    let env = TestEnvironment::new().await;
    let dir = tempfile::tempdir().unwrap();
    let reporter = Arc::new(ActivityReporter::new(
        bot_for(&server),
        ChatId(ADMIN_ID),
        dir.path().join("user_activity.json"),
    ));
    let deps = HandlerDeps::new(Arc::new(env.service.clone()), Some(reporter), ADMIN_ID);

    let update = message_update(private_chat(ADMIN_ID), ADMIN_ID, "/activity@wordly_bot");
    assert!(dispatch(deps, bot_for(&server), update).await);
}
