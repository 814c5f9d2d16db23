mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use teamchat_server::chat;

async fn setup_with_channel() -> (TestServer, sqlx::SqlitePool, String, String) {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool.clone());
    let server = TestServer::new(app).unwrap();

    let (user_id, _, channel_id) = common::seed_channel(&pool).await;

    (server, pool, user_id, channel_id)
}

#[tokio::test]
async fn send_message_returns_hydrated_view() {
    let (server, _, user_id, channel_id) = setup_with_channel().await;

    let res = server
        .post("/messages")
        .json(&json!({ "channelId": channel_id, "userId": user_id, "content": "hello" }))
        .await;

    res.assert_status_ok();
    let body: serde_json::Value = res.json();
    assert_eq!(body["channelId"], channel_id);
    assert_eq!(body["content"], "hello");
    assert_eq!(body["user"]["id"], user_id);
    assert_eq!(body["user"]["name"], "alice");
    assert_eq!(body["reactions"], json!([]));
    assert_eq!(body["isPinned"], false);
    assert!(body["pinnedBy"].is_null());
    assert!(body["pinnedAt"].is_null());
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn send_message_accepts_snake_case() {
    let (server, _, user_id, channel_id) = setup_with_channel().await;

    let res = server
        .post("/messages")
        .json(&json!({ "channel_id": channel_id, "user_id": user_id, "content": "hi" }))
        .await;

    res.assert_status_ok();
}

#[tokio::test]
async fn list_messages_in_send_order() {
    let (server, _, user_id, channel_id) = setup_with_channel().await;

    for content in ["one", "two", "three"] {
        server
            .post("/messages")
            .json(&json!({ "channelId": channel_id, "userId": user_id, "content": content }))
            .await
            .assert_status_ok();
    }

    let res = server
        .get("/messages")
        .add_query_param("channel_id", &channel_id)
        .await;

    res.assert_status_ok();
    let body: Vec<serde_json::Value> = res.json();
    let contents: Vec<&str> = body.iter().map(|m| m["content"].as_str().unwrap()).collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
    assert!(body.iter().all(|m| m["user"]["id"] == user_id));
}

#[tokio::test]
async fn list_messages_includes_reaction_summaries() {
    let (server, pool, user_id, channel_id) = setup_with_channel().await;
    let bob = common::create_test_user(&pool, "bob", "bob@test.com").await;
    let message_id = common::insert_message(&pool, &channel_id, &user_id, "react to me").await;

    for (who, emoji) in [(&user_id, "👍"), (&bob, "👍"), (&bob, "🎉")] {
        server
            .post("/reactions")
            .json(&json!({ "messageId": message_id, "userId": who, "emoji": emoji }))
            .await
            .assert_status_ok();
    }

    let body: Vec<serde_json::Value> = server
        .get("/messages")
        .add_query_param("channelId", &channel_id)
        .await
        .json();

    assert_eq!(
        body[0]["reactions"],
        json!([
            { "emoji": "👍", "count": 2, "users": [user_id, bob] },
            { "emoji": "🎉", "count": 1, "users": [bob] },
        ])
    );
}

#[tokio::test]
async fn list_messages_unknown_channel_is_empty() {
    let (server, _, _, _) = setup_with_channel().await;

    let res = server
        .get("/messages")
        .add_query_param("channel_id", "missing")
        .await;

    res.assert_status_ok();
    let body: Vec<serde_json::Value> = res.json();
    assert!(body.is_empty());
}

#[tokio::test]
async fn send_to_unknown_channel() {
    let (server, pool, user_id, _) = setup_with_channel().await;

    let res = server
        .post("/messages")
        .json(&json!({ "channelId": "missing", "userId": user_id, "content": "hello" }))
        .await;

    res.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json();
    assert_eq!(body["error"], "Channel not found");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn send_as_unknown_user() {
    let (server, _, _, channel_id) = setup_with_channel().await;

    let res = server
        .post("/messages")
        .json(&json!({ "channelId": channel_id, "userId": "ghost", "content": "boo" }))
        .await;

    res.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json();
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn empty_content_rejected() {
    let (server, _, user_id, channel_id) = setup_with_channel().await;

    let res = server
        .post("/messages")
        .json(&json!({ "channelId": channel_id, "userId": user_id, "content": "   " }))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json();
    assert_eq!(body["error"], "Message content is required");
}

#[tokio::test]
async fn oversized_content_rejected() {
    let (server, _, user_id, channel_id) = setup_with_channel().await;

    let res = server
        .post("/messages")
        .json(&json!({ "channelId": channel_id, "userId": user_id, "content": "x".repeat(4001) }))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_messages_beyond_sqlite_variable_limit() {
    const COUNT: i64 = 33_000;

    let (_, pool, user_id, channel_id) = setup_with_channel().await;
    let bob = common::create_test_user(&pool, "bob", "bob@test.com").await;

    sqlx::query(
        r#"WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < ?)
           INSERT INTO "messages" (id, channel_id, user_id, content, created_at)
           SELECT 'bulk-' || n, ?, CASE n % 2 WHEN 0 THEN ? ELSE ? END, 'message ' || n,
                  '2026-01-01T00:00:00.' || printf('%06d', n) || 'Z'
           FROM seq"#,
    )
    .bind(COUNT)
    .bind(&channel_id)
    .bind(&user_id)
    .bind(&bob)
    .execute(&pool)
    .await
    .unwrap();

    let state = common::create_test_state(pool.clone());
    let last_id = format!("bulk-{}", COUNT);
    chat::toggle_reaction(&state, &last_id, &user_id, "👍").await.unwrap();

    let views = chat::list_messages(&state, &channel_id).await.unwrap();

    assert_eq!(views.len(), COUNT as usize);
    assert_eq!(views[0].content, "message 1");
    assert_eq!(views[0].user.as_ref().unwrap().id, bob);
    assert_eq!(views[1].user.as_ref().unwrap().id, user_id);

    let last = views.last().unwrap();
    assert_eq!(last.id, last_id);
    assert_eq!(last.reactions.len(), 1);
    assert_eq!(last.reactions[0].users, vec![user_id.clone()]);
}
