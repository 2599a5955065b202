use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chatroom::{app, clock::Clock, db::Participant, store::Store, sweeper::Sweeper, config::SweepConfig, AppState};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

async fn setup() -> (Router, Store) {
    let store = Store::in_memory().await.unwrap();
    let app = app(AppState { store: store.clone(), clock: Clock::default() });
    (app, store)
}

async fn send(app: &Router, method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        request = request.header("user", user);
    }
    let request = match body {
        Some(body) => request
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

#[tokio::test]
async fn alice_joins_posts_and_bob_reads() {
    let (app, _) = setup().await;

    let (status, _) = send(&app, "POST", "/participants", None, Some(json!({ "name": "Alice" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/participants", None, Some(json!({ "name": "Alice" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let message = json!({ "to": "Todos", "text": "hi", "type": "message" });
    let (status, _) = send(&app, "POST", "/messages", Some("Alice"), Some(message)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/messages", Some("Bob"), None).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["from"], "Alice");
    assert_eq!(messages[0]["to"], "Todos");
    assert_eq!(messages[0]["text"], "hi");
    assert_eq!(messages[0]["type"], "message");
    assert!(!messages[0]["time"].as_str().unwrap().is_empty());
    assert!(messages[0]["_id"].is_string());

    let (status, body) = send(&app, "GET", "/participants", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Alice");
    assert!(body[0]["lastStatus"].is_i64());
}

#[tokio::test]
async fn invalid_participant_bodies_are_unprocessable() {
    let (app, _) = setup().await;

    for body in [json!({}), json!({ "name": "" }), json!({ "name": 7 })] {
        let (status, detail) = send(&app, "POST", "/participants", None, Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(detail["error"].is_string());
    }
}

#[tokio::test]
async fn heartbeat_requires_a_registered_user() {
    let (app, store) = setup().await;

    let (status, _) = send(&app, "POST", "/status", Some("Ghost"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "POST", "/status", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(store.find_participants().await.unwrap().is_empty());

    store.insert_participant(&Participant { name: "Bob".into(), last_status: 0 }).await.unwrap();
    let (status, _) = send(&app, "POST", "/status", Some("Bob"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.find_participant("Bob").await.unwrap().unwrap().last_status > 0);
}

#[tokio::test]
async fn posting_checks_body_then_sender() {
    let (app, _) = setup().await;

    let status_msg = json!({ "to": "Todos", "text": "hi", "type": "status" });
    let (status, _) = send(&app, "POST", "/messages", Some("Ghost"), Some(status_msg)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let valid = json!({ "to": "Todos", "text": "hi", "type": "message" });
    let (status, _) = send(&app, "POST", "/messages", Some("Ghost"), Some(valid)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn private_messages_and_limit() {
    let (app, _) = setup().await;
    for name in ["Alice", "Bob"] {
        send(&app, "POST", "/participants", None, Some(json!({ "name": name }))).await;
    }

    let posts = [
        ("Alice", json!({ "to": "Todos", "text": "1", "type": "message" })),
        ("Alice", json!({ "to": "Bob", "text": "2", "type": "private_message" })),
        ("Bob", json!({ "to": "Todos", "text": "3", "type": "message" })),
    ];
    for (from, body) in posts {
        let (status, _) = send(&app, "POST", "/messages", Some(from), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let texts = |body: Value| -> Vec<String> {
        body.as_array().unwrap().iter().map(|m| m["text"].as_str().unwrap().to_owned()).collect()
    };

    let (_, body) = send(&app, "GET", "/messages", Some("Carol"), None).await;
    assert_eq!(texts(body), ["1", "3"]);
    let (_, body) = send(&app, "GET", "/messages?limit=2", Some("Bob"), None).await;
    assert_eq!(texts(body), ["2", "3"]);
    let (_, body) = send(&app, "GET", "/messages?limit=2", Some("Alice"), None).await;
    assert_eq!(texts(body), ["2", "3"]);

    let (status, _) = send(&app, "GET", "/messages?limit=zero", Some("Bob"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, detail) = send(&app, "GET", "/messages?limit=1&limit=2", Some("Bob"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail["error"].is_string());
}

#[tokio::test]
async fn only_the_sender_edits_and_deletes() {
    let (app, store) = setup().await;
    for name in ["Alice", "Bob"] {
        send(&app, "POST", "/participants", None, Some(json!({ "name": name }))).await;
    }
    send(&app, "POST", "/messages", Some("Alice"), Some(json!({ "to": "Todos", "text": "hi", "type": "message" }))).await;
    let id = store.find_messages().await.unwrap()[0].id;
    let uri = format!("/messages/{id}");

    let edit = json!({ "to": "Todos", "text": "edited", "type": "message" });
    let (status, _) = send(&app, "PUT", &uri, Some("Bob"), Some(edit.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "DELETE", &uri, Some("Bob"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.find_message(id).await.unwrap().unwrap().text, "hi");

    let (status, _) = send(&app, "PUT", &uri, Some("Alice"), Some(json!({ "to": "", "text": "x", "type": "message" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "PUT", &uri, Some("Alice"), Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.find_message(id).await.unwrap().unwrap().text, "edited");

    let (status, _) = send(&app, "DELETE", &uri, Some("Alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &uri, Some("Alice"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "PUT", "/messages/nope", Some("Alice"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn swept_participant_leaves_a_status_message_for_everyone() {
    let (app, store) = setup().await;
    send(&app, "POST", "/participants", None, Some(json!({ "name": "Alice" }))).await;

    let clock = Clock::default();
    let sweeper = Sweeper::new(store.clone(), clock, SweepConfig::default());
    assert_eq!(sweeper.sweep(clock.now_millis() + 10_000).await.unwrap(), ["Alice"]);

    let (_, body) = send(&app, "GET", "/participants", None, None).await;
    assert_eq!(body, json!([]));

    let (_, body) = send(&app, "GET", "/messages", Some("Bob"), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["from"], "Alice");
    assert_eq!(body[0]["type"], "status");

    let (status, _) = send(&app, "POST", "/status", Some("Alice"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
