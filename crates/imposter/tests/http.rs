//! Integration tests for the HTTP surface: routing, status codes, error
//! bodies, CORS, and a full server bound to a real socket.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use imposter::prelude::*;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

// =========================================================================
// Helpers
// =========================================================================

fn app() -> Router {
    let service = GameService::new(
        Arc::new(Catalog::builtin().expect("builtin catalog")),
        Arc::new(SessionStore::default()),
        ServiceConfig::seeded(7),
    );
    router(Arc::new(service), &ServerConfig::default().cors_origins).expect("router")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn create(app: &Router, players: u32, imposters: u32) -> String {
    let (status, body) = post(
        app,
        "/games",
        json!({
            "categoryIds": ["animals"],
            "numPlayers": players,
            "numImposters": imposters,
            "hintsEnabled": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["gameId"].as_str().expect("gameId").to_string()
}

// =========================================================================
// Read-only routes
// =========================================================================

#[tokio::test]
async fn test_health_returns_ok_true() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_categories_lists_id_and_name_only() {
    let (status, body) = get(&app(), "/categories").await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().expect("array");
    assert!(list.iter().any(|c| c["id"] == "animals"));
    for category in list {
        let keys: Vec<&String> = category.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2, "{category}");
        assert!(category["name"].is_string());
    }
}

#[tokio::test]
async fn test_unknown_route_returns_json_not_found() {
    let (status, body) = get(&app(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

// =========================================================================
// Full game over HTTP
// =========================================================================

#[tokio::test]
async fn test_game_flow_create_reveal_solution() {
    let app = app();
    let id = create(&app, 5, 1).await;

    let mut imposters = Vec::new();
    let mut words = Vec::new();
    for n in 1..=5 {
        let (status, body) =
            post(&app, &format!("/games/{id}/reveal"), json!({ "playerNumber": n })).await;
        assert_eq!(status, StatusCode::OK);
        match body["role"].as_str() {
            Some("imposter") => {
                assert!(body.get("hint").is_some(), "hint key is always present");
                imposters.push(n);
            }
            Some("player") => words.push(body["word"].as_str().unwrap().to_string()),
            other => panic!("unexpected role {other:?}"),
        }
    }
    assert_eq!(imposters.len(), 1);
    assert_eq!(words.len(), 4);
    assert!(words.windows(2).all(|w| w[0] == w[1]));

    let (status, body) = get(&app, &format!("/games/{id}/solution")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "word": words[0], "imposters": imposters }));
}

#[tokio::test]
async fn test_reveal_twice_returns_conflict() {
    let app = app();
    let id = create(&app, 3, 1).await;
    let uri = format!("/games/{id}/reveal");

    let (first, _) = post(&app, &uri, json!({ "playerNumber": 1 })).await;
    let (second, body) = post(&app, &uri, json!({ "playerNumber": 1 })).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "AlreadyRevealed");
    assert_eq!(body["error"], "This player has already revealed");
}

#[tokio::test]
async fn test_reveal_out_of_range_returns_bad_request() {
    let app = app();
    let id = create(&app, 4, 1).await;

    for bad in [json!(0), json!(5), json!("1"), json!(1.5), Value::Null] {
        let (status, body) =
            post(&app, &format!("/games/{id}/reveal"), json!({ "playerNumber": bad })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "playerNumber = {bad}");
        assert_eq!(body["kind"], "InvalidPlayerNumber");
        assert_eq!(body["error"], "playerNumber must be 1..4");
    }
}

#[tokio::test]
async fn test_reveal_unknown_game_returns_not_found() {
    let app = app();
    let unknown = GameId::new_v4();

    let (status, body) =
        post(&app, &format!("/games/{unknown}/reveal"), json!({ "playerNumber": 1 })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "SessionNotFound");
    assert_eq!(body["error"], "Game not found");
}

#[tokio::test]
async fn test_reveal_unknown_game_with_unreadable_body_returns_not_found() {
    let app = app();
    let uri = format!("/games/{}/reveal", GameId::new_v4());

    let no_content_type = Request::post(uri.as_str())
        .body(Body::from(json!({ "playerNumber": 1 }).to_string()))
        .unwrap();
    let truncated = Request::post(uri.as_str())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"playerNumber": "#))
        .unwrap();

    for request in [no_content_type, truncated] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "SessionNotFound");
    }
}

#[tokio::test]
async fn test_reveal_known_game_with_unreadable_body_returns_invalid_player_number() {
    let app = app();
    let id = create(&app, 3, 1).await;
    let uri = format!("/games/{id}/reveal");

    let empty = Request::post(uri.as_str()).body(Body::empty()).unwrap();
    let truncated = Request::post(uri.as_str())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{"))
        .unwrap();

    for request in [empty, truncated] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "InvalidPlayerNumber");
    }

    // Nobody was revealed by the rejected requests.
    let (status, _) = post(&app, &uri, json!({ "playerNumber": 1 })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_uuid_game_id_returns_not_found() {
    let app = app();

    let (reveal, body) =
        post(&app, "/games/not-a-uuid/reveal", json!({ "playerNumber": 1 })).await;
    let (solution, _) = get(&app, "/games/not-a-uuid/solution").await;

    assert_eq!(reveal, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "SessionNotFound");
    assert_eq!(solution, StatusCode::NOT_FOUND);
}

// =========================================================================
// POST /games errors
// =========================================================================

#[tokio::test]
async fn test_create_invalid_player_count_returns_bad_request() {
    let (status, body) = post(
        &app(),
        "/games",
        json!({ "categoryIds": ["food"], "numPlayers": 2, "numImposters": 1, "hintsEnabled": true }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "numPlayers must be an integer between 3 and 20",
            "kind": "InvalidPlayerCount"
        })
    );
}

#[tokio::test]
async fn test_create_unknown_category_returns_not_found() {
    let (status, body) = post(
        &app(),
        "/games",
        json!({ "categoryIds": ["zzz"], "numPlayers": 3, "numImposters": 1, "hintsEnabled": true }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "UnknownCategory");
}

#[tokio::test]
async fn test_create_too_many_words_returns_payload_too_large() {
    let words: Vec<Value> = (0..5001).map(|i| json!({ "word": format!("w{i}") })).collect();
    let (status, body) = post(
        &app(),
        "/games",
        json!({
            "categoryIds": ["big"],
            "numPlayers": 3,
            "numImposters": 1,
            "hintsEnabled": false,
            "customCategories": [{ "id": "big", "name": "Big", "words": words }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["kind"], "TooManyWords");
}

#[tokio::test]
async fn test_create_empty_category_returns_generic_server_error() {
    let (status, body) = post(
        &app(),
        "/games",
        json!({
            "categoryIds": ["blank"],
            "numPlayers": 3,
            "numImposters": 1,
            "hintsEnabled": false,
            "customCategories": [{ "id": "blank", "name": "Blank", "words": [] }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["kind"], "EmptyWordSet");
}

#[tokio::test]
async fn test_create_malformed_json_returns_bad_request() {
    let request = Request::post("/games")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = send(&app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MalformedBody");
}

#[tokio::test]
async fn test_create_missing_content_type_returns_bad_request() {
    let request = Request::post("/games")
        .body(Body::from(json!({ "categoryId": "food" }).to_string()))
        .unwrap();

    let (status, body) = send(&app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MalformedBody");
}

#[tokio::test]
async fn test_create_failure_stores_no_session() {
    let service = Arc::new(GameService::new(
        Arc::new(Catalog::builtin().unwrap()),
        Arc::new(SessionStore::default()),
        ServiceConfig::seeded(1),
    ));
    let app = router(Arc::clone(&service), &[]).unwrap();

    let (status, _) = post(
        &app,
        "/games",
        json!({ "categoryIds": ["food"], "numPlayers": 4, "numImposters": 4, "hintsEnabled": true }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(service.sessions().is_empty().await);
}

// =========================================================================
// CORS
// =========================================================================

async fn preflight(app: &Router, origin: &str) -> Option<String> {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/games")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let allowed = preflight(&app(), "http://localhost:8081").await;
    assert_eq!(allowed.as_deref(), Some("http://localhost:8081"));
}

#[tokio::test]
async fn test_cors_rejects_other_origin() {
    let allowed = preflight(&app(), "https://evil.example").await;
    assert_eq!(allowed, None);
}

#[test]
fn test_router_rejects_unusable_origin() {
    let service = Arc::new(GameService::new(
        Arc::new(Catalog::builtin().unwrap()),
        Arc::new(SessionStore::default()),
        ServiceConfig::default(),
    ));
    let result = router(service, &["bad\norigin".to_string()]);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { key: "CORS_ORIGINS", .. })
    ));
}

// =========================================================================
// Real server
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_serves_health_until_shutdown() {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    };
    let server = ImposterServer::builder()
        .config(config)
        .build()
        .await
        .expect("build");
    let addr = server.local_addr().unwrap();

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(server.run_until(async move {
        let _ = stop_rx.await;
    }));

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with(r#"{"ok":true}"#), "{response}");

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_builder_uses_explicit_catalog() {
    let catalog = Catalog::new(vec![Category {
        id: "only".into(),
        name: "Only".into(),
        words: vec![WordEntry::new("Solo", None)],
    }])
    .unwrap();
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    };

    let server = ImposterServer::builder()
        .config(config)
        .catalog(catalog)
        .build()
        .await
        .unwrap();

    let ids: Vec<String> = server.service().categories().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, ["only"]);
}
