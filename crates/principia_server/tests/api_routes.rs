use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use principia_core::ConnectionPool;
use principia_server::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    build_router(Arc::new(AppState::new(ConnectionPool::in_memory().unwrap())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn tactic_total(principles: &Value) -> usize {
    principles
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["tactics"].as_array().unwrap().len())
        .sum()
}

#[tokio::test]
async fn first_request_seeds_example_set() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/principles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(tactic_total(&body), 13);

    let first = &body[0];
    assert_eq!(first["category"], "Sales");
    assert_eq!(first["color"], "orange");
    assert_eq!(first["tactics"][0]["isEffective"], true);
    assert!(first["tactics"][0]["principleId"].is_string());
}

#[tokio::test]
async fn deleting_first_seeded_principle_leaves_four_and_ten() {
    let app = app();
    let (_, body) = send(&app, Method::GET, "/principles", None).await;
    let first_id = body[0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::DELETE, &format!("/principles/{first_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, body) = send(&app, Method::GET, "/principles", None).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert_eq!(tactic_total(&body), 10);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|p| p["tactics"].as_array().unwrap())
        .all(|t| t["principleId"] != first_id.as_str()));

    let (status, _) = send(&app, Method::GET, &format!("/principles/{first_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn created_principle_has_defaults_and_empty_tactics() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/principles",
        Some(json!({ "title": "Scarcity drives action", "description": "Limited supply raises value" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["category"], "general");
    assert_eq!(created["color"], "blue");
    assert_eq!(created["order"], 0);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/principles/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Scarcity drives action");
    assert_eq!(fetched["tactics"], json!([]));
}

#[tokio::test]
async fn created_tactic_is_listed_under_its_principle() {
    let app = app();
    let (_, principle) = send(
        &app,
        Method::POST,
        "/principles",
        Some(json!({ "title": "Anchoring", "description": "First number sticks", "order": 9 })),
    )
    .await;
    let principle_id = principle["id"].as_str().unwrap();

    let (status, tactic) = send(
        &app,
        Method::POST,
        "/tactics",
        Some(json!({ "principleId": principle_id, "title": "Show the premium plan first" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tactic["isEffective"], true);
    assert_eq!(tactic["description"], Value::Null);

    let (_, fetched) = send(&app, Method::GET, &format!("/principles/{principle_id}"), None).await;
    assert_eq!(fetched["tactics"].as_array().unwrap().len(), 1);
    assert_eq!(fetched["tactics"][0]["id"], tactic["id"]);

    let tactic_id = tactic["id"].as_str().unwrap();
    let (status, _) = send(&app, Method::DELETE, &format!("/tactics/{tactic_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, fetched) = send(&app, Method::GET, &format!("/principles/{principle_id}"), None).await;
    assert_eq!(fetched["tactics"], json!([]));
}

#[tokio::test]
async fn empty_title_is_rejected_and_nothing_is_created() {
    let app = app();
    let (_, before) = send(&app, Method::GET, "/principles", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/principles",
        Some(json!({ "title": "", "description": "body" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid data");
    assert_eq!(body["errors"][0]["field"], "title");

    let (_, after) = send(&app, Method::GET, "/principles", None).await;
    assert_eq!(
        before.as_array().unwrap().len(),
        after.as_array().unwrap().len()
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/principles")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/principles",
        Some(json!({ "title": "t", "description": "d", "order": "first" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tactic_with_unknown_principle_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/tactics",
        Some(json!({ "principleId": uuid::Uuid::new_v4().to_string(), "title": "orphan" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "principleId");

    let (status, _) = send(&app, Method::POST, "/tactics", Some(json!({ "title": "no parent" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_ids_are_404_on_get_and_204_on_delete() {
    let app = app();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, Method::GET, &format!("/principles/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Principle not found");
    let (status, _) = send(&app, Method::GET, "/principles/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for uri in [
        format!("/principles/{missing}"),
        format!("/tactics/{missing}"),
        "/principles/not-a-uuid".to_string(),
        "/tactics/not-a-uuid".to_string(),
    ] {
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "DELETE {uri}");
    }
}

#[tokio::test]
async fn repeated_listing_is_identical() {
    let app = app();
    let (_, first) = send(&app, Method::GET, "/principles", None).await;
    let (_, second) = send(&app, Method::GET, "/principles", None).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn health_reports_up() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_cold_start_seeds_once() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("cold.db").display());
    let pool = ConnectionPool::open(&principia_core::DatabaseConfig::new(url, None), 4).unwrap();
    let app = build_router(Arc::new(AppState::new(pool)));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            send(&app, Method::GET, "/principles", None).await
        }));
    }
    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/principles", None).await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn restarted_process_does_not_reseed() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("restart.db").display());
    let config = principia_core::DatabaseConfig::new(url, None);

    let first = build_router(Arc::new(AppState::new(ConnectionPool::open(&config, 1).unwrap())));
    let (_, body) = send(&first, Method::GET, "/principles", None).await;
    let first_id = body[0]["id"].as_str().unwrap().to_string();
    send(&first, Method::DELETE, &format!("/principles/{first_id}"), None).await;
    drop(first);

    let second = build_router(Arc::new(AppState::new(ConnectionPool::open(&config, 1).unwrap())));
    let (_, body) = send(&second, Method::GET, "/principles", None).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn store_fault_is_a_generic_server_error() {
    let pool = ConnectionPool::in_memory().unwrap();
    pool.get()
        .unwrap()
        .execute_batch("DROP TABLE tactics;")
        .unwrap();
    let app = build_router(Arc::new(AppState::new(pool)));

    let (status, body) = send(&app, Method::GET, "/principles", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Failed to fetch principles" }));

    let uri = "/principles/00000000-0000-4000-8000-000000000001";
    let (status, body) = send(&app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Failed to delete principle" }));
}
