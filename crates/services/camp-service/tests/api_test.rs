//! Integration tests for API endpoints.
//!
//! Every test gets its own in-memory SQLite database with the migrations
//! applied, and drives the real router with `oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use camp_service_lib::api::{create_router, AppState};
use camp_service_lib::infra::{Database, MigrationState};
use camp_service_lib::repository::CampStore;
use camp_service_lib::service::CampManager;
use camp_service_lib::{migrate, MigrateAction};
use common::DatabaseConfig;

// =============================================================================
// Helpers
// =============================================================================

async fn test_database() -> Arc<Database> {
    Arc::new(
        Database::connect(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory database"),
    )
}

async fn test_app() -> Router {
    create_router(AppState::from_database(test_database().await))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
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

async fn create_camper(app: &Router, name: &str, age: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/campers",
        Some(json!({"name": name, "age": age})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn create_activity(app: &Router, name: &str, difficulty: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/activities",
        Some(json!({"name": name, "difficulty": difficulty})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

// =============================================================================
// Root and health
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/campers/{id}").is_some());
}

// =============================================================================
// Campers
// =============================================================================

#[tokio::test]
async fn test_create_camper_then_get_detail() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({"name": "Lee", "age": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Lee");
    assert_eq!(created["age"], 10);
    assert!(created.get("signups").is_none());

    let id = created["id"].as_i64().unwrap();
    let (status, detail) = send(&app, Method::GET, &format!("/campers/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail, json!({"id": id, "name": "Lee", "age": 10, "signups": []}));
}

#[tokio::test]
async fn test_create_camper_rejects_bad_fields() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({"name": "Lee", "age": 19})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "age");

    let (status, body) = send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({"name": "", "age": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "name");

    let (status, _) = send(&app, Method::POST, "/campers", Some(json!({"name": "Lee"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/campers", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_get_unknown_camper_is_not_found() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/campers/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_camper_list_never_includes_signups() {
    let app = test_app().await;
    let lee = create_camper(&app, "Lee", 10).await;
    create_camper(&app, "Sam", 12).await;
    let archery = create_activity(&app, "Archery", 2).await;
    send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({"camper_id": lee, "activity_id": archery, "time": 9})),
    )
    .await;

    let (status, list) = send(&app, Method::GET, "/campers", None).await;

    assert_eq!(status, StatusCode::OK);
    let campers = list.as_array().unwrap();
    assert_eq!(campers.len(), 2);
    assert!(campers.iter().all(|c| c.get("signups").is_none()));
}

#[tokio::test]
async fn test_patch_camper_updates_allowed_fields() {
    let app = test_app().await;
    let id = create_camper(&app, "Lee", 10).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/campers/{}", id),
        Some(json!({"age": 11})),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({"id": id, "name": "Lee", "age": 11}));
}

#[tokio::test]
async fn test_patch_camper_invalid_age_keeps_stored_value() {
    let app = test_app().await;
    let id = create_camper(&app, "Lee", 10).await;
    let uri = format!("/campers/{}", id);

    let body = json!({"name": "Sam", "age": 5});
    let (status, body) = send(&app, Method::PATCH, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "age");

    let (_, detail) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(detail["name"], "Lee");
    assert_eq!(detail["age"], 10);
}

#[tokio::test]
async fn test_patch_camper_rejects_unknown_fields() {
    let app = test_app().await;
    let id = create_camper(&app, "Lee", 10).await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/campers/{}", id),
        Some(json!({"id": 77})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_unknown_camper_is_not_found() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::PATCH, "/campers/42", Some(json!({"age": 5}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_camper_null_field_is_rejected() {
    let app = test_app().await;
    let id = create_camper(&app, "Lee", 10).await;
    let uri = format!("/campers/{}", id);

    for field in ["name", "age"] {
        let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({field: null}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], field);
    }

    let (_, detail) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(detail["name"], "Lee");
    assert_eq!(detail["age"], 10);
}

#[tokio::test]
async fn test_unparseable_ids_are_not_found() {
    let app = test_app().await;
    let cases = [
        (Method::GET, "/campers/abc"),
        (Method::PATCH, "/campers/-3"),
        (Method::GET, "/activities/0"),
        (Method::DELETE, "/activities/4294967296"),
    ];

    for (method, uri) in cases {
        let body = (method == Method::PATCH).then(|| json!({"age": 11}));
        let (status, body) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"]["code"], "NOT_FOUND", "{}", uri);
    }
}

// =============================================================================
// Activities
// =============================================================================

#[tokio::test]
async fn test_activity_list_is_summary() {
    let app = test_app().await;
    let id = create_activity(&app, "Archery", 2).await;

    let (status, list) = send(&app, Method::GET, "/activities", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([{"id": id, "name": "Archery", "difficulty": 2}]));
}

#[tokio::test]
async fn test_delete_unknown_activity_is_not_found() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::DELETE, "/activities/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_activity_removes_its_signups() {
    let app = test_app().await;
    let lee = create_camper(&app, "Lee", 10).await;
    let archery = create_activity(&app, "Archery", 2).await;
    let swim = create_activity(&app, "Swim", 1).await;
    for (activity, time) in [(archery, 9), (swim, 14)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/signups",
            Some(json!({"camper_id": lee, "activity_id": activity, "time": time})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/activities/{}", archery);
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &format!("/activities/{}", archery), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, detail) = send(&app, Method::GET, &format!("/campers/{}", lee), None).await;
    let signups = detail["signups"].as_array().unwrap();
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0]["activity_id"], swim);
}

// =============================================================================
// Signups and detail views
// =============================================================================

#[tokio::test]
async fn test_create_signup_shows_both_parents_without_signups() {
    let app = test_app().await;
    let lee = create_camper(&app, "Lee", 10).await;
    let archery = create_activity(&app, "Archery", 2).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({"camper_id": lee, "activity_id": archery, "time": 9})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["time"], 9);
    assert_eq!(body["camper"], json!({"id": lee, "name": "Lee", "age": 10}));
    assert_eq!(
        body["activity"],
        json!({"id": archery, "name": "Archery", "difficulty": 2})
    );
}

#[tokio::test]
async fn test_signup_with_bad_hour_is_rejected() {
    let app = test_app().await;
    let lee = create_camper(&app, "Lee", 10).await;
    let archery = create_activity(&app, "Archery", 2).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({"camper_id": lee, "activity_id": archery, "time": 24})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "time");

    let (_, detail) = send(&app, Method::GET, &format!("/campers/{}", lee), None).await;
    assert_eq!(detail["signups"], json!([]));
}

#[tokio::test]
async fn test_signup_with_unknown_parent_is_rejected() {
    let app = test_app().await;
    let lee = create_camper(&app, "Lee", 10).await;
    let archery = create_activity(&app, "Archery", 2).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({"camper_id": 999, "activity_id": archery, "time": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "camper_id");

    let (status, body) = send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({"camper_id": lee, "activity_id": 999, "time": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "activity_id");

    let (_, detail) = send(&app, Method::GET, &format!("/activities/{}", archery), None).await;
    assert_eq!(detail["signups"], json!([]));
}

#[tokio::test]
async fn test_detail_views_drop_back_reference() {
    let app = test_app().await;
    let lee = create_camper(&app, "Lee", 10).await;
    let archery = create_activity(&app, "Archery", 2).await;
    send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({"camper_id": lee, "activity_id": archery, "time": 9})),
    )
    .await;

    let (_, camper) = send(&app, Method::GET, &format!("/campers/{}", lee), None).await;
    let signup = &camper["signups"][0];
    assert!(signup.get("camper").is_none());
    assert_eq!(
        signup["activity"],
        json!({"id": archery, "name": "Archery", "difficulty": 2})
    );

    let (_, activity) = send(&app, Method::GET, &format!("/activities/{}", archery), None).await;
    let signup = &activity["signups"][0];
    assert!(signup.get("activity").is_none());
    assert_eq!(signup["camper"], json!({"id": lee, "name": "Lee", "age": 10}));
}

// =============================================================================
// Migrations
// =============================================================================

#[tokio::test]
async fn test_migrate_actions_walk_the_schema() {
    let db = Database::open(&DatabaseConfig::in_memory()).await.unwrap();
    let applied = |states: Vec<MigrationState>| states.iter().all(|m| m.applied);

    let states = migrate(&db, MigrateAction::Status).await.unwrap();
    assert!(!states.is_empty());
    assert!(!applied(states));

    assert!(applied(migrate(&db, MigrateAction::Up).await.unwrap()));
    assert!(!applied(migrate(&db, MigrateAction::Down).await.unwrap()));
    assert!(applied(migrate(&db, MigrateAction::Fresh).await.unwrap()));

    let app = create_router(AppState::from_database(Arc::new(db)));
    let (status, _) = send(&app, Method::GET, "/campers", None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Seed
// =============================================================================

#[tokio::test]
async fn test_seed_runs_once() {
    let db = test_database().await;
    let service = CampManager::new(Arc::new(CampStore::new(db.get_connection())));

    assert!(camp_service_lib::seed(&service).await.unwrap());
    assert!(!camp_service_lib::seed(&service).await.unwrap());

    let app = create_router(AppState::from_database(db));
    let (_, campers) = send(&app, Method::GET, "/campers", None).await;
    assert_eq!(campers.as_array().unwrap().len(), 4);

    let (_, detail) = send(&app, Method::GET, "/activities/1", None).await;
    assert!(!detail["signups"].as_array().unwrap().is_empty());
}
