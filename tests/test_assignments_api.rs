// HTTP tests for the assignment endpoints, driven in-process through the router
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use planroster::bootstrap::build_app_state;
use planroster::infrastructure::http::router::build_router;
use serde_json::{json, Value};
use tower::ServiceExt;

mod helpers;
use helpers::*;

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

#[tokio::test]
async fn test_put_assignments_returns_ok() {
    let db = setup_test_db().await;
    create_test_plan_procedure(&db, 1, 1).await;
    create_test_users(&db, &[1, 2]).await;
    let app = build_router(build_app_state(db.clone()));

    let (status, _) = send(
        app,
        "PUT",
        "/api/plans/1/procedures/1/assignments",
        Some(json!({ "userIds": [1, 2] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(assigned_user_ids(&db, 1, 1).await, vec![1, 2]);
}

#[tokio::test]
async fn test_put_with_invalid_plan_id_is_bad_request() {
    let db = setup_test_db().await;
    let app = build_router(build_app_state(db));

    let (status, body) = send(
        app,
        "PUT",
        "/api/plans/0/procedures/1/assignments",
        Some(json!({ "userIds": [1] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid plan id");
    assert_eq!(body["kind"], "bad_request");
}

#[tokio::test]
async fn test_put_with_negative_procedure_id_is_bad_request() {
    let db = setup_test_db().await;
    let app = build_router(build_app_state(db));

    let (status, body) = send(
        app,
        "PUT",
        "/api/plans/1/procedures/-4/assignments",
        Some(json!({ "userIds": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid procedure id");
}

#[tokio::test]
async fn test_put_for_missing_association_is_not_found() {
    let db = setup_test_db().await;
    create_test_user(&db, 1, "Test User").await;
    let app = build_router(build_app_state(db));

    let (status, body) = send(
        app,
        "PUT",
        "/api/plans/3/procedures/9/assignments",
        Some(json!({ "userIds": [1] })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    assert_eq!(
        body["error"],
        "association not found; add procedure to plan first"
    );
}

#[tokio::test]
async fn test_put_with_unknown_users_lists_them() {
    let db = setup_test_db().await;
    create_test_plan_procedure(&db, 1, 1).await;
    create_test_user(&db, 1, "Test User").await;
    create_test_assignment(&db, 1, 1, 1).await;
    let app = build_router(build_app_state(db.clone()));

    let (status, body) = send(
        app,
        "PUT",
        "/api/plans/1/procedures/1/assignments",
        Some(json!({ "userIds": [2, 1, 3] })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user ids not found: 2, 3");
    assert_eq!(assigned_user_ids(&db, 1, 1).await, vec![1]);
}

#[tokio::test]
async fn test_put_without_user_ids_is_rejected() {
    let db = setup_test_db().await;
    create_test_plan_procedure(&db, 1, 1).await;
    create_test_user(&db, 1, "Test User").await;
    create_test_assignment(&db, 1, 1, 1).await;
    let app = build_router(build_app_state(db.clone()));

    let (status, body) = send(
        app,
        "PUT",
        "/api/plans/1/procedures/1/assignments",
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");
    assert!(body["error"].as_str().unwrap_or_default().contains("userIds"));
    assert_eq!(assigned_user_ids(&db, 1, 1).await, vec![1]);
}

#[tokio::test]
async fn test_put_with_non_numeric_user_id_is_bad_request() {
    let db = setup_test_db().await;
    create_test_plan_procedure(&db, 1, 1).await;
    create_test_user(&db, 1, "Test User").await;
    create_test_assignment(&db, 1, 1, 1).await;
    let app = build_router(build_app_state(db.clone()));

    let (status, body) = send(
        app,
        "PUT",
        "/api/plans/1/procedures/1/assignments",
        Some(json!({ "userIds": [1, "x"] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");
    assert!(body["error"].is_string());
    assert_eq!(assigned_user_ids(&db, 1, 1).await, vec![1]);
}

#[tokio::test]
async fn test_out_of_range_path_id_is_bad_request() {
    let db = setup_test_db().await;
    let uri = "/api/plans/-99999999999999999999/procedures/1/assignments";

    let app = build_router(build_app_state(db.clone()));
    let (status, body) = send(app, "PUT", uri, Some(json!({ "userIds": [1] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");

    let app = build_router(build_app_state(db));
    let (status, body) = send(app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_assignments_returns_camel_case_records() {
    let db = setup_test_db().await;
    create_test_plan_procedure(&db, 1, 2).await;
    create_test_users(&db, &[4, 3]).await;
    let state = build_app_state(db);
    state
        .assignment_service
        .assign_users(1, 2, &[4, 3])
        .await
        .expect("assign users");
    let app = build_router(state);

    let (status, body) = send(app, "GET", "/api/plans/1/procedures/2/assignments", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["planId"], 1);
    assert_eq!(body["procedureId"], 2);
    let assigned = body["assignedUsers"].as_array().expect("assignedUsers array");
    assert_eq!(assigned.len(), 2);
    assert_eq!(assigned[0]["userId"], 3);
    assert_eq!(assigned[1]["userId"], 4);
    assert!(assigned[0]["assignedDate"].is_string());
}

#[tokio::test]
async fn test_list_users_endpoint() {
    let db = setup_test_db().await;
    create_test_user(&db, 1, "Ada").await;
    let app = build_router(build_app_state(db));

    let (status, body) = send(app, "GET", "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "userId": 1, "name": "Ada" }]));
}

#[tokio::test]
async fn test_health() {
    let db = setup_test_db().await;
    let app = build_router(build_app_state(db));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
