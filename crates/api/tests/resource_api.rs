//! HTTP-level integration tests for workspace inventory endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_workspace, delete_auth, get_auth, patch_json_auth, post_json_auth,
    put_json_auth, signup_user,
};
use sqlx::PgPool;

/// Set up a user and a workspace, returning `(token, workspace_id)`.
async fn setup(app: &axum::Router) -> (String, i64) {
    let (token, _) = signup_user(app, "Owner", "owner@test.com", "password-123").await;
    let ws = create_workspace(app, &token, "Inventory Site").await;
    (token, ws["id"].as_i64().unwrap())
}

// ---------------------------------------------------------------------------
// Add / classify round trip
// ---------------------------------------------------------------------------

/// The status follows quantity changes through the classifier:
/// 20/30 -> low, 10/30 -> critical, 40/30 -> good.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_quantity_round_trip_reclassifies(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;

    let response = post_json_auth(
        &app,
        &format!("/workspaces/{ws_id}/resources"),
        &token,
        serde_json::json!({ "name": "Paint", "quantity": 20.0, "unit": "L", "threshold": 30.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["status"], "low");
    let resource_id = created["id"].as_str().unwrap().to_string();

    let response = get_auth(
        &app,
        &format!("/workspaces/{ws_id}/resources/{resource_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "low");

    let quantity_path = format!("/workspaces/{ws_id}/resources/{resource_id}/quantity");

    let response =
        patch_json_auth(&app, &quantity_path, &token, serde_json::json!({ "quantity": 10.0 }))
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "critical");

    let response =
        patch_json_auth(&app, &quantity_path, &token, serde_json::json!({ "quantity": 40.0 }))
            .await;
    assert_eq!(body_json(response).await["data"]["status"], "good");
}

/// Clients cannot set the status directly: it is derived on add.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_is_never_client_settable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;

    let response = post_json_auth(
        &app,
        &format!("/workspaces/{ws_id}/resources"),
        &token,
        serde_json::json!({
            "name": "Rebar", "quantity": 500.0, "unit": "pieces", "threshold": 100.0,
            "status": "critical",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    // 500 over a threshold of 100 is good, whatever the client claims.
    assert_eq!(body_json(response).await["data"]["status"], "good");
}

/// Invalid input (negative quantity) is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_rejects_negative_quantity(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;

    let response = post_json_auth(
        &app,
        &format!("/workspaces/{ws_id}/resources"),
        &token,
        serde_json::json!({ "name": "Glass", "quantity": -3.0, "unit": "panes", "threshold": 10.0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["type"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

/// Updating the threshold alone re-derives the status.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_threshold_reclassifies(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;

    let created = body_json(
        post_json_auth(
            &app,
            &format!("/workspaces/{ws_id}/resources"),
            &token,
            serde_json::json!({ "name": "Tiles", "quantity": 80.0, "unit": "m2", "threshold": 100.0 }),
        )
        .await,
    )
    .await["data"]
        .clone();
    assert_eq!(created["status"], "low");
    let resource_id = created["id"].as_str().unwrap();

    let response = put_json_auth(
        &app,
        &format!("/workspaces/{ws_id}/resources/{resource_id}"),
        &token,
        serde_json::json!({ "threshold": 50.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "good");
    // Untouched fields survive.
    assert_eq!(json["data"]["name"], "Tiles");
    assert_eq!(json["data"]["quantity"], 80.0);
}

/// Deleting an item removes it; deleting an unknown id is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_resource(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;

    let created = body_json(
        post_json_auth(
            &app,
            &format!("/workspaces/{ws_id}/resources"),
            &token,
            serde_json::json!({ "name": "Pipes", "quantity": 30.0, "unit": "m", "threshold": 10.0 }),
        )
        .await,
    )
    .await["data"]
        .clone();
    let resource_id = created["id"].as_str().unwrap();

    let response = delete_auth(
        &app,
        &format!("/workspaces/{ws_id}/resources/{resource_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The five seeded defaults remain.
    let list = body_json(get_auth(&app, &format!("/workspaces/{ws_id}/resources"), &token).await)
        .await["data"]
        .clone();
    assert_eq!(list.as_array().unwrap().len(), 5);

    let response = delete_auth(
        &app,
        &format!("/workspaces/{ws_id}/resources/{resource_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Bulk replace
// ---------------------------------------------------------------------------

/// One invalid item aborts the whole replace: the stored collection is
/// untouched, not partially rewritten.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_bulk_replace_is_all_or_nothing(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;
    let list_path = format!("/workspaces/{ws_id}/resources");

    let before = body_json(get_auth(&app, &list_path, &token).await).await["data"].clone();

    let response = put_json_auth(
        &app,
        &list_path,
        &token,
        serde_json::json!([
            { "name": "Valid", "quantity": 10.0, "unit": "kg", "threshold": 5.0 },
            { "name": "Invalid", "quantity": -1.0, "unit": "kg", "threshold": 5.0 },
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let after = body_json(get_auth(&app, &list_path, &token).await).await["data"].clone();
    assert_eq!(before, after, "a failed bulk replace must not change anything");
}

/// A valid bulk replace swaps the entire collection.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_bulk_replace_swaps_collection(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;
    let list_path = format!("/workspaces/{ws_id}/resources");

    let response = put_json_auth(
        &app,
        &list_path,
        &token,
        serde_json::json!([
            { "name": "Concrete", "quantity": 60.0, "unit": "m3", "threshold": 20.0 },
            { "name": "Timber", "quantity": 8.0, "unit": "m3", "threshold": 16.0 },
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    let items = data.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["status"], "good");
    assert_eq!(items[1]["status"], "critical");
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Statistics reduce the current collection to counts and a quantity sum.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_statistics(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;

    put_json_auth(
        &app,
        &format!("/workspaces/{ws_id}/resources"),
        &token,
        serde_json::json!([
            { "name": "Good One", "quantity": 50.0, "unit": "kg", "threshold": 10.0 },
            { "name": "Low One", "quantity": 8.0, "unit": "kg", "threshold": 10.0 },
            { "name": "Critical One", "quantity": 2.0, "unit": "kg", "threshold": 10.0 },
        ]),
    )
    .await;

    let response = get_auth(
        &app,
        &format!("/workspaces/{ws_id}/resources/statistics"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await["data"].clone();
    assert_eq!(stats["total_items"], 3);
    assert_eq!(stats["good"], 1);
    assert_eq!(stats["low"], 1);
    assert_eq!(stats["critical"], 1);
    assert_eq!(stats["total_quantity"], 60.0);
}
