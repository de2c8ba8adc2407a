//! HTTP-level integration tests for safety report endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_workspace, get_auth, post_json_auth, signup_user};
use sqlx::PgPool;

/// Set up a user and a workspace, returning `(token, workspace_id)`.
async fn setup(app: &axum::Router) -> (String, i64) {
    let (token, _) = signup_user(app, "Owner", "owner@test.com", "password-123").await;
    let ws = create_workspace(app, &token, "Safety Site").await;
    (token, ws["id"].as_i64().unwrap())
}

fn report(risk_score: i32, summary: &str) -> serde_json::Value {
    serde_json::json!({
        "risk_score": risk_score,
        "hazards": [
            {
                "description": "Unsecured scaffolding on the east wing",
                "severity": "high",
                "recommendation": "Install guard rails and toe boards",
            },
        ],
        "summary": summary,
    })
}

/// Saving a report with risk 30 sets the workspace safety score to 70,
/// independent of any prior value.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_report_derives_safety_score(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;

    let response = post_json_auth(
        &app,
        &format!("/workspaces/{ws_id}/safety-reports"),
        &token,
        report(30, "Quarterly inspection"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved = body_json(response).await["data"].clone();
    assert!(saved["id"].is_string());
    assert!(saved["report_date"].is_string());
    assert_eq!(saved["risk_score"], 30);

    let ws = body_json(get_auth(&app, &format!("/workspaces/{ws_id}"), &token).await).await["data"]
        .clone();
    assert_eq!(ws["safety_score"], 70);
}

/// The score tracks only the most recently saved report, not history.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_score_follows_latest_report_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;
    let path = format!("/workspaces/{ws_id}/safety-reports");

    post_json_auth(&app, &path, &token, report(80, "Bad week")).await;
    post_json_auth(&app, &path, &token, report(10, "Much improved")).await;

    let ws = body_json(get_auth(&app, &format!("/workspaces/{ws_id}"), &token).await).await["data"]
        .clone();
    assert_eq!(ws["safety_score"], 90);
}

/// History is returned newest first.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_is_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;
    let path = format!("/workspaces/{ws_id}/safety-reports");

    post_json_auth(&app, &path, &token, report(40, "First")).await;
    post_json_auth(&app, &path, &token, report(20, "Second")).await;

    let response = get_auth(&app, &path, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let history = body_json(response).await["data"].clone();
    let reports = history.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["summary"], "Second");
    assert_eq!(reports[1]["summary"], "First");
}

/// A single report is addressable by its generated id; unknown ids are 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_report_by_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;
    let path = format!("/workspaces/{ws_id}/safety-reports");

    let saved = body_json(post_json_auth(&app, &path, &token, report(25, "Spot check")).await)
        .await["data"]
        .clone();
    let report_id = saved["id"].as_str().unwrap();

    let response = get_auth(&app, &format!("{path}/{report_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["summary"], "Spot check");
    assert_eq!(json["data"]["hazards"][0]["severity"], "high");

    let response = get_auth(
        &app,
        &format!("{path}/00000000-0000-0000-0000-000000000000"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Risk scores outside 0..=100 are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_risk_score_bounds(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, ws_id) = setup(&app).await;
    let path = format!("/workspaces/{ws_id}/safety-reports");

    let response = post_json_auth(&app, &path, &token, report(101, "Too risky")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(&app, &path, &token, report(-1, "Negative")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was recorded.
    let history = body_json(get_auth(&app, &path, &token).await).await["data"].clone();
    assert_eq!(history.as_array().unwrap().len(), 0);
}
