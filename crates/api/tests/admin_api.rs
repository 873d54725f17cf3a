//! Integration tests for `/api/admin/offers`.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{body_json, TestApp, ADMIN_KEY, CLEANUP_KEY};
use serde_json::json;

/// Two awards: alice on day 1 (13:05), bob on day 2 (14:05).
async fn seeded() -> TestApp {
    let app = TestApp::new([0.1, 0.0]);
    app.generate("alice@example.com").await;
    app.clock.advance(Duration::hours(25));
    app.generate("bob@example.com").await;
    app
}

#[tokio::test]
async fn requires_admin_token() {
    let app = seeded().await;

    let response = app.get("/api/admin/offers").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get_authed("/api/admin/offers", CLEANUP_KEY).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post_authed(
            "/api/admin/offers",
            "wrong",
            json!({ "action": "mark_consumed", "identifier": "bob@example.com" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn lists_all_offers_newest_first() {
    let app = seeded().await;
    let response = app.get_authed("/api/admin/offers", ADMIN_KEY).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["totalCount"], 2);
    let offers = body["offers"].as_array().unwrap();
    assert_eq!(offers[0]["contact"], "bob@example.com");
    assert_eq!(offers[0]["status"], "active");
    assert_eq!(offers[1]["contact"], "alice@example.com");
    assert_eq!(offers[1]["status"], "expired");
    assert_eq!(offers[1]["isExpired"], true);
    assert_eq!(offers[1]["generatedAtFormatted"], "10/03/2025, 01:05:00 PM");
    assert_eq!(offers[1]["displayId"].as_str().unwrap().len(), 12);
}

#[tokio::test]
async fn filters_by_date_contact_and_status() {
    let app = seeded().await;

    let body = body_json(
        app.get_authed("/api/admin/offers?date=2025-03-10", ADMIN_KEY)
            .await,
    )
    .await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["offers"][0]["contact"], "alice@example.com");
    assert_eq!(body["filters"]["date"], "2025-03-10");

    let body = body_json(app.get_authed("/api/admin/offers?contact=BOB", ADMIN_KEY).await).await;
    assert_eq!(body["totalCount"], 1);

    let body = body_json(
        app.get_authed("/api/admin/offers?status=expired", ADMIN_KEY)
            .await,
    )
    .await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["offers"][0]["contact"], "alice@example.com");
}

#[tokio::test]
async fn invalid_filters_return_400() {
    let app = seeded().await;
    for uri in [
        "/api/admin/offers?date=10-03-2025",
        "/api/admin/offers?status=redeemed",
    ] {
        let response = app.get_authed(uri, ADMIN_KEY).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn mark_consumed_by_contact_targets_latest_offer() {
    let app = seeded().await;
    let response = app
        .post_authed(
            "/api/admin/offers",
            ADMIN_KEY,
            json!({ "action": "mark_consumed", "identifier": "bob@example.com", "staff": "sam" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["updatedCount"], 1);
    assert_eq!(body["offer"]["consumed"], true);
    assert_eq!(body["offer"]["consumedBy"], "sam");

    let body = body_json(
        app.get_authed("/api/admin/offers?status=consumed", ADMIN_KEY)
            .await,
    )
    .await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["offers"][0]["contact"], "bob@example.com");
}

#[tokio::test]
async fn consumed_wins_over_expired_and_can_be_cleared() {
    let app = seeded().await;
    let listing = body_json(app.get_authed("/api/admin/offers", ADMIN_KEY).await).await;
    let alice_id = listing["offers"][1]["uniqueId"].as_str().unwrap().to_string();

    let response = app
        .post_authed(
            "/api/admin/offers",
            ADMIN_KEY,
            json!({ "action": "mark_consumed", "identifier": alice_id }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(
        app.get_authed("/api/admin/offers?status=consumed", ADMIN_KEY)
            .await,
    )
    .await;
    assert_eq!(body["offers"][0]["uniqueId"], alice_id.as_str());
    assert_eq!(body["offers"][0]["isExpired"], true);

    let display_id = &alice_id[alice_id.len() - 12..];
    let response = app
        .post_authed(
            "/api/admin/offers",
            ADMIN_KEY,
            json!({ "action": "mark_consumed", "identifier": display_id, "consumed": false }),
        )
        .await;
    let body = body_json(response).await;
    assert_eq!(body["offer"]["consumed"], false);
    assert!(body["offer"].get("consumedAt").is_none());
}

#[tokio::test]
async fn bad_actions_are_rejected() {
    let app = seeded().await;

    let response = app
        .post_authed("/api/admin/offers", ADMIN_KEY, json!({ "action": "mark_consumed" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_authed(
            "/api/admin/offers",
            ADMIN_KEY,
            json!({ "action": "delete", "identifier": "bob@example.com" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_authed(
            "/api/admin/offers",
            ADMIN_KEY,
            json!({ "action": "mark_consumed", "identifier": "nobody@example.com" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
