//! HTTP-level integration tests for the `/notifications` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    build_test_app, create_user, expect_status, get_auth, post_json_auth, put_auth, token_for,
};
use serde_json::json;
use skillhive_core::identity::UserType;
use sqlx::PgPool;

async fn request(pool: &PgPool, kind: &str, tutor_id: i64, token: &str) -> i64 {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/sessions/{kind}"),
        json!({ "tutor_id": tutor_id }),
        token,
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}

async fn unread(pool: &PgPool, token: &str) -> i64 {
    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/notifications/unread-count",
        token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    json["data"]["count"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inbox_lists_newest_first_with_sender(pool: PgPool) {
    let tutor = create_user(&pool, "Grace", UserType::Teach).await;
    let ada = create_user(&pool, "Ada", UserType::Study).await;
    let alan = create_user(&pool, "Alan", UserType::Study).await;
    let tutor_token = token_for(tutor.id);

    request(&pool, "request", tutor.id, &token_for(ada.id)).await;
    request(&pool, "start-now", tutor.id, &token_for(alan.id)).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/notifications",
        &tutor_token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["kind"], "session_start_now");
    assert_eq!(items[0]["sender_name"], "Alan");
    assert_eq!(items[0]["sender_profile_pic"], "https://img.test/Alan.png");
    assert_eq!(items[1]["kind"], "session_request");
    assert_eq!(items[1]["sender_name"], "Ada");

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/notifications?limit=1&offset=1",
        &tutor_token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["sender_name"], "Ada");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_all_read_keeps_actionable_notifications(pool: PgPool) {
    let student = create_user(&pool, "Ada", UserType::Study).await;
    let tutor = create_user(&pool, "Grace", UserType::Teach).await;
    let student_token = token_for(student.id);
    let tutor_token = token_for(tutor.id);

    let id = request(&pool, "request", tutor.id, &student_token).await;
    let response = put_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/sessions/{id}/reject"),
        &tutor_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // A second, still-open request leaves an actionable notice for the tutor.
    request(&pool, "start-now", tutor.id, &student_token).await;

    // The rejection notice was settled with its session; nothing is left
    // for the student to sweep.
    assert_eq!(unread(&pool, &student_token).await, 0);
    assert_eq!(unread(&pool, &tutor_token).await, 1);

    let response = put_auth(
        build_test_app(pool.clone()),
        "/api/v1/notifications/mark-all-read",
        &tutor_token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["marked_read"], 0);

    assert_eq!(unread(&pool, &tutor_token).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_all_read_sweeps_confirmations(pool: PgPool) {
    let student = create_user(&pool, "Ada", UserType::Study).await;
    let tutor = create_user(&pool, "Grace", UserType::Teach).await;
    let student_token = token_for(student.id);
    let tutor_token = token_for(tutor.id);

    let id = request(&pool, "request", tutor.id, &student_token).await;
    let response = common::put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/sessions/{id}/accept"),
        json!({ "scheduled_time": "Sunday" }),
        &tutor_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = put_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/sessions/{id}/confirm"),
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(unread(&pool, &tutor_token).await, 1);

    let response = put_auth(
        build_test_app(pool.clone()),
        "/api/v1/notifications/mark-all-read",
        &tutor_token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["marked_read"], 1);
    assert_eq!(unread(&pool, &tutor_token).await, 0);

    let response = put_auth(
        build_test_app(pool),
        "/api/v1/notifications/mark-all-read",
        &tutor_token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["marked_read"], 0);
}
