//! HTTP-level tests for site content, services, team, and settings.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, configure_email, delete_auth, get, get_auth, post_auth,
    post_json_auth, put_json_auth, uploaded,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Singleton sections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn hero_defaults_then_upsert(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = admin_token(&pool, test.app()).await;

    let json = body_json(get(test.app(), "/api/v1/hero").await).await;
    assert!(json["data"]["background_image_url"].is_null());

    let background = uploaded(test.app(), &token, "hero.jpg").await;
    let body = serde_json::json!({
        "title": "  We build homes  ",
        "subtitle": "Since 1998",
        "background_image_url": background,
    });
    let response = put_json_auth(test.app(), "/api/v1/admin/hero", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(test.app(), "/api/v1/hero").await).await;
    assert_eq!(json["data"]["title"], "We build homes");
    assert_eq!(json["data"]["background_image_url"], background.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replacing_hero_background_deletes_old_file(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = admin_token(&pool, test.app()).await;
    let first = uploaded(test.app(), &token, "first.jpg").await;
    let second = uploaded(test.app(), &token, "second.jpg").await;

    for background in [&first, &second] {
        let body = serde_json::json!({ "title": "Hero", "background_image_url": background });
        let response = put_json_auth(test.app(), "/api/v1/admin/hero", body, &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert!(!test.stored(&first));
    assert!(test.stored(&second));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_info_round_trips_social_links(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = admin_token(&pool, test.app()).await;

    let body = serde_json::json!({
        "address": "Main St 1, Ljubljana",
        "phone": "+386 1 234 567",
        "email": "office@builder.test",
        "working_hours": "Mon-Fri 8-16",
        "social_links": [{ "platform": "facebook", "url": "https://facebook.com/builder" }],
    });
    let response = put_json_auth(test.app(), "/api/v1/admin/contact-info", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(test.app(), "/api/v1/contact").await).await;
    assert_eq!(json["data"]["social_links"][0]["platform"], "facebook");
    assert_eq!(json["data"]["email"], "office@builder.test");
}

// ---------------------------------------------------------------------------
// Services and team
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn services_are_listed_in_sort_order(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = admin_token(&pool, test.app()).await;

    for (name, order) in [("Roofing", 2), ("Design", 1)] {
        let body = serde_json::json!({ "name": name, "sort_order": order });
        let response = post_json_auth(test.app(), "/api/v1/admin/services", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(test.app(), "/api/v1/services").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Design", "Roofing"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn service_requires_name(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = admin_token(&pool, test.app()).await;

    let body = serde_json::json!({ "name": "   " });
    let response = post_json_auth(test.app(), "/api/v1/admin/services", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn team_member_crud(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = admin_token(&pool, test.app()).await;
    let photo = uploaded(test.app(), &token, "ana.jpg").await;

    let body = serde_json::json!({ "name": "Ana Kos", "position": "Site manager", "photo_url": photo });
    let response = post_json_auth(test.app(), "/api/v1/admin/team", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({ "position": "Head of construction" });
    let response =
        put_json_auth(test.app(), &format!("/api/v1/admin/team/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["position"], "Head of construction");
    assert_eq!(json["data"]["name"], "Ana Kos");

    let response = delete_auth(test.app(), &format!("/api/v1/admin/team/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!test.stored(&photo));

    let response = get(test.app(), &format!("/api/v1/team/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_settings_never_expose_password(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = admin_token(&pool, test.app()).await;

    let body = serde_json::json!({
        "smtp_host": "smtp.builder.test",
        "smtp_port": 465,
        "smtp_user": "site",
        "smtp_password": "s3cret",
        "from_address": "site@builder.test",
        "recipient_email": "office@builder.test",
        "is_active": true,
    });
    let response = put_json_auth(test.app(), "/api/v1/admin/email-settings", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(test.app(), "/api/v1/admin/email-settings", &token).await).await;
    assert_eq!(json["data"]["has_password"], true);
    assert!(json["data"].get("smtp_password").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_test_sends_to_recipient(pool: PgPool) {
    configure_email(&pool).await;
    let test = common::build_test_app(pool.clone());
    let token = admin_token(&pool, test.app()).await;

    let response = post_auth(test.app(), "/api/v1/admin/email-settings/test", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let sent = test.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "office@builder.test");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn analytics_settings_validate_measurement_id(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = admin_token(&pool, test.app()).await;

    let body = serde_json::json!({ "measurement_id": "UA-12345", "is_active": true });
    let response =
        put_json_auth(test.app(), "/api/v1/admin/analytics-settings", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "measurement_id": "G-ABC123XYZ", "is_active": true });
    let response =
        put_json_auth(test.app(), "/api/v1/admin/analytics-settings", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let check = body_json(
        post_auth(test.app(), "/api/v1/admin/analytics-settings/test", &token).await,
    )
    .await;
    assert_eq!(check["data"]["valid"], true);

    let public = body_json(get(test.app(), "/api/v1/analytics-settings").await).await;
    assert_eq!(public["data"]["measurement_id"], "G-ABC123XYZ");
    assert_eq!(public["data"]["is_active"], true);
}
