//! End-to-end account flows through the full router.

mod common;

use actix_web::test as actix_test;
use backend::server::build_app;
use serde_json::{json, Value};

use common::test_parts;

fn signup_body(email: &str) -> Value {
    json!({
        "name": "Asha Rao",
        "email": email,
        "phone": "9876500000",
        "state": "Kerala",
        "password": "s3cret",
    })
}

#[actix_web::test]
async fn signup_login_and_listing_round_trip() {
    let parts = test_parts();
    let mut feed = parts.ws_state.subscribe();
    let app = actix_test::init_service(build_app(
        parts.http_state.clone(),
        parts.ws_state.clone(),
        parts.health_state.clone(),
    ))
    .await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/newUser")
            .set_json(signup_body("asha@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), 201);
    assert!(created.headers().contains_key("trace-id"));
    let created: Value = actix_test::read_body_json(created).await;
    let uid = created["user"]["uid"].as_str().expect("issued uid");
    assert!(uid.starts_with("ATS"));
    assert_eq!(uid.len(), 13);

    // The signup was announced on the live feed without the password hash.
    let event = feed.recv().await.expect("signup event delivered");
    assert_eq!(event.email, "asha@example.com");
    let event = serde_json::to_value(&event).expect("event serialises");
    assert!(event.get("passwordHash").is_none());

    let login = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": "asha@example.com", "password": "s3cret" }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), 200);
    let login: Value = actix_test::read_body_json(login).await;
    assert_eq!(login["role"], "user");

    let exists = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users/isExist")
            .set_json(json!({ "email": "asha@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(exists.status(), 200);

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/data").to_request(),
    )
    .await;
    assert_eq!(listed.status(), 200);
    let listed: Value = actix_test::read_body_json(listed).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert!(listed[0].get("passwordHash").is_none());
}

#[actix_web::test]
async fn duplicate_signup_returns_conflict_envelope() {
    let parts = test_parts();
    let app = actix_test::init_service(build_app(
        parts.http_state.clone(),
        parts.ws_state.clone(),
        parts.health_state.clone(),
    ))
    .await;

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/newUser")
            .set_json(signup_body("asha@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), 201);

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/newUser")
            .set_json(signup_body("asha@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), 409);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "User already exists");
}

#[actix_web::test]
async fn blank_fields_are_rejected_with_field_details() {
    let parts = test_parts();
    let app = actix_test::init_service(build_app(
        parts.http_state.clone(),
        parts.ws_state.clone(),
        parts.health_state.clone(),
    ))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/newUser")
            .set_json(json!({
                "name": "Asha Rao",
                "email": "",
                "phone": "9876500000",
                "state": "Kerala",
                "password": "s3cret",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 400);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "email");
}

#[actix_web::test]
async fn admin_login_falls_back_to_the_admin_store() {
    let parts = test_parts();
    let app = actix_test::init_service(build_app(
        parts.http_state.clone(),
        parts.ws_state.clone(),
        parts.health_state.clone(),
    ))
    .await;

    let provisioned = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/adminData")
            .set_json(json!({
                "name": "Ops Admin",
                "email": "ops@example.com",
                "phone": "9876511111",
                "password": "s3cret",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(provisioned.status(), 201);

    let login = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": "ops@example.com", "password": "s3cret" }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), 200);
    let body: Value = actix_test::read_body_json(login).await;
    assert_eq!(body["role"], "admin");
}

#[actix_web::test]
async fn health_probes_follow_readiness() {
    let parts = test_parts();
    let app = actix_test::init_service(build_app(
        parts.http_state.clone(),
        parts.ws_state.clone(),
        parts.health_state.clone(),
    ))
    .await;

    let not_ready = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(not_ready.status(), 503);

    parts.health_state.mark_ready();
    let ready = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(ready.status(), 200);
}
