//! Per-case assertion counts against canned responses
//!
//! Each test serves exactly the response under test and checks how many
//! assertions the case recorded, and of which outcome.

use actix_web::{HttpResponse, web};
use auth_smoke::Case;
use auth_smoke::testing::{MockAuthApi, MockServer, refused_base_url, setup};
use serde_json::json;

fn canned_signup(status: u16, body: serde_json::Value) -> MockServer {
    MockServer::start_with(move |cfg: &mut web::ServiceConfig| {
        let body = body.clone();
        cfg.route(
            "/auth/signup",
            web::post().to(move || {
                let body = body.clone();
                async move {
                    let status = actix_web::http::StatusCode::from_u16(status).unwrap();
                    HttpResponse::build(status).json(body)
                }
            }),
        );
    })
    .unwrap()
}

// =============================================================================
// SIGNUP TESTS
// =============================================================================

#[actix_web::test]
async fn test_signup_success_with_canned_response_has_no_failures() {
    let server = canned_signup(
        201,
        json!({
            "user": { "id": "1", "email": "a@b.com", "name": "A" },
            "accessToken": "x",
            "refreshToken": "y",
        }),
    );
    let (mut harness, output) = setup::harness(&server.base_url());

    harness.run_case(Case::SignupSuccess, &mut None).await.unwrap();

    let stats = harness.stats();
    assert_eq!(stats.failed(), 0, "Report:\n{}", output.contents());
    // status, three top-level fields, three user fields, three user field kinds
    assert_eq!(stats.passed(), 10);
    assert!(output.contents().contains("  Response:"));

    server.stop().await;
}

#[actix_web::test]
async fn test_signup_invalid_email_records_only_the_status() {
    let server = MockServer::start(MockAuthApi::lenient()).unwrap();
    let (mut harness, output) = setup::harness(&server.base_url());

    harness.run_case(Case::SignupInvalidEmail, &mut None).await.unwrap();

    let stats = harness.stats();
    assert_eq!(stats.total(), 1);
    assert_eq!(stats.passed(), 1);
    assert!(output.contents().contains("✓ Status code is 400"));

    server.stop().await;
}

#[actix_web::test]
async fn test_signup_wrong_user_id_kind_is_one_failure() {
    let server = canned_signup(
        201,
        json!({
            "user": { "id": 42, "email": "a@b.com", "name": "A" },
            "accessToken": "x",
            "refreshToken": "y",
        }),
    );
    let (mut harness, output) = setup::harness(&server.base_url());

    harness.run_case(Case::SignupSuccess, &mut None).await.unwrap();

    let stats = harness.stats();
    assert_eq!(stats.failed(), 1);
    assert_eq!(stats.passed(), 9);
    assert!(output.contents().contains("✗ Field 'id' is number, expected string"));

    server.stop().await;
}

#[actix_web::test]
async fn test_signup_user_that_is_not_an_object() {
    let server = canned_signup(
        201,
        json!({ "user": "someone", "accessToken": "x", "refreshToken": "y" }),
    );
    let (mut harness, output) = setup::harness(&server.base_url());

    harness.run_case(Case::SignupSuccess, &mut None).await.unwrap();

    let stats = harness.stats();
    assert_eq!(stats.total(), 5);
    assert_eq!(stats.failed(), 1);
    assert!(output.contents().contains("✗ Field 'user' is string, expected object"));

    server.stop().await;
}

#[actix_web::test]
async fn test_signup_error_page_is_reported_with_raw_body() {
    let server = MockServer::start_with(|cfg: &mut web::ServiceConfig| {
        cfg.route(
            "/auth/signup",
            web::post().to(|| async { HttpResponse::InternalServerError().body("boom") }),
        );
    })
    .unwrap();
    let (mut harness, output) = setup::harness(&server.base_url());

    harness.run_case(Case::SignupSuccess, &mut None).await.unwrap();

    let stats = harness.stats();
    // wrong status, then a body that is not a JSON object
    assert_eq!(stats.failed(), 2);
    assert_eq!(stats.total(), 2);

    let report = output.contents();
    assert!(report.contains("✗ Expected 201, got 500"));
    assert!(report.contains("ℹ Response: boom"));
    assert!(report.contains("✗ Response body is not a JSON object"));

    server.stop().await;
}

// =============================================================================
// AUTHENTICATED ENDPOINT TESTS
// =============================================================================

#[actix_web::test]
async fn test_me_without_token_records_one_pass() {
    let server = MockServer::start(MockAuthApi::lenient()).unwrap();
    let (mut harness, _output) = setup::harness(&server.base_url());

    harness.run_case(Case::MeWithoutToken, &mut None).await.unwrap();

    let stats = harness.stats();
    assert_eq!(stats.total(), 1);
    assert_eq!(stats.passed(), 1);

    server.stop().await;
}

#[actix_web::test]
async fn test_me_with_no_token_available_fails_without_request() {
    let (mut harness, output) = setup::harness(&refused_base_url().unwrap());

    harness.run_case(Case::MeWithToken, &mut None).await.unwrap();

    let stats = harness.stats();
    assert_eq!(stats.total(), 1);
    assert_eq!(stats.failed(), 1);

    let report = output.contents();
    assert!(report.contains("No token available from login or configuration"));
    assert!(!report.contains("Connection error"));
}

#[actix_web::test]
async fn test_login_with_configured_token_records_nothing() {
    let mut config = setup::config(&refused_base_url().unwrap());
    config.auth.token = Some("operator-token".to_string());
    let (mut harness, _output) = setup::harness_with(config);

    let mut token = None;
    harness.run_case(Case::LoginSuccess, &mut token).await.unwrap();

    assert_eq!(token.as_deref(), Some("operator-token"));
    assert_eq!(harness.stats().total(), 0);
}

// =============================================================================
// CONNECTION FAILURE TESTS
// =============================================================================

#[actix_web::test]
async fn test_connection_refused_is_exactly_one_failure() {
    let base_url = refused_base_url().unwrap();
    let (mut harness, output) = setup::harness(&base_url);

    harness.run_case(Case::SignupSuccess, &mut None).await.unwrap();

    let stats = harness.stats();
    assert_eq!(stats.total(), 1);
    assert_eq!(stats.failed(), 1);
    assert!(output
        .contents()
        .contains(&format!("✗ Connection error - is server running at {}?", base_url)));
}

#[actix_web::test]
async fn test_full_run_against_unreachable_target() {
    let (mut harness, output) = setup::harness(&refused_base_url().unwrap());

    let stats = harness.run_all().await.unwrap();

    // one connection failure per requesting case, plus the missing token
    assert_eq!(stats.failed(), Case::ALL.len() as u32);
    assert_eq!(stats.passed(), 0);
    assert_eq!(harness.finish(auth_smoke::Termination::Completed), 1);
    assert!(output.contents().contains("Success Rate: 0.0%"));
}
