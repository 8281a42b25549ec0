//! Integration tests for the verification endpoints

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use serde_json::{json, Value};

use common::{session_cookie, wrong_code, TestContext, TestSessionFactory, EXISTING_PHONE, NEW_PHONE};
use rj_api::create_app;
use rj_shared::config::CorsConfig;

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(create_app($ctx.state.clone(), &CorsConfig::development())).await
    };
}

fn phone_body(phone: &str) -> Value {
    json!({ "phone": phone, "recaptcha_token": "browser-token" })
}

#[actix_rt::test]
async fn test_existing_rider_goes_home_after_otp() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["stage"], "awaiting_otp");
    assert_eq!(body["data"]["phone"], "987****210");
    assert_eq!(body["data"]["otp_length"], 6);
    assert_eq!(body["data"]["resend_after_seconds"], 30);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/otp")
        .cookie(cookie.clone())
        .set_json(json!({ "code": ctx.code_for(EXISTING_PHONE) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["stage"], "done");
    assert_eq!(body["data"]["next"]["route"], "home");

    assert!(ctx.backend.registrations.lock().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_new_rider_completes_profile() {
    let ctx = TestContext::new(TestSessionFactory::new(Default::default()));
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(NEW_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/otp")
        .cookie(cookie.clone())
        .set_json(json!({ "code": ctx.code_for(NEW_PHONE) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["stage"], "completing_profile");
    assert_eq!(body["data"]["next"]["route"], "complete_profile");
    assert_eq!(body["data"]["next"]["phone"], NEW_PHONE);
    assert_eq!(body["data"]["next"]["user_id"], format!("mock-{}", NEW_PHONE));

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/profile")
        .cookie(cookie.clone())
        .set_json(json!({ "name": "A", "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(
        body["details"]["fields"]["name"],
        "Name must be at least 2 characters"
    );
    assert_eq!(body["details"]["fields"]["email"], "Please enter a valid email");
    assert!(ctx.backend.registrations.lock().unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/profile")
        .cookie(cookie.clone())
        .set_json(json!({ "name": "  Asha Rao ", "email": " asha@example.com " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["stage"], "done");
    assert_eq!(body["data"]["next"]["route"], "home");

    let registrations = ctx.backend.registrations.lock().unwrap().clone();
    assert_eq!(
        registrations,
        vec![(
            "Asha Rao".to_string(),
            "asha@example.com".to_string(),
            NEW_PHONE.to_string()
        )]
    );
}

#[actix_rt::test]
async fn test_invalid_phone_is_rejected_before_any_call() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body("98765"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    // The session still exists so a retry keeps the same verifier
    let _cookie = session_cookie(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(ctx.identity.pending_count(), 0);
}

#[actix_rt::test]
async fn test_backend_failure_message_is_passed_through() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    ctx.backend.fail_checks("Server is waking up, try again");
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "REMOTE_ERROR");
    assert_eq!(body["message"], "Server is waking up, try again");
    assert_eq!(ctx.identity.pending_count(), 0);
}

#[actix_rt::test]
async fn test_missing_recaptcha_token_fails_issuance() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(json!({ "phone": EXISTING_PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let cookie = session_cookie(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CHALLENGE_ISSUANCE_FAILED");

    // Retrying on the same session with a token succeeds
    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .cookie(cookie)
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .response()
        .cookies()
        .all(|cookie| cookie.name() != rj_api::session::SESSION_COOKIE));
}

#[actix_rt::test]
async fn test_wrong_code_is_unauthorized() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/otp")
        .cookie(cookie.clone())
        .set_json(json!({ "code": wrong_code(&ctx.code_for(EXISTING_PHONE)) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VERIFICATION_CODE_INVALID");
    assert_eq!(body["message"], "Invalid OTP. Please try again.");

    let req = test::TestRequest::get()
        .uri("/api/v1/verification")
        .cookie(cookie)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["stage"], "awaiting_otp");
}

#[actix_rt::test]
async fn test_short_code_reports_expected_length() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/otp")
        .cookie(cookie)
        .set_json(json!({ "code": "123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["expected_length"], 6);
    assert_eq!(ctx.identity.pending_count(), 1);
}

#[actix_rt::test]
async fn test_resend_during_cooldown_is_throttled() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);
    let first_code = ctx.code_for(EXISTING_PHONE);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/resend")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u32 = resp
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .expect("Retry-After header");
    assert!(retry_after > 0 && retry_after <= 30);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "COOLDOWN_ACTIVE");
    assert_eq!(body["details"]["remaining_seconds"], retry_after);
    assert_eq!(ctx.code_for(EXISTING_PHONE), first_code);
}

#[actix_rt::test]
async fn test_change_number_returns_to_phone_entry() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/change-number")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["stage"], "entering_phone");
    assert_eq!(body["data"]["resend_cooldown_seconds"], 0);
    assert!(body["data"].get("phone").is_none());

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/otp")
        .cookie(cookie)
        .set_json(json!({ "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "STAGE_MISMATCH");
    assert_eq!(body["details"]["expected_stage"], "awaiting_otp");
    assert_eq!(body["details"]["actual_stage"], "entering_phone");
}

#[actix_rt::test]
async fn test_finished_session_is_replaced_on_next_phone_submit() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/otp")
        .cookie(cookie.clone())
        .set_json(json!({ "code": ctx.code_for(EXISTING_PHONE) }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .cookie(cookie.clone())
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let replacement = session_cookie(&resp);
    assert_ne!(replacement.value(), cookie.value());
    assert_eq!(ctx.state.sessions.len().await, 1);
}

#[actix_rt::test]
async fn test_snapshot_and_abandon() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get()
        .uri("/api/v1/verification")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["stage"], "awaiting_otp");
    assert_eq!(body["data"]["phone"], "987****210");
    assert_eq!(body["data"]["exists"], true);
    assert_eq!(body["data"]["can_resend"], false);

    let req = test::TestRequest::delete()
        .uri("/api/v1/verification")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(ctx.state.sessions.is_empty().await);

    let req = test::TestRequest::get()
        .uri("/api/v1/verification")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SESSION_NOT_FOUND");
}

#[actix_rt::test]
async fn test_operations_without_session_are_not_found() {
    let ctx = TestContext::with_registered(EXISTING_PHONE);
    let app = init_app!(ctx);

    for uri in [
        "/api/v1/verification/otp",
        "/api/v1/verification/resend",
        "/api/v1/verification/change-number",
    ] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(json!({ "code": "123456" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_rt::test]
async fn test_session_factory_failure_is_internal_error() {
    let ctx = TestContext::new(TestSessionFactory::unavailable());
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/phone")
        .set_json(phone_body(EXISTING_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert!(ctx.state.sessions.is_empty().await);
}
