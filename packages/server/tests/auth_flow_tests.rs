//! End-to-end tests for OTP signup and login over the HTTP router.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use notes_core::domains::auth::OtpPolicy;
use notes_core::kernel::test_dependencies::MockMailer;
use notes_core::kernel::{BaseUserStore, TestDependencies};
use serde_json::json;

const EMAIL: &str = "a@x.com";

fn signup_body(otp: &str) -> serde_json::Value {
    json!({
        "name": "Ada",
        "dob": "1995-06-15",
        "email": EMAIL,
        "otp": otp,
    })
}

#[tokio::test]
async fn signup_issues_token_and_creates_user() {
    let client = TestClient::new();

    let sent = client.post("/send-otp", None, json!({ "email": EMAIL })).await;
    assert_eq!(sent.status, StatusCode::OK);
    assert_eq!(sent.message(), "OTP sent to your email");

    let otp = client.mailed_code(EMAIL);
    let verified = client.post("/verify-otp", None, signup_body(&otp)).await;

    assert_eq!(verified.status, StatusCode::OK);
    assert_eq!(verified.message(), "Signup successful");

    let claims = client
        .deps
        .jwt_service
        .verify_token(&verified.token())
        .unwrap();
    let user = client
        .deps
        .store
        .find_by_email(EMAIL)
        .await
        .unwrap()
        .expect("user created");
    assert_eq!(claims.user_id, user.id);
    assert_eq!(user.name, "Ada");
    assert!(client.deps.otp_store.is_empty().await);
}

#[tokio::test]
async fn wrong_code_creates_no_user_and_keeps_pending_record() {
    let client = TestClient::new();
    client.post("/send-otp", None, json!({ "email": EMAIL })).await;
    let otp = client.mailed_code(EMAIL);
    let wrong = if otp == "000000" { "111111" } else { "000000" };

    let response = client.post("/verify-otp", None, signup_body(wrong)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid OTP");
    assert_eq!(client.deps.store.user_count().await, 0);
    assert!(client.deps.otp_store.get(EMAIL).await.is_some());

    // The right code still works afterwards
    let retry = client.post("/verify-otp", None, signup_body(&otp)).await;
    assert_eq!(retry.status, StatusCode::OK);
}

#[tokio::test]
async fn code_is_single_use() {
    let client = TestClient::new();
    client.post("/send-otp", None, json!({ "email": EMAIL })).await;
    let otp = client.mailed_code(EMAIL);

    let first = client.post("/verify-otp", None, signup_body(&otp)).await;
    assert_eq!(first.status, StatusCode::OK);

    let replay = client
        .post("/login", None, json!({ "email": EMAIL, "otp": otp }))
        .await;
    assert_eq!(replay.status, StatusCode::BAD_REQUEST);
    assert_eq!(replay.message(), "No OTP was requested for this email");
}

#[tokio::test]
async fn resend_invalidates_previous_code() {
    let client = TestClient::new();
    client.post("/send-otp", None, json!({ "email": EMAIL })).await;
    let first = client.mailed_code(EMAIL);
    client.post("/send-otp", None, json!({ "email": EMAIL })).await;
    let second = client.mailed_code(EMAIL);

    if first != second {
        let stale = client.post("/verify-otp", None, signup_body(&first)).await;
        assert_eq!(stale.status, StatusCode::BAD_REQUEST);
    }

    let fresh = client.post("/verify-otp", None, signup_body(&second)).await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn expired_code_reports_expiry() {
    let deps = TestDependencies::new().otp_policy(OtpPolicy {
        ttl: chrono::Duration::zero(),
        ..OtpPolicy::default()
    });
    let client = TestClient::with_deps(deps);
    client.post("/send-otp", None, json!({ "email": EMAIL })).await;
    let otp = client.mailed_code(EMAIL);

    // Every attempt reports expiry, including after a sweep
    for sweep in [false, false, true] {
        if sweep {
            client
                .deps
                .otp_store
                .purge_expired(chrono::Utc::now(), OtpPolicy::default().ttl)
                .await;
        }
        let response = client.post("/verify-otp", None, signup_body(&otp)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message(), "OTP has expired, please request a new one");
    }
    assert_eq!(client.deps.store.user_count().await, 0);
}

#[tokio::test]
async fn login_after_signup() {
    let client = TestClient::new();
    client.sign_up("Ada", EMAIL).await;

    // Mixed case and padding resolve to the same account
    client
        .post("/send-otp", None, json!({ "email": "  A@X.com " }))
        .await;
    let otp = client.mailed_code(EMAIL);
    let response = client
        .post("/login", None, json!({ "email": "A@x.COM", "otp": otp }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Login successful");
    assert_eq!(client.deps.store.user_count().await, 1);
}

#[tokio::test]
async fn login_for_unknown_email_is_not_found() {
    let client = TestClient::new();
    client.post("/send-otp", None, json!({ "email": EMAIL })).await;
    let otp = client.mailed_code(EMAIL);

    let response = client
        .post("/login", None, json!({ "email": EMAIL, "otp": otp }))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    // Code survives so the user can finish signing up with it
    let signup = client.post("/verify-otp", None, signup_body(&otp)).await;
    assert_eq!(signup.status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let client = TestClient::new();
    client.sign_up("Ada", EMAIL).await;

    client.post("/send-otp", None, json!({ "email": EMAIL })).await;
    let otp = client.mailed_code(EMAIL);
    let response = client.post("/verify-otp", None, signup_body(&otp)).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(client.deps.store.user_count().await, 1);
}

#[tokio::test]
async fn signup_uses_profile_sent_with_otp_request() {
    let client = TestClient::new();
    client
        .post(
            "/send-otp",
            None,
            json!({ "email": EMAIL, "name": "Grace", "dob": "1990-12-09" }),
        )
        .await;
    let otp = client.mailed_code(EMAIL);

    let response = client
        .post("/verify-otp", None, json!({ "email": EMAIL, "otp": otp }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let user = client.deps.store.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(user.name, "Grace");
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let client = TestClient::new();

    let response = client
        .post("/send-otp", None, json!({ "email": "not-an-email" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(client.deps.mailer.sent().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let client = TestClient::new();

    let response = client
        .post("/login", None, json!(["not", "an", "object"]))
        .await;

    assert!(response.status.is_client_error());
    assert!(!response.message().is_empty());
}

#[tokio::test]
async fn mailer_failure_is_bad_gateway() {
    let deps = TestDependencies::new().mock_mailer(MockMailer::failing());
    let client = TestClient::with_deps(deps);

    let response = client.post("/send-otp", None, json!({ "email": EMAIL })).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.message(), "Failed to send OTP email");
    assert!(client.deps.otp_store.get(EMAIL).await.is_some());
}
