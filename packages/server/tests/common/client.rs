//! In-process HTTP client over the full router.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so every middleware layer
//! runs exactly as it does behind a real listener.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use notes_core::kernel::TestDependencies;
use notes_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    pub fn token(&self) -> String {
        self.body["token"]
            .as_str()
            .expect("response carries a token")
            .to_string()
    }
}

pub struct TestClient {
    pub deps: TestDependencies,
    router: Router,
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_deps(TestDependencies::new())
    }

    pub fn with_deps(deps: TestDependencies) -> Self {
        let router = build_app(deps.server_deps(), &[]);
        Self { deps, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Code most recently mailed to `email`
    pub fn mailed_code(&self, email: &str) -> String {
        self.deps
            .mailer
            .last_code_for(email)
            .expect("a code was mailed")
    }

    /// Run the whole signup flow and return the session token
    pub async fn sign_up(&self, name: &str, email: &str) -> String {
        let sent = self
            .post("/send-otp", None, serde_json::json!({ "email": email }))
            .await;
        assert_eq!(sent.status, StatusCode::OK, "{}", sent.body);

        let otp = self.mailed_code(email);
        let verified = self
            .post(
                "/verify-otp",
                None,
                serde_json::json!({
                    "name": name,
                    "dob": "1995-06-15",
                    "email": email,
                    "otp": otp,
                }),
            )
            .await;
        assert_eq!(verified.status, StatusCode::OK, "{}", verified.body);

        verified.token()
    }
}
