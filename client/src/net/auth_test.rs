use super::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{StatusCode, Uri};
use serde_json::json;

type Calls = Arc<Mutex<Vec<(String, Value)>>>;

/// Local stand-in for the gateway that answers every path with `status` + `reply`.
async fn spawn_gateway(status: StatusCode, reply: Value) -> (AuthAdapter, Calls) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = calls.clone();
    let router = Router::new().fallback(move |uri: Uri, Json(body): Json<Value>| {
        let recorded = recorded.clone();
        let reply = reply.clone();
        async move {
            recorded
                .lock()
                .expect("calls mutex should lock")
                .push((uri.path().to_owned(), body));
            (status, Json(reply))
        }
    });
    let base_url = serve(router).await;
    (adapter_for(&base_url), calls)
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server failed");
    });
    format!("http://{addr}")
}

fn adapter_for(base_url: &str) -> AuthAdapter {
    let config = AdapterConfig::new(base_url).with_timeouts(Duration::from_secs(2), Duration::from_secs(1));
    AuthAdapter::new(&config).expect("adapter")
}

async fn unreachable_adapter() -> AuthAdapter {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    adapter_for(&format!("http://{addr}"))
}

// =============================================================================
// success
// =============================================================================

#[tokio::test]
async fn login_resolves_with_backend_body_unmodified() {
    let (adapter, calls) = spawn_gateway(StatusCode::OK, json!({"token": "t1"})).await;

    let body = adapter.login(&Credentials::new("a@b.com", "x")).await.unwrap();

    assert_eq!(body, json!({"token": "t1"}));
    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("/auth/login".to_owned(), json!({"email": "a@b.com", "password": "x"}))]);
}

#[tokio::test]
async fn signup_sends_profile_fields_flat() {
    let (adapter, calls) = spawn_gateway(StatusCode::CREATED, json!({"id": "u-1"})).await;
    let request = SignupRequest::new("a@b.com", "pw").with_field("full_name", "Siti Rahayu");

    let body = adapter.signup(&request).await.unwrap();

    assert_eq!(body, json!({"id": "u-1"}));
    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls[0].0, "/auth/signup");
    assert_eq!(calls[0].1, json!({"email": "a@b.com", "password": "pw", "full_name": "Siti Rahayu"}));
}

#[tokio::test]
async fn forgot_password_twice_sends_two_requests() {
    let (adapter, calls) = spawn_gateway(StatusCode::ACCEPTED, json!({"sent": true})).await;

    adapter.forgot_password("a@b.com").await.unwrap();
    adapter.forgot_password("a@b.com").await.unwrap();

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    for (path, body) in calls {
        assert_eq!(path, "/auth/forgot-password");
        assert_eq!(body, json!({"email": "a@b.com"}));
    }
}

// =============================================================================
// failures
// =============================================================================

#[tokio::test]
async fn login_401_is_typed_request_failure() {
    let (adapter, _calls) = spawn_gateway(StatusCode::UNAUTHORIZED, json!({"error": "bad credentials"})).await;

    let err = adapter.login(&Credentials::new("a@b.com", "x")).await.unwrap_err();

    match &err {
        AuthError::RequestFailure { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body, &json!({"error": "bad credentials"}));
        }
        other => panic!("expected RequestFailure, got {other:?}"),
    }
    assert_eq!(err.status(), Some(401));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unreachable_gateway_is_network_failure() {
    let adapter = unreachable_adapter().await;

    let err = adapter.forgot_password("a@b.com").await.unwrap_err();

    assert!(matches!(err, AuthError::NetworkFailure(_)), "got {err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn invalid_input_is_rejected_before_network() {
    let (adapter, calls) = spawn_gateway(StatusCode::OK, json!({})).await;

    let err = adapter.login(&Credentials::new("a@b.com", "")).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidInput(FieldError::Empty("password"))));

    let err = adapter.signup(&SignupRequest::new("elder1", "pw")).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidInput(FieldError::MalformedEmail)));

    let err = adapter.forgot_password("  ").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidInput(FieldError::Empty("email"))));

    assert!(calls.lock().unwrap().is_empty());
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn endpoint_joins_base_and_route() {
    let adapter = adapter_for("http://gw.local:3000/");
    assert_eq!(adapter.base_url(), "http://gw.local:3000");
    assert_eq!(adapter.endpoint(AuthRoute::Signup), "http://gw.local:3000/auth/signup");
}

#[test]
fn parse_body_handles_empty_json_and_text() {
    assert_eq!(parse_body(b""), Value::Null);
    assert_eq!(parse_body(b"  \n"), Value::Null);
    assert_eq!(parse_body(br#"{"ok":true}"#), json!({"ok": true}));
    assert_eq!(parse_body(b"Bad Gateway"), json!("Bad Gateway"));
}

#[test]
fn retryable_statuses() {
    let failure = |status| AuthError::RequestFailure { status, body: Value::Null };
    assert!(failure(502).is_retryable());
    assert!(failure(429).is_retryable());
    assert!(!failure(400).is_retryable());
    assert!(!AuthError::InvalidInput(FieldError::MalformedEmail).is_retryable());
}
