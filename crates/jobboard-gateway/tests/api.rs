//! HTTP API flows against an in-memory store and the mock token validator.

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};

use jobboard_auth::MockJwtValidator;
use jobboard_gateway::{create_router, GatewayConfig, GatewayState};
use jobboard_roles::RoleManagerService;
use jobboard_store::MemoryStore;

fn server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let roles = Arc::new(RoleManagerService::with_defaults(Arc::clone(&store)));
    let state = GatewayState::new(
        roles,
        Arc::new(MockJwtValidator::default()),
        GatewayConfig::default(),
    );
    (TestServer::new(create_router(state)).unwrap(), store)
}

fn as_user(request: TestRequest, uid: &str) -> TestRequest {
    let token = format!("Bearer test-token:{uid}:{uid}@example.com");
    request.add_header(
        header::AUTHORIZATION,
        HeaderValue::from_str(&token).unwrap(),
    )
}

async fn register(server: &TestServer, uid: &str) {
    as_user(server.post("/v1/accounts"), uid)
        .await
        .assert_status_ok();
}

async fn create_profile(server: &TestServer, uid: &str, role: &str) -> Value {
    let response = as_user(server.post(&format!("/v1/profiles/{role}")), uid)
        .json(&json!({ "displayName": uid }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn health_needs_no_token() {
    let (server, _store) = server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], json!("healthy"));
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (server, _store) = server();

    let response = server.get("/v1/roles/login").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"]["code"], json!("unauthorized"));

    let response = server
        .get("/v1/roles/login")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer garbage"),
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_is_idempotent() {
    let (server, _store) = server();

    let first = as_user(server.post("/v1/accounts"), "u1").await;
    first.assert_status_ok();
    let first: Value = first.json();
    assert_eq!(first["uid"], json!("u1"));
    assert_eq!(first["email"], json!("u1@example.com"));
    assert_eq!(
        first["preferences"]["roleSelectionPreference"],
        json!("ask")
    );

    let second: Value = as_user(server.post("/v1/accounts"), "u1").await.json();
    assert_eq!(second["createdAt"], first["createdAt"]);
}

#[tokio::test]
async fn login_without_account_is_not_found() {
    let (server, _store) = server();

    let response = as_user(server.get("/v1/roles/login"), "ghost").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], json!("not_found"));
}

#[tokio::test]
async fn profile_without_account_is_not_found() {
    let (server, _store) = server();

    let response = as_user(server.post("/v1/profiles/candidate"), "ghost")
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dual_profile_flow() {
    let (server, _store) = server();
    register(&server, "u1").await;

    let profiles = create_profile(&server, "u1", "candidate").await;
    assert_eq!(profiles["availableRoles"], json!(["candidate"]));
    let profiles = create_profile(&server, "u1", "company").await;
    assert_eq!(profiles["availableRoles"], json!(["candidate", "company"]));

    // No session exists before the first activation.
    as_user(server.get("/v1/sessions/current"), "u1")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // `ask` with both profiles requires a choice.
    let decision: Value = as_user(server.get("/v1/roles/login"), "u1").await.json();
    assert_eq!(decision["availableRoles"], json!(["candidate", "company"]));
    assert_eq!(decision["requiresSelection"], json!(true));

    let outcome: Value = as_user(server.post("/v1/roles/login"), "u1").await.json();
    assert!(outcome.get("session").is_none());

    // Pick a role explicitly.
    let session = as_user(server.post("/v1/roles/switch"), "u1")
        .json(&json!({ "role": "company" }))
        .await;
    session.assert_status_ok();
    let session: Value = session.json();
    assert_eq!(session["activeRole"], json!("company"));
    assert!(session.get("previousRole").is_none());

    let current: Value = as_user(server.get("/v1/sessions/current"), "u1")
        .await
        .json();
    assert_eq!(current, session);

    // Remember the choice for the next login.
    as_user(server.put("/v1/roles/preference"), "u1")
        .json(&json!({ "preference": "candidate" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let outcome: Value = as_user(server.post("/v1/roles/login"), "u1").await.json();
    assert_eq!(outcome["decision"]["recommendedRole"], json!("candidate"));
    assert_eq!(outcome["decision"]["requiresSelection"], json!(false));
    assert_eq!(outcome["session"]["activeRole"], json!("candidate"));
    assert_eq!(outcome["session"]["previousRole"], json!("company"));
    assert_eq!(
        outcome["session"]["sessionData"]["roleHistory"][0]["role"],
        json!("company")
    );
}

#[tokio::test]
async fn switch_to_missing_profile_conflicts() {
    let (server, _store) = server();
    register(&server, "u1").await;
    create_profile(&server, "u1", "candidate").await;

    let response = as_user(server.post("/v1/roles/switch"), "u1")
        .json(&json!({ "role": "company" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], json!("conflict"));

    as_user(server.get("/v1/sessions/current"), "u1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_role_names_are_bad_requests() {
    let (server, _store) = server();
    register(&server, "u1").await;

    let response = as_user(server.post("/v1/roles/switch"), "u1")
        .json(&json!({ "role": "admin" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        json!("bad_request")
    );

    as_user(server.post("/v1/profiles/recruiter"), "u1")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    as_user(server.put("/v1/roles/preference"), "u1")
        .json(&json!({ "preference": "sometimes" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_outage_is_unavailable() {
    let (server, store) = server();
    register(&server, "u1").await;
    store.set_available(false);

    let response = as_user(server.get("/v1/roles/login"), "u1").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        json!("unavailable")
    );
}

#[tokio::test]
async fn malformed_bodies_use_error_envelope() {
    let (server, _store) = server();
    register(&server, "u1").await;

    let response = as_user(server.post("/v1/roles/switch"), "u1")
        .json(&json!({ "role": 7 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        json!("bad_request")
    );

    let response = as_user(server.put("/v1/roles/preference"), "u1")
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        json!("bad_request")
    );

    let response = as_user(server.post("/v1/profiles/candidate"), "u1")
        .json(&json!(["not", "an", "object"]))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        json!("bad_request")
    );
}
