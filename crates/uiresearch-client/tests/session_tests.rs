//! Session manager tests against a mock auth API.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use uiresearch_client::session::{AuthForm, SignupForm};
use uiresearch_client::{
    ApiClient, Config, MemoryTokenStore, Plan, PricingPage, SessionManager, TokenStore,
};

fn setup_session(base_url: &str, store: &MemoryTokenStore) -> SessionManager {
    let config = Config::for_testing(base_url);
    let client = ApiClient::new(&config).unwrap();
    SessionManager::new(client, Arc::new(store.clone()))
}

fn sample_user() -> serde_json::Value {
    json!({
        "id": 7,
        "email": "ada@example.org",
        "full_name": "Ada Lovelace",
        "is_active": true,
        "is_verified": false,
        "created_at": "2024-05-01T10:00:00"
    })
}

fn valid_signup() -> SignupForm {
    SignupForm {
        full_name: String::new(),
        email: "ada@example.org".to_string(),
        password: "analytical-engine".to_string(),
        confirm_password: "analytical-engine".to_string(),
        terms_accepted: true,
    }
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_stores_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("username=ada%40example.org&password=secret123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "jwt-token", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    let session = setup_session(&mock_server.uri(), &store);
    let mut form = AuthForm::new();

    assert!(session.submit_login(&mut form, "ada@example.org", "secret123").await);

    assert!(session.is_logged_in());
    assert_eq!(store.get("auth_token").unwrap().as_deref(), Some("jwt-token"));
    assert_eq!(form.success.as_deref(), Some("¡Inicio de sesión exitoso! Redirigiendo..."));
    assert_eq!(form.redirect.as_ref().unwrap().location, "/");
}

#[tokio::test]
async fn test_login_wrong_password_shows_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    let session = setup_session(&mock_server.uri(), &store);
    let mut form = AuthForm::new();

    assert!(!session.submit_login(&mut form, "ada@example.org", "wrong").await);

    assert_eq!(form.error.as_deref(), Some("Incorrect email or password"));
    assert!(form.submit_enabled());
    assert_eq!(store.get("auth_token").unwrap(), None);
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_login_failure_without_detail_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    let session = setup_session(&mock_server.uri(), &store);
    let mut form = AuthForm::new();
    session.submit_login(&mut form, "a@b.c", "x").await;

    assert_eq!(
        form.error.as_deref(),
        Some("Error al iniciar sesión. Verifica tus credenciales.")
    );
}

#[tokio::test]
async fn test_login_network_failure() {
    let store = MemoryTokenStore::new();
    let session = setup_session("http://127.0.0.1:1", &store);
    let mut form = AuthForm::new();
    session.submit_login(&mut form, "a@b.c", "x").await;

    assert_eq!(form.error.as_deref(), Some("Error de conexión. Por favor, intenta de nuevo."));
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_logged_in_until_logout_regardless_of_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "t"})))
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    let session = setup_session(&mock_server.uri(), &store);
    session.login("a@b.c", "password").await.unwrap();
    assert!(session.is_logged_in());

    drop(mock_server);
    assert!(session.is_logged_in());

    let mut view = session.auth_view();
    session.logout(&mut view);
    assert!(!session.is_logged_in());
    assert!(view.guest_visible());
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_sends_json_with_null_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "email": "ada@example.org",
            "password": "analytical-engine",
            "full_name": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(sample_user()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    let session = setup_session(&mock_server.uri(), &store);
    let mut form = AuthForm::new();

    assert!(session.submit_register(&mut form, &valid_signup()).await);
    assert_eq!(form.redirect.as_ref().unwrap().location, "/static/login.html");
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_register_duplicate_email_shows_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    let session = setup_session(&mock_server.uri(), &store);
    let mut form = AuthForm::new();

    assert!(!session.submit_register(&mut form, &valid_signup()).await);
    assert_eq!(form.error.as_deref(), Some("Email already registered"));
}

#[tokio::test]
async fn test_register_validation_skips_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(sample_user()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    let session = setup_session(&mock_server.uri(), &store);
    let mut form = AuthForm::new();
    let signup = SignupForm { confirm_password: "different".to_string(), ..valid_signup() };

    assert!(!session.submit_register(&mut form, &signup).await);
    assert_eq!(form.error.as_deref(), Some("Las contraseñas no coinciden"));
    assert!(!form.loading);
}

// =============================================================================
// Current User
// =============================================================================

#[tokio::test]
async fn test_fetch_current_user_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    store.set("auth_token", "tok").unwrap();
    let session = setup_session(&mock_server.uri(), &store);

    let user = session.fetch_current_user().await.unwrap();
    assert_eq!(user.email, "ada@example.org");
    assert_eq!(user.full_name.as_deref(), Some("Ada Lovelace"));
}

#[tokio::test]
async fn test_fetch_current_user_without_token_skips_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    let session = setup_session(&mock_server.uri(), &store);
    assert_eq!(session.fetch_current_user().await, None);
}

#[tokio::test]
async fn test_rejected_token_is_cleared() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    store.set("auth_token", "expired").unwrap();
    let session = setup_session(&mock_server.uri(), &store);

    assert_eq!(session.fetch_current_user().await, None);
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_network_failure_keeps_token() {
    let store = MemoryTokenStore::new();
    store.set("auth_token", "tok").unwrap();
    let session = setup_session("http://127.0.0.1:1", &store);

    assert_eq!(session.fetch_current_user().await, None);
    assert!(session.is_logged_in());
}

#[tokio::test]
async fn test_refresh_auth_ui_fills_identity_after_initial_view() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user()))
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    store.set("auth_token", "tok").unwrap();
    let session = setup_session(&mock_server.uri(), &store);

    let mut view = session.auth_view();
    assert!(view.user_menu_visible());
    assert_eq!(view.display_name(), None);

    session.load_identity(&mut view).await;
    assert_eq!(view.display_name(), Some("ada@example.org"));

    let refreshed = session.refresh_auth_ui().await;
    assert_eq!(refreshed, view);
}

#[tokio::test]
async fn test_refresh_auth_ui_as_guest() {
    let store = MemoryTokenStore::new();
    let session = setup_session("http://127.0.0.1:1", &store);
    let view = session.refresh_auth_ui().await;
    assert!(view.guest_visible());
    assert!(!view.user_menu_visible());
}

// =============================================================================
// Pricing with a session
// =============================================================================

#[tokio::test]
async fn test_current_plan_defaults_to_free() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user()))
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    let session = setup_session(&mock_server.uri(), &store);
    let page = PricingPage::default();

    assert_eq!(page.current_plan(&session).await, None);

    store.set("auth_token", "tok").unwrap();
    assert_eq!(page.current_plan(&session).await, Some(Plan::Free));
}

#[tokio::test]
async fn test_current_plan_leaves_rejected_token_in_storage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryTokenStore::new();
    store.set("auth_token", "expired").unwrap();
    let session = setup_session(&mock_server.uri(), &store);

    assert_eq!(PricingPage::default().current_plan(&session).await, None);
    assert_eq!(store.get("auth_token").unwrap().as_deref(), Some("expired"));
    assert!(session.is_logged_in());
}
