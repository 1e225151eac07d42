//! Helpers shared by the HTTP handler tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use mockable::Clock;
use serde_json::{Value, json};

use crate::inbound::http::routes::{API_PREFIX, configure_api};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::state::{HttpState, Repositories};
use crate::outbound::memory::InMemoryStore;
use crate::test_support::FixtureClock;

/// Session middleware with a fresh key and an insecure cookie for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state wired to a fresh in-memory store and the fixture clock.
pub fn memory_state() -> (HttpState, InMemoryStore) {
    let store = InMemoryStore::new();
    let shared = Arc::new(store.clone());
    let clock: Arc<dyn Clock> = Arc::new(FixtureClock::default());
    let state = HttpState::from_repositories(
        Repositories {
            users: Arc::clone(&shared),
            points: Arc::clone(&shared),
            items: Arc::clone(&shared),
            departments: Arc::clone(&shared),
            vendors: Arc::clone(&shared),
            collections: Arc::clone(&shared),
            campaigns: shared,
        },
        clock,
    );
    (state, store)
}

/// Session cookie set by `response`.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// App exposing the API routes over `state` behind a test session cookie.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope(API_PREFIX).configure(configure_api))
}

/// `POST /api/v1/login` request for the given credentials.
pub fn login_request(username: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": password }))
}

/// Decode a JSON response body.
pub async fn json_body(response: ServiceResponse) -> Value {
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}
