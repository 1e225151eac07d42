//! Tests for login, registration and participation handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{
    json_body, login_request, memory_state, session_cookie, test_app,
};

#[derive(Debug)]
struct ValidationExpectation<'a> {
    message: &'a str,
    field: &'a str,
    code: &'a str,
}

#[rstest]
#[case("", "pw", ValidationExpectation { message: "username must not be empty", field: "username", code: "empty_username" })]
#[case("ravi", "", ValidationExpectation { message: "password must not be empty", field: "password", code: "empty_password" })]
#[actix_web::test]
async fn login_rejects_blank_fields(
    #[case] username: &str,
    #[case] password: &str,
    #[case] expected: ValidationExpectation<'_>,
) {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(&app, login_request(username, password).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], expected.message);
    assert_eq!(body["details"]["field"], expected.field);
    assert_eq!(body["details"]["code"], expected.code);
}

#[actix_web::test]
async fn default_admin_logs_in_and_reads_profile() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let login = actix_test::call_service(&app, login_request("admin", "password").to_request()).await;
    assert_eq!(login.status(), StatusCode::OK);
    let cookie = session_cookie(&login);
    let body = json_body(login).await;
    assert!(body["userId"].as_str().is_some_and(|id| !id.is_empty()));

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(me.status(), StatusCode::OK);
    let profile = json_body(me).await;
    assert_eq!(profile["user"]["username"], "admin");
    assert_eq!(profile["user"]["role"], "admin");
    assert_eq!(profile["points"]["points"], 0);
    assert_eq!(profile["points"]["level"], "Bronze");
}

#[rstest]
#[case("admin", "hunter2")]
#[case("nobody", "anything")]
#[actix_web::test]
async fn bad_credentials_are_unauthorised(#[case] username: &str, #[case] password: &str) {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(&app, login_request(username, password).to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.response().cookies().next().is_none());
}

#[actix_web::test]
async fn registered_user_login_is_identity_only() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "username": "ravi",
                "email": "ravi@campus.edu",
                "department": "Physics"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let profile = json_body(created).await;
    assert_eq!(profile["user"]["role"], "user");
    assert_eq!(profile["points"]["itemsReported"], 0);

    for password in ["whatever", "something-else"] {
        let login =
            actix_test::call_service(&app, login_request("ravi", password).to_request()).await;
        assert_eq!(login.status(), StatusCode::OK);
        let body = json_body(login).await;
        assert_eq!(body["userId"], profile["user"]["id"]);
    }
}

#[rstest]
#[case(json!({ "email": "x@campus.edu" }), StatusCode::BAD_REQUEST, "invalid_request")]
#[case(json!({ "username": "x", "email": "x@campus.edu", "role": "overlord" }), StatusCode::BAD_REQUEST, "invalid_request")]
#[case(json!({ "username": "admin", "email": "a@campus.edu" }), StatusCode::CONFLICT, "conflict")]
#[actix_web::test]
async fn registration_rejects_bad_input(
    #[case] payload: Value,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), status);
    assert_eq!(json_body(res).await["code"], code);
}

#[actix_web::test]
async fn duplicate_username_conflicts() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    let payload = json!({ "username": "meera", "email": "meera@campus.edu" });

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
    }
}

#[actix_web::test]
async fn current_user_requires_session() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn leaderboard_is_public() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    let login = actix_test::call_service(&app, login_request("admin", "password").to_request()).await;
    assert_eq!(login.status(), StatusCode::OK);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/leaderboard")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["username"], "admin");
}
