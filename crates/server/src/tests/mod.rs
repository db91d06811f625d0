// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use ekip_api::{load_fixtures, redeem_voucher_at_time};
use ekip_persistence::Persistence;
use std::path::PathBuf;
use time::Duration;
use time::macros::datetime;
use tower::ServiceExt;

use crate::{AppState, build_router};

const FORM: &str = "application/x-www-form-urlencoded";

/// Helper to create test app state with fixtures and one operator.
fn create_test_app_state() -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let fixtures: PathBuf = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../api/fixtures");
    load_fixtures(&mut persistence, &fixtures).expect("Failed to load fixtures");
    persistence
        .create_operator("john", "john@doi.gov", "password")
        .expect("Failed to create operator");
    AppState::new(persistence, Duration::days(14))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, FORM);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Signs in as the test operator and returns the `Cookie` header value.
async fn sign_in(app: &Router) -> String {
    let response: Response = send(
        app,
        post_form("/accounts/login/", None, "username=john&password=password"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    let set_cookie: &str = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_index_redirects_to_redeem() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = send(&app, get_request("/", None)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/redeem/");
}

#[tokio::test]
async fn test_unauthenticated_request_redirects_to_login_with_next() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = send(&app, get_request("/redeem/sites/?state=AZ", None)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "/accounts/login/?next=/redeem/sites/%3Fstate%3DAZ"
    );
}

#[tokio::test]
async fn test_unknown_session_cookie_redirects_to_login() {
    let app: Router = build_router(create_test_app_state());

    let response: Response =
        send(&app, get_request("/redeem/", Some("sessionid=not-a-session"))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/accounts/login/?next=/redeem/");
}

#[tokio::test]
async fn test_login_page_renders_form() {
    let app: Router = build_router(create_test_app_state());

    let response: Response =
        send(&app, get_request("/accounts/login/?next=/redeem/sites/", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: String = body_text(response).await;
    assert!(body.contains("name=\"username\""));
    assert!(body.contains("name=\"next\""));
}

#[tokio::test]
async fn test_login_redirects_to_next() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = send(
        &app,
        post_form(
            "/accounts/login/",
            None,
            "username=john&password=password&next=%2Fredeem%2Fsites%2F%3Fstate%3DAZ",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/redeem/sites/?state=AZ");
    let set_cookie: &str = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("sessionid="));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_ignores_offsite_next() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = send(
        &app,
        post_form(
            "/accounts/login/",
            None,
            "username=john&password=password&next=%2F%2Fevil.example%2F",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/redeem/");
}

#[tokio::test]
async fn test_login_with_wrong_password_rerenders_form() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = send(
        &app,
        post_form("/accounts/login/", None, "username=john&password=wrong"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body: String = body_text(response).await;
    assert!(body.contains("Please enter a correct username and password."));
}

#[tokio::test]
async fn test_sites_for_state_lists_sites() {
    let app: Router = build_router(create_test_app_state());
    let cookie: String = sign_in(&app).await;

    let response: Response =
        send(&app, get_request("/redeem/sites/?state=AZ", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: String = body_text(response).await;
    assert!(body.contains("Arizona"));
    assert!(body.contains("Rainbow Bridge National Monument"));
    assert!(body.contains("Aqua Fria National Monument"));
    assert!(!body.contains("Cabo Rojo"));
}

#[tokio::test]
async fn test_sites_for_unknown_state_is_empty() {
    let app: Router = build_router(create_test_app_state());
    let cookie: String = sign_in(&app).await;

    let response: Response =
        send(&app, get_request("/redeem/sites/?state=ZZ", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: String = body_text(response).await;
    assert!(body.contains("No federal sites are listed for this state."));
}

#[tokio::test]
async fn test_redeem_page_prefills_site() {
    let app: Router = build_router(create_test_app_state());
    let cookie: String = sign_in(&app).await;

    let response: Response = send(
        &app,
        get_request("/redeem/?site=nps-rainbow-bridge", Some(&cookie)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: String = body_text(response).await;
    assert!(body.contains("value=\"nps-rainbow-bridge\""));
}

#[tokio::test]
async fn test_first_then_repeat_redemption() {
    let app: Router = build_router(create_test_app_state());
    let cookie: String = sign_in(&app).await;

    let first: Response = send(
        &app,
        post_form(
            "/redeem/",
            Some(&cookie),
            "record_locator=6pzdj7tp&site=nps-rainbow-bridge",
        ),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let body: String = body_text(first).await;
    assert!(body.contains("Pass 6PZDJ7TP redeemed"));
    assert!(body.contains("Rainbow Bridge National Monument"));

    let repeat: Response = send(
        &app,
        post_form(
            "/redeem/",
            Some(&cookie),
            "record_locator=6PZDJ7TP&site=fws-cabo-rojo",
        ),
    )
    .await;
    assert_eq!(repeat.status(), StatusCode::OK);
    let body: String = body_text(repeat).await;
    assert!(body.contains("was already redeemed"));
    assert!(body.contains("Rainbow Bridge National Monument"));
}

#[tokio::test]
async fn test_redeem_unknown_voucher_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    let cookie: String = sign_in(&app).await;

    let response: Response = send(
        &app,
        post_form(
            "/redeem/",
            Some(&cookie),
            "record_locator=NOPE0000&site=nps-rainbow-bridge",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redeem_malformed_voucher_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let cookie: String = sign_in(&app).await;

    let response: Response = send(
        &app,
        post_form(
            "/redeem/",
            Some(&cookie),
            "record_locator=%21%21%21&site=nps-rainbow-bridge",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_statistics_with_range() {
    let app_state: AppState = create_test_app_state();
    {
        let mut persistence = app_state.persistence.lock().await;
        redeem_voucher_at_time(
            &mut persistence,
            "XZ6HGDXR",
            "nps-rainbow-bridge",
            datetime!(2015-09-15 14:30 UTC),
        )
        .unwrap();
    }
    let app: Router = build_router(app_state);
    let cookie: String = sign_in(&app).await;

    let response: Response = send(
        &app,
        get_request(
            "/redeem/statistics/?start_date=09%2F01%2F2015&end_date=09%2F30%2F2015",
            Some(&cookie),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: String = body_text(response).await;
    assert!(body.contains("XZ6HGDXR"));
    assert!(body.contains("Arizona"));
    assert!(body.contains("Download CSV"));
}

#[tokio::test]
async fn test_statistics_with_bad_date_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let cookie: String = sign_in(&app).await;

    let response: Response = send(
        &app,
        get_request(
            "/redeem/statistics/?start_date=2015-09-01&end_date=09%2F30%2F2015",
            Some(&cookie),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_statistics_export_returns_csv() {
    let app_state: AppState = create_test_app_state();
    {
        let mut persistence = app_state.persistence.lock().await;
        redeem_voucher_at_time(
            &mut persistence,
            "6PZDJ7TP",
            "fws-cabo-rojo",
            datetime!(2015-09-30 23:59 UTC),
        )
        .unwrap();
    }
    let app: Router = build_router(app_state);
    let cookie: String = sign_in(&app).await;

    let response: Response = send(
        &app,
        get_request(
            "/redeem/statistics/export/?start_date=09%2F01%2F2015&end_date=09%2F30%2F2015",
            Some(&cookie),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let body: String = body_text(response).await;
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("record_locator,redeemed_at,site_slug,site_name,state")
    );
    let row: &str = lines.next().unwrap();
    assert!(row.starts_with("6PZDJ7TP,2015-09-30 23:59:00,fws-cabo-rojo,"));
    assert!(row.ends_with(",PR"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_statistics_export_requires_both_dates() {
    let app: Router = build_router(create_test_app_state());
    let cookie: String = sign_in(&app).await;

    let response: Response = send(
        &app,
        get_request(
            "/redeem/statistics/export/?start_date=09%2F01%2F2015",
            Some(&cookie),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app: Router = build_router(create_test_app_state());
    let cookie: String = sign_in(&app).await;

    let response: Response = send(&app, post_form("/accounts/logout/", Some(&cookie), "")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/accounts/login/");

    let after: Response = send(&app, get_request("/redeem/", Some(&cookie))).await;
    assert_eq!(after.status(), StatusCode::FOUND);
}
