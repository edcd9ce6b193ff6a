mod common;

use axum_test::TestServer;
use hidden_login::gate::GateOptions;
use hidden_login::settings::Settings;
use url::Url;

#[tokio::test]
async fn test_legacy_login_redirects_to_site_root() {
    let (state, login_flow) = common::create_test_state(common::settings("secret", ""));
    let server = TestServer::new(common::gated_site(state)).unwrap();

    let response = server.get("/wp-login.php").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "/");
    assert_eq!(login_flow.calls(), 0);
}

#[tokio::test]
async fn test_legacy_login_with_query_redirects_to_block_path() {
    let (state, login_flow) = common::create_test_state(common::settings("secret", "404"));
    let server = TestServer::new(common::gated_site(state)).unwrap();

    let response = server.get("/wp-login.php?x=1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "/404");
    assert_eq!(login_flow.calls(), 0);
}

#[tokio::test]
async fn test_legacy_login_any_case_is_redirected() {
    let (state, _login_flow) = common::create_test_state(common::settings("secret", "404"));
    let server = TestServer::new(common::gated_site(state)).unwrap();

    let response = server.get("/WP-Login.PHP").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "/404");
}

#[tokio::test]
async fn test_hidden_path_runs_login_flow() {
    let (state, login_flow) = common::create_test_state(common::settings("secret", "404"));
    let server = TestServer::new(common::gated_site(state)).unwrap();

    let response = server.get("/secret").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "login flow: GET /secret");
    assert_eq!(login_flow.calls(), 1);
}

#[tokio::test]
async fn test_hidden_path_with_trailing_slash_and_query() {
    let (state, login_flow) = common::create_test_state(common::settings("secret", "404"));
    let server = TestServer::new(common::gated_site(state)).unwrap();

    let response = server.get("/secret/?redirect_to=%2F").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "login flow: GET /secret/");
    assert_eq!(login_flow.calls(), 1);
}

#[tokio::test]
async fn test_post_to_legacy_login_reaches_route() {
    let (state, login_flow) = common::create_test_state(common::settings("secret", "404"));
    let server = TestServer::new(common::gated_site(state)).unwrap();

    let response = server.post("/wp-login.php").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "legacy post");
    assert_eq!(login_flow.calls(), 0);
}

#[tokio::test]
async fn test_post_to_hidden_path_falls_through() {
    let (state, login_flow) = common::create_test_state(common::settings("secret", "404"));
    let server = TestServer::new(common::gated_site(state)).unwrap();

    let response = server.post("/secret").await;

    response.assert_status_not_found();
    assert_eq!(response.text(), "fallback");
    assert_eq!(login_flow.calls(), 0);
}

#[tokio::test]
async fn test_unrelated_paths_pass_through() {
    let (state, login_flow) = common::create_test_state(common::settings("secret", "404"));
    let server = TestServer::new(common::gated_site(state)).unwrap();

    server.get("/").await.assert_status_ok();
    assert_eq!(server.get("/about").await.text(), "about");
    server.get("/secret-extra").await.assert_status_not_found();
    assert_eq!(login_flow.calls(), 0);
}

#[tokio::test]
async fn test_disabled_gate_takes_no_action() {
    let (state, login_flow) = common::create_test_state(Settings::default());
    let server = TestServer::new(common::gated_site(state)).unwrap();

    let response = server.get("/wp-login.php").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "legacy");

    let response = server.get("/other").await;
    response.assert_status_not_found();
    assert_eq!(login_flow.calls(), 0);
}

#[tokio::test]
async fn test_absolute_redirect_with_site_url() {
    let gate = GateOptions::new(
        Some(Url::parse("https://example.com/blog").unwrap()),
        vec![],
    );
    let (state, _login_flow) =
        common::create_test_state_with(common::settings("secret", "404"), gate);
    let server = TestServer::new(common::gated_site(state)).unwrap();

    let response = server.get("/wp-login.php").await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/blog/404");
}

#[tokio::test]
async fn test_settings_change_applies_to_next_request() {
    let (state, login_flow) = common::create_test_state(Settings::default());
    let settings_service = state.settings_service.clone();
    let server = TestServer::new(common::gated_site(state)).unwrap();

    server.get("/my-login").await.assert_status_not_found();

    settings_service.update("my-login", "").await.unwrap();

    server.get("/my-login").await.assert_status_ok();
    assert_eq!(login_flow.calls(), 1);

    let response = server.get("/wp-login.php").await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "/");
}

#[tokio::test]
async fn test_exempt_prefix_is_not_gated() {
    let gate = GateOptions::new(None, vec!["/legacy".to_string()]);
    let (state, _login_flow) =
        common::create_test_state_with(common::settings("secret", "404"), gate);
    let server = TestServer::new(common::gated_site(state)).unwrap();

    // Exempt: falls through to the router instead of being redirected.
    let response = server.get("/legacy/wp-login.php").await;
    assert_eq!(response.text(), "fallback");

    let response = server.get("/wp-login.php").await;
    assert_eq!(response.status_code(), 302);
}
