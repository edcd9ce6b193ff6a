//! The authentication entry point the gate hands off to.

use askama::Template;
use askama_web::WebTemplate;
use async_trait::async_trait;
use axum::{
    extract::Request,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Path the legacy login form posts to.
pub const LEGACY_LOGIN_PATH: &str = "/wp-login.php";

/// The real login flow.
///
/// Invoked by the gate when a request hits the hidden login path, and by the
/// legacy endpoint route for requests the gate lets through. The gate never
/// inspects the returned response.
#[async_trait]
pub trait LoginFlow: Send + Sync {
    async fn run(&self, req: Request) -> Response;
}

/// Template for the login form.
///
/// Renders `templates/login.html` with:
/// - Username and password inputs
/// - Optional error banner
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    form_action: &'a str,
    error: Option<&'a str>,
}

/// Default [`LoginFlow`] rendering a plain login form.
///
/// `GET` and `HEAD` render the form. Credential checking belongs to the host
/// application, so any other method re-renders the form with
/// `501 Not Implemented`.
#[derive(Debug, Clone)]
pub struct LoginPage {
    form_action: String,
}

impl LoginPage {
    /// Creates a login page whose form posts to `form_action`.
    pub fn new(form_action: impl Into<String>) -> Self {
        Self {
            form_action: form_action.into(),
        }
    }
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new(LEGACY_LOGIN_PATH)
    }
}

#[async_trait]
impl LoginFlow for LoginPage {
    async fn run(&self, req: Request) -> Response {
        match *req.method() {
            Method::GET | Method::HEAD => LoginTemplate {
                form_action: &self.form_action,
                error: None,
            }
            .into_response(),
            _ => {
                warn!(method = %req.method(), "No authentication backend behind the login page");
                (
                    StatusCode::NOT_IMPLEMENTED,
                    LoginTemplate {
                        form_action: &self.form_action,
                        error: Some("Sign-in is not available on this server."),
                    },
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_renders_form() {
        let page = LoginPage::new("/custom-submit");
        let req = Request::builder()
            .uri("/secret")
            .body(Body::empty())
            .unwrap();

        let response = page.run(req).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("custom-submit"));
        assert!(!html.contains(r#"class="login-error""#));
    }

    #[tokio::test]
    async fn test_post_is_not_implemented() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(LEGACY_LOGIN_PATH)
            .body(Body::empty())
            .unwrap();

        let response = LoginPage::default().run(req).await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

        let html = body_text(response).await;
        assert!(html.contains(r#"class="login-error""#));
        assert!(html.contains("wp-login.php"));
    }
}
