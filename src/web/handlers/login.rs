//! Login page and token submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::state::AppState;
use crate::web::middleware::web_auth::AUTH_COOKIE;

/// Dashboard session length.
const COOKIE_MAX_AGE_SECS: u32 = 8 * 60 * 60;

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub token: String,
}

/// `GET /dashboard/login`
pub async fn login_handler() -> impl IntoResponse {
    LoginTemplate { error: None }
}

/// Checks the submitted API token and starts a dashboard session.
///
/// # Endpoint
///
/// `POST /dashboard/login`
///
/// On success sets an `HttpOnly` `auth_token` cookie scoped to `/dashboard`
/// and redirects to the dashboard. On failure re-renders the form with `401`.
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let token = form.token.trim();

    if token.is_empty() || state.auth_service.authenticate(token).await.is_err() {
        tracing::info!("Dashboard login rejected");
        return (
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                error: Some("Invalid or revoked token".to_string()),
            },
        )
            .into_response();
    }

    let cookie = format!(
        "{AUTH_COOKIE}={token}; Path=/dashboard; HttpOnly; SameSite=Strict; Max-Age={COOKIE_MAX_AGE_SECS}"
    );

    ([(header::SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
}

/// `POST /dashboard/logout` - clears the session cookie.
pub async fn logout_handler() -> Response {
    let cookie = format!("{AUTH_COOKIE}=; Path=/dashboard; HttpOnly; SameSite=Strict; Max-Age=0");
    ([(header::SET_COOKIE, cookie)], Redirect::to("/dashboard/login")).into_response()
}
