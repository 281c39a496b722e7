//! Cookie-based authentication middleware for web dashboard.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::state::AppState;

/// Name of the cookie holding the dashboard token.
pub const AUTH_COOKIE: &str = "auth_token";

pub const LOGIN_PATH: &str = "/dashboard/login";

/// Pulls the `auth_token` value out of the `Cookie` header(s).
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

/// Authenticates dashboard requests with the `auth_token` cookie.
///
/// The token is the same API token used for Bearer authentication. Missing,
/// unknown or revoked tokens redirect to `/dashboard/login` instead of
/// returning `401`.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let Some(token) = token_from_cookies(req.headers()) else {
        return Err(Redirect::to(LOGIN_PATH));
    };

    match st.auth_service.authenticate(&token).await {
        Ok(()) => Ok(next.run(req).await),
        Err(_) => Err(Redirect::to(LOGIN_PATH)),
    }
}
