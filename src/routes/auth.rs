use axum::{
    Form, Json, Router,
    extract::{Query, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use crate::{
    dto::auth::{AccessDeniedPage, LoginForm, LoginPage, LoginQuery},
    error::{AppError, is_programmatic},
    services::auth_service,
    state::SharedState,
};

/// Routes handling the login flow and the access-denied page.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", get(logout).post(logout))
        .route("/access-denied", get(access_denied))
}

/// Paths reachable without a session: static assets, the public pages, the
/// JSON API and the API docs.
fn is_public(path: &str) -> bool {
    matches!(path, "/" | "/about" | "/login")
        || ["/css/", "/js/", "/api/", "/docs", "/api-doc"]
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

/// Session gate applied to the whole router.
///
/// Unauthenticated browser requests are sent to the login page;
/// programmatic callers get a plain 401.
pub async fn require_session(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    if is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let session = auth_service::token_from_headers(request.headers())
        .and_then(|token| state.session(&token));

    match session {
        Some(_) => next.run(request).await,
        None if is_programmatic(request.headers()) => {
            AppError::Unauthorized("authentication required".into()).into_response()
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Show the login page, reflecting the `?error`/`?logout` flags.
#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses((status = 200, description = "Login page", body = LoginPage))
)]
pub async fn login_page(Query(query): Query<LoginQuery>) -> Json<LoginPage> {
    Json(LoginPage {
        title: "Sign in".into(),
        error: query.error.is_some(),
        logout: query.logout.is_some(),
    })
}

/// Handle a login form submission.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    responses(
        (status = 303, description = "Redirect home with a session cookie, or back to the login page on failure")
    )
)]
pub async fn login_submit(
    State(state): State<SharedState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(token) = auth_service::login(&state, &form.username, &form.password) else {
        return Ok(Redirect::to("/login?error").into_response());
    };

    let cookie = HeaderValue::from_str(&auth_service::session_cookie(&token))
        .map_err(|err| AppError::Internal(format!("failed to encode session cookie: {err}")))?;

    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

/// Close the current session and send the caller back to the login page.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses((status = 303, description = "Redirect to the login page"))
)]
pub async fn logout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(token) = auth_service::token_from_headers(&headers) {
        auth_service::logout(&state, &token);
    }

    let cookie = HeaderValue::from_str(&auth_service::clear_session_cookie())
        .map_err(|err| AppError::Internal(format!("failed to encode session cookie: {err}")))?;

    let mut response = Redirect::to("/login?logout").into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

/// Page shown when an authenticated user lacks the required role.
#[utoipa::path(
    get,
    path = "/access-denied",
    tag = "auth",
    responses((status = 403, description = "Access denied page", body = AccessDeniedPage))
)]
pub async fn access_denied() -> (StatusCode, Json<AccessDeniedPage>) {
    (
        StatusCode::FORBIDDEN,
        Json(AccessDeniedPage {
            title: "Access denied".into(),
            message: "Your account is not allowed to view this page".into(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths_skip_the_session_gate() {
        assert!(is_public("/"));
        assert!(is_public("/about"));
        assert!(is_public("/login"));
        assert!(is_public("/api/equipos"));
        assert!(is_public("/api/partidos/123"));
        assert!(is_public("/css/site.css"));
        assert!(is_public("/js/scripts.js"));
        assert!(is_public("/docs"));
    }

    #[test]
    fn gated_paths_require_a_session() {
        assert!(!is_public("/partidos"));
        assert!(!is_public("/api-test"));
        assert!(!is_public("/logout"));
        assert!(!is_public("/access-denied"));
    }
}
