use axum::{Router, middleware};

use crate::{error::render_error_views, state::SharedState};

/// Login flow and session gate.
pub mod auth;
/// Swagger UI.
pub mod docs;
/// Error-kind demo endpoints.
pub mod exceptions;
/// Game CRUD and result registration.
pub mod games;
/// Health check.
pub mod health;
/// Informational pages.
pub mod pages;
/// Pokémon proxy and demo page.
pub mod pokemon;
/// Team CRUD and tally registration.
pub mod teams;

/// Compose all route trees, wiring in shared state, the session gate and the
/// browser error rendering.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(teams::router())
        .merge(games::router())
        .merge(pokemon::router())
        .merge(exceptions::router());

    let page_router = pages::router().merge(auth::router());

    let docs_router = docs::router(state.clone());

    api_router
        .merge(page_router)
        .merge(docs_router)
        .layer(middleware::from_fn(render_error_views))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ))
        .with_state(state)
}
