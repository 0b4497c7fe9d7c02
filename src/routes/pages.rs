use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::{game::GameResponse, pages::AppInfo},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes for the informational pages and the session-gated game listing.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/partidos", get(games_page))
}

/// Home page metadata.
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses((status = 200, description = "Home page", body = AppInfo))
)]
pub async fn home() -> Json<AppInfo> {
    Json(AppInfo::for_page("Basketball league"))
}

/// About page metadata.
#[utoipa::path(
    get,
    path = "/about",
    tag = "pages",
    responses((status = 200, description = "About page", body = AppInfo))
)]
pub async fn about() -> Json<AppInfo> {
    Json(AppInfo::for_page("About"))
}

/// The game listing page; requires a session.
#[utoipa::path(
    get,
    path = "/partidos",
    tag = "pages",
    responses(
        (status = 200, description = "All games", body = [GameResponse]),
        (status = 401, description = "No session")
    )
)]
pub async fn games_page(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let games = game_service::list_games(&state).await?;
    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}
